//! Image store domain models.

mod cache_window;
mod mime;
mod origin;
mod payload;
mod provenance;
mod reconcile;
mod record;
mod selections;
mod strips;
mod table;

#[cfg(test)]
mod tests;

pub use cache_window::{apply_cache_window, LOCAL_HISTORY_CACHE_LIMIT};
pub use mime::{backing_file_name, MimeType};
pub use origin::RecordOrigin;
pub use payload::ImagePayload;
pub use provenance::Provenance;
pub use reconcile::{reconcile, PendingDeletion, ReconcileOutcome};
pub use record::ImageRecord;
pub use selections::ActiveSelections;
pub use strips::{StripConfig, ThumbnailStripsSnapshot};
pub use table::RecordTable;
