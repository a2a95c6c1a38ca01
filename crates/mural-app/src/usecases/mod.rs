mod hydrate_records;
mod ingest_upload;
mod load_session;
mod save_session;

pub use hydrate_records::HydrateRecordsUseCase;
pub use ingest_upload::{IngestError, IngestUploadUseCase};
pub use load_session::{LoadSessionUseCase, LoadedSession};
pub use save_session::{SaveReport, SaveSessionUseCase};
