//! Port traits implemented by the infrastructure layer.

mod clock;
mod folder_store;
mod generation;
mod media;
mod session_store;

pub use clock::ClockPort;
pub use folder_store::{BindingRepositoryPort, FolderBinding, FolderPickerPort, FolderStorePort};
pub use generation::{
    CreditsSummary, GenerationError, GenerationPort, GenerationRequest, GenerationResult,
};
pub use media::MediaProbePort;
pub use session_store::SessionStorePort;
