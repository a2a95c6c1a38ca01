//! The remote-call side: one tracked request per concern, with
//! caller-initiated cancellation.

mod generate_image;
mod query_credits;
mod slot;

pub use generate_image::{GenerateImageUseCase, GenerationSpec};
pub use query_credits::QueryCreditsUseCase;
pub use slot::RequestSlot;
