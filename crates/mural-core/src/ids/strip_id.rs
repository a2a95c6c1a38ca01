use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one named strip (ordered view over image ids).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StripId(String);

impl_id!(StripId);

impl StripId {
    /// The session timeline: every produced or uploaded image lands here.
    pub fn history() -> Self {
        Self("history".into())
    }

    /// Images the user starred; membership mirrors `ImageRecord::is_starred`.
    pub fn starred() -> Self {
        Self("starred".into())
    }

    /// Host-supplied images; contents are replaced wholesale by the embedder.
    pub fn environment() -> Self {
        Self("environment".into())
    }
}
