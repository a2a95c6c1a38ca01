use serde::{Deserialize, Serialize};

use super::mime::{self, MimeType};
use super::origin::RecordOrigin;
use super::payload::ImagePayload;
use super::provenance::Provenance;
use crate::ids::ImageId;

/// One produced or uploaded image.
///
/// Invariant: a record must have `payload` or `backing_file_name` (or
/// both). A record with neither is unrecoverable and is evicted by the
/// next reconcile pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRecord {
    pub id: ImageId,

    /// Record this one was derived from. Lineage only, never ownership.
    pub parent_id: Option<ImageId>,

    /// Inline bytes; absent while dehydrated.
    pub payload: Option<ImagePayload>,

    /// Filename in the folder store; assigned on first folder write.
    pub backing_file_name: Option<String>,

    #[serde(flatten)]
    pub provenance: Provenance,

    #[serde(default)]
    pub is_starred: bool,

    pub origin: RecordOrigin,
}

impl ImageRecord {
    pub fn new_user(payload: ImagePayload, provenance: Provenance) -> Self {
        Self {
            id: ImageId::new(),
            parent_id: None,
            payload: Some(payload),
            backing_file_name: None,
            provenance,
            is_starred: false,
            origin: RecordOrigin::User,
        }
    }

    pub fn new_environment(payload: ImagePayload, provenance: Provenance) -> Self {
        Self {
            origin: RecordOrigin::Environment,
            ..Self::new_user(payload, provenance)
        }
    }

    pub fn with_parent(mut self, parent_id: ImageId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn has_payload(&self) -> bool {
        self.payload.is_some()
    }

    /// Whether the record can still produce bytes, inline or via the
    /// folder store.
    pub fn is_recoverable(&self) -> bool {
        self.payload.is_some() || self.backing_file_name.is_some()
    }

    pub fn mime(&self) -> Option<&MimeType> {
        self.payload.as_ref().map(|p| p.mime())
    }

    /// Folder-store filename for this record's payload, derived from id
    /// and mime. `None` while dehydrated without an assigned name.
    pub fn derived_backing_file_name(&self) -> Option<String> {
        self.mime().map(|m| mime::backing_file_name(&self.id, m))
    }
}
