use serde::{Deserialize, Serialize};

use crate::ids::ImageId;
use crate::image::{ImageRecord, MimeType};

pub const MANIFEST_VERSION: u32 = 1;

/// Index the folder store writes beside its image files, describing what
/// it believes it holds. Read back at startup; a version mismatch
/// invalidates the whole manifest (treated as absent, not as corruption).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryManifest {
    pub version: u32,
    pub entries: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub file_name: String,
    pub image_id: ImageId,
    pub mime: MimeType,
}

impl HistoryManifest {
    pub fn new(entries: Vec<ManifestEntry>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            entries,
        }
    }

    /// Manifest describing every folder-backed record in `records`.
    pub fn from_records<'a>(records: impl Iterator<Item = &'a ImageRecord>) -> Self {
        let entries = records
            .filter_map(|record| {
                let file_name = record.backing_file_name.clone()?;
                let mime = file_name
                    .rsplit_once('.')
                    .map(|(_, ext)| MimeType::from_extension(ext))
                    .unwrap_or(MimeType("application/octet-stream".into()));
                Some(ManifestEntry {
                    file_name,
                    image_id: record.id.clone(),
                    mime,
                })
            })
            .collect();
        Self::new(entries)
    }

    pub fn is_current(&self) -> bool {
        self.version == MANIFEST_VERSION
    }
}
