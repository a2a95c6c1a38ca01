use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::ids::ImageId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct MimeType(pub String);

impl MimeType {
    pub fn image_png() -> Self {
        Self("image/png".into())
    }
    pub fn image_jpeg() -> Self {
        Self("image/jpeg".into())
    }
    pub fn image_webp() -> Self {
        Self("image/webp".into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File extension used when the payload is written to the folder store.
    pub fn extension(&self) -> &'static str {
        match self.0.as_str() {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }

    /// Reverse mapping used when reading folder-store files back.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Self::image_png(),
            "jpg" | "jpeg" => Self::image_jpeg(),
            "webp" => Self::image_webp(),
            "gif" => Self("image/gif".into()),
            _ => Self("application/octet-stream".into()),
        }
    }
}

impl fmt::Display for MimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MimeType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MimeType(s.to_string()))
    }
}

/// Filename a record's payload is stored under in the folder store.
///
/// Deterministic: the same id and mime always yield the same name, so
/// re-deriving for an existing record is idempotent and collision-free
/// across the store.
pub fn backing_file_name(id: &ImageId, mime: &MimeType) -> String {
    format!("{}.{}", id, mime.extension())
}
