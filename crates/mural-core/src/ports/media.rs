use crate::image::MimeType;

/// Sniffs the media type of uploaded bytes. `None` for formats the store
/// does not accept.
pub trait MediaProbePort: Send + Sync {
    fn detect_mime(&self, bytes: &[u8]) -> Option<MimeType>;
}
