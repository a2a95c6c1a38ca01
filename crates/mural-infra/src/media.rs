use image::ImageFormat;

use mural_core::image::MimeType;
use mural_core::ports::MediaProbePort;

/// Sniffs uploaded bytes with the `image` crate's magic-number detection.
/// Formats the store cannot round-trip through the folder store are
/// rejected as `None`.
pub struct ImageMediaProbe;

impl ImageMediaProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageMediaProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaProbePort for ImageMediaProbe {
    fn detect_mime(&self, bytes: &[u8]) -> Option<MimeType> {
        match image::guess_format(bytes).ok()? {
            ImageFormat::Png => Some(MimeType::image_png()),
            ImageFormat::Jpeg => Some(MimeType::image_jpeg()),
            ImageFormat::WebP => Some(MimeType::image_webp()),
            ImageFormat::Gif => Some(MimeType("image/gif".into())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_png_magic() {
        let probe = ImageMediaProbe::new();
        let bytes = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
        assert_eq!(probe.detect_mime(&bytes), Some(MimeType::image_png()));
    }

    #[test]
    fn test_detects_jpeg_magic() {
        let probe = ImageMediaProbe::new();
        let bytes = [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(probe.detect_mime(&bytes), Some(MimeType::image_jpeg()));
    }

    #[test]
    fn test_rejects_unknown_bytes() {
        let probe = ImageMediaProbe::new();
        assert_eq!(probe.detect_mime(b"definitely not an image"), None);
    }
}
