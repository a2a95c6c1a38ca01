use std::sync::Arc;

use thiserror::Error;

use mural_core::ids::ImageId;
use mural_core::image::{ImagePayload, ImageRecord, MimeType, Provenance};
use mural_core::ports::{ClockPort, MediaProbePort};

use crate::library::ImageLibrary;

/// User-visible, non-blocking upload failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IngestError {
    #[error("That file is empty.")]
    EmptyUpload,

    #[error("That file format is not supported here.")]
    UnsupportedFormat,
}

/// Accept user-dropped bytes into the store: sniff the format, wrap the
/// bytes as an inline payload, and append the record to history.
pub struct IngestUploadUseCase {
    probe: Arc<dyn MediaProbePort>,
    clock: Arc<dyn ClockPort>,
}

impl IngestUploadUseCase {
    pub fn new(probe: Arc<dyn MediaProbePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self { probe, clock }
    }

    /// Sniffed format wins over the declared one; a declaration only
    /// rescues bytes the sniffer cannot place.
    pub fn execute(
        &self,
        library: &mut ImageLibrary,
        bytes: Vec<u8>,
        declared_mime: Option<MimeType>,
    ) -> Result<ImageId, IngestError> {
        if bytes.is_empty() {
            return Err(IngestError::EmptyUpload);
        }

        let mime = self
            .probe
            .detect_mime(&bytes)
            .or(declared_mime)
            .ok_or(IngestError::UnsupportedFormat)?;

        let record = ImageRecord::new_user(
            ImagePayload::from_bytes(mime, bytes),
            Provenance::upload(self.clock.now_ms()),
        );
        Ok(library.add_history_record(record))
    }
}
