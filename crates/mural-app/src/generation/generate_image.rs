use std::sync::Arc;

use futures::future::{Abortable, Aborted};

use mural_core::ids::{ImageId, ToolId};
use mural_core::image::{ImagePayload, ImageRecord, Provenance};
use mural_core::ports::{ClockPort, GenerationError, GenerationPort, GenerationRequest};

use super::slot::RequestSlot;
use crate::library::ImageLibrary;

/// Everything the surrounding application knows about the action being
/// run; folded into the new record's provenance.
#[derive(Debug, Clone)]
pub struct GenerationSpec {
    pub prompt: String,
    pub tool_id: Option<ToolId>,
    pub parameters: serde_json::Value,
    pub model_id: Option<String>,
    /// Source images for an edit; the first one becomes the parent.
    pub source_ids: Vec<ImageId>,
    pub style_id: Option<String>,
    pub source_summary: Option<String>,
}

/// Run one generation/edit call against the remote API and fold the
/// result into the store.
///
/// At most one request is tracked at a time; a newer call supersedes the
/// previous one's cancellation handle. `cancel` resolves the in-flight
/// call to [`GenerationError::Cancelled`], which callers treat as a
/// silent reset, not an error.
pub struct GenerateImageUseCase {
    port: Arc<dyn GenerationPort>,
    clock: Arc<dyn ClockPort>,
    slot: RequestSlot,
}

impl GenerateImageUseCase {
    pub fn new(port: Arc<dyn GenerationPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            port,
            clock,
            slot: RequestSlot::new(),
        }
    }

    pub async fn execute(
        &self,
        library: &mut ImageLibrary,
        spec: GenerationSpec,
    ) -> Result<ImageId, GenerationError> {
        let images: Vec<ImagePayload> = spec
            .source_ids
            .iter()
            .filter_map(|id| library.table().get(id))
            .filter_map(|record| record.payload.clone())
            .collect();

        let request = GenerationRequest {
            images,
            prompt: spec.prompt.clone(),
            model_id: spec.model_id.clone(),
        };

        let (seq, registration) = self.slot.begin().await;
        let outcome = match Abortable::new(self.port.generate(request), registration).await {
            Ok(outcome) => outcome,
            Err(Aborted) => Err(GenerationError::Cancelled),
        };
        self.slot.finish(seq).await;
        let result = outcome?;

        let provenance = Provenance {
            tool_id: spec.tool_id,
            parameters: spec.parameters,
            prompt_used: Some(spec.prompt),
            model: Some(result.model_id),
            cost: Some(result.cost),
            duration_ms: Some(result.duration_ms),
            timestamp_ms: self.clock.now_ms(),
            resolution: None,
            source_style_id: spec.style_id,
            source_summary: spec.source_summary,
        };

        let mut record = ImageRecord::new_user(result.payload, provenance);
        if let Some(parent) = spec.source_ids.first() {
            record = record.with_parent(parent.clone());
        }

        let id = library.add_history_record(record);
        library.set_result_selection(Some(id.clone()));
        Ok(id)
    }

    pub async fn cancel(&self) {
        self.slot.cancel().await;
    }

    pub async fn is_generating(&self) -> bool {
        self.slot.is_busy().await
    }
}
