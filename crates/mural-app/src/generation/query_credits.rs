use std::sync::Arc;

use futures::future::{Abortable, Aborted};

use mural_core::ports::{CreditsSummary, GenerationError, GenerationPort};

use super::slot::RequestSlot;

/// Credits/usage lookup against the remote API. Same single-slot-with-
/// abort pattern as generation, tracked independently of it.
pub struct QueryCreditsUseCase {
    port: Arc<dyn GenerationPort>,
    slot: RequestSlot,
}

impl QueryCreditsUseCase {
    pub fn new(port: Arc<dyn GenerationPort>) -> Self {
        Self {
            port,
            slot: RequestSlot::new(),
        }
    }

    pub async fn execute(&self) -> Result<CreditsSummary, GenerationError> {
        let (seq, registration) = self.slot.begin().await;
        let outcome = match Abortable::new(self.port.query_credits(), registration).await {
            Ok(outcome) => outcome,
            Err(Aborted) => Err(GenerationError::Cancelled),
        };
        self.slot.finish(seq).await;
        outcome
    }

    pub async fn cancel(&self) {
        self.slot.cancel().await;
    }
}
