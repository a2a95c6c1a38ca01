use async_trait::async_trait;
use thiserror::Error;

use crate::image::ImagePayload;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Source images for an edit; empty for pure text-to-image.
    pub images: Vec<ImagePayload>,
    pub prompt: String,
    pub model_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub payload: ImagePayload,
    pub duration_ms: i64,
    pub cost: f64,
    pub model_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditsSummary {
    pub remaining_credits: f64,
}

/// Failure taxonomy of the remote call. Only `InsufficientCredits`
/// carries actionable detail; `Cancelled` is a silent reset, never shown
/// as an error. Nothing here is retried automatically.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GenerationError {
    #[error("{detail}")]
    InsufficientCredits { detail: String, info_url: String },

    #[error("generation was cancelled")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

/// The remote model-serving API. The HTTP client behind this lives in
/// the surrounding application.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResult, GenerationError>;

    async fn query_credits(&self) -> Result<CreditsSummary, GenerationError>;
}
