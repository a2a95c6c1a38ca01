use serde::{Deserialize, Serialize};

use crate::ids::ToolId;

/// Write-once metadata describing how a record was produced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Provenance {
    pub tool_id: Option<ToolId>,

    /// Tool parameters as submitted; shape is owned by the tool catalog.
    #[serde(default)]
    pub parameters: serde_json::Value,

    pub prompt_used: Option<String>,
    pub model: Option<String>,
    pub cost: Option<f64>,
    pub duration_ms: Option<i64>,

    /// Creation time, Unix epoch milliseconds.
    pub timestamp_ms: i64,

    /// e.g. "1024x1024"; absent when the producer did not report one.
    pub resolution: Option<String>,

    pub source_style_id: Option<String>,
    pub source_summary: Option<String>,
}

impl Provenance {
    /// Provenance for an uploaded image: nothing known beyond the time.
    pub fn upload(timestamp_ms: i64) -> Self {
        Self {
            tool_id: None,
            parameters: serde_json::Value::Null,
            prompt_used: None,
            model: None,
            cost: None,
            duration_ms: None,
            timestamp_ms,
            resolution: None,
            source_style_id: None,
            source_summary: None,
        }
    }

    /// Provenance for an image supplied by the host embedding.
    pub fn environment(timestamp_ms: i64, source_summary: Option<String>) -> Self {
        Self {
            source_summary,
            ..Self::upload(timestamp_ms)
        }
    }
}
