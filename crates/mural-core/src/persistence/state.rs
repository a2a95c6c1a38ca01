use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::ToolId;
use crate::image::{ActiveSelections, ImageRecord, ThumbnailStripsSnapshot};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Opaque credential material carried through persistence for the
/// surrounding application. This subsystem never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthMaterial {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_at_ms: Option<i64>,
}

/// The single versioned record written to the session database.
///
/// Every field defaults so that blobs written by older builds load
/// without optimistic field access; version steps go through
/// [`StateMigrator`](super::StateMigrator).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedState {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub records: Vec<ImageRecord>,

    #[serde(default)]
    pub strips: ThumbnailStripsSnapshot,

    #[serde(default)]
    pub selections: ActiveSelections,

    /// Per-tool parameter defaults, keyed by tool id; shape owned by the
    /// tool catalog.
    #[serde(default)]
    pub tool_parameters: BTreeMap<ToolId, serde_json::Value>,

    #[serde(default)]
    pub active_tool_id: Option<ToolId>,

    #[serde(default)]
    pub active_style_id: Option<String>,

    #[serde(default)]
    pub selected_model_id: Option<String>,

    #[serde(default)]
    pub auth: Option<AuthMaterial>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            records: Vec::new(),
            strips: ThumbnailStripsSnapshot::default(),
            selections: ActiveSelections::default(),
            tool_parameters: BTreeMap::new(),
            active_tool_id: None,
            active_style_id: None,
            selected_model_id: None,
            auth: None,
        }
    }
}

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let state: PersistedState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(state.records.is_empty());
        assert_eq!(state.selections, ActiveSelections::default());
    }

    #[test]
    fn test_serde_round_trip() {
        let mut state = PersistedState::default();
        state.active_style_id = Some("style-7".into());
        state.auth = Some(AuthMaterial {
            access_token: "tok".into(),
            refresh_token: None,
            expires_at_ms: Some(1),
        });
        let json = serde_json::to_string(&state).unwrap();
        let back: PersistedState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
