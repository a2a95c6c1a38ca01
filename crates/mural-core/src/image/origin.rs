use serde::{Deserialize, Serialize};

/// Where a record entered the store.
///
/// Environment records are supplied by the host embedding and are exempt
/// from garbage collection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordOrigin {
    User,
    Environment,
}

impl RecordOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOrigin::User => "user",
            RecordOrigin::Environment => "environment",
        }
    }

    pub fn is_environment(&self) -> bool {
        matches!(self, RecordOrigin::Environment)
    }
}

impl From<&str> for RecordOrigin {
    fn from(s: &str) -> Self {
        match s {
            "environment" => RecordOrigin::Environment,
            _ => RecordOrigin::User,
        }
    }
}
