use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of an editing tool in the surrounding application's catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ToolId(String);

impl_id!(ToolId);
