use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier of one tracked image record. Assigned at creation, immutable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ImageId(String);

impl_id!(ImageId);
