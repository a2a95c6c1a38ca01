use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ids::ImageId;

/// The live selection slots: the edit target, the reference images fed to
/// the current tool, and the latest generation result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveSelections {
    #[serde(default)]
    pub target: Option<ImageId>,

    #[serde(default)]
    pub references: Vec<ImageId>,

    #[serde(default)]
    pub result: Option<ImageId>,
}

impl ActiveSelections {
    pub fn referenced_ids(&self) -> BTreeSet<ImageId> {
        let mut ids = BTreeSet::new();
        ids.extend(self.target.iter().cloned());
        ids.extend(self.references.iter().cloned());
        ids.extend(self.result.iter().cloned());
        ids
    }

    /// Selections with every id `keep` rejects reset to unset.
    pub fn retaining_ids(&self, keep: impl Fn(&ImageId) -> bool) -> Self {
        Self {
            target: self.target.clone().filter(|id| keep(id)),
            references: self
                .references
                .iter()
                .filter(|id| keep(id))
                .cloned()
                .collect(),
            result: self.result.clone().filter(|id| keep(id)),
        }
    }
}
