use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::ids::{ImageId, StripId};

/// Capability flags for one strip. Not persisted; the controller decides
/// which config applies to which strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    /// Accepts ids dragged in from elsewhere.
    pub allow_drop: bool,
    /// Accepts in-place reordering.
    pub allow_reorder: bool,
    /// Accepts explicit removal of members.
    pub allow_remove: bool,
}

impl StripConfig {
    pub fn locked() -> Self {
        Self {
            allow_drop: false,
            allow_reorder: false,
            allow_remove: false,
        }
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            allow_drop: true,
            allow_reorder: true,
            allow_remove: true,
        }
    }
}

/// Immutable value describing every strip's membership and the pin/active
/// state. All updates return a new snapshot; the input is never touched,
/// so consumers can diff by identity.
///
/// No operation here validates ids against the record table. Mutations
/// are id-blind; dangling ids are resolved asynchronously by reconcile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ThumbnailStripsSnapshot {
    /// Ordered, duplicate-free sequence per strip. Order is display and
    /// priority order.
    #[serde(default)]
    pub item_ids_by_strip: BTreeMap<StripId, Vec<ImageId>>,

    #[serde(default)]
    pub pinned_strip_ids: BTreeSet<StripId>,

    #[serde(default)]
    pub active_strip_id: Option<StripId>,
}

impl ThumbnailStripsSnapshot {
    pub fn items(&self, strip_id: &StripId) -> &[ImageId] {
        self.item_ids_by_strip
            .get(strip_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, strip_id: &StripId, id: &ImageId) -> bool {
        self.items(strip_id).contains(id)
    }

    /// Insert `id` into a strip at `at_index` (end when `None`). No-op if
    /// the id is already a member of that strip. Other strips untouched.
    pub fn with_item_added(&self, strip_id: &StripId, id: ImageId, at_index: Option<usize>) -> Self {
        if self.contains(strip_id, &id) {
            return self.clone();
        }
        let mut next = self.clone();
        let items = next.item_ids_by_strip.entry(strip_id.clone()).or_default();
        let index = at_index.unwrap_or(items.len()).min(items.len());
        items.insert(index, id);
        next
    }

    /// Delete `id` from a strip if present; no-op otherwise.
    pub fn with_item_removed(&self, strip_id: &StripId, id: &ImageId) -> Self {
        if !self.contains(strip_id, id) {
            return self.clone();
        }
        let mut next = self.clone();
        if let Some(items) = next.item_ids_by_strip.get_mut(strip_id) {
            items.retain(|member| member != id);
        }
        next
    }

    /// Move `id` to `to_index` within a strip. A non-member joins the
    /// strip at that index (a drag from elsewhere implicitly joins).
    pub fn with_item_reordered(&self, strip_id: &StripId, id: ImageId, to_index: usize) -> Self {
        self.with_item_removed(strip_id, &id)
            .with_item_added(strip_id, id, Some(to_index))
    }

    /// Wholesale replacement of a strip's sequence, deduplicated keeping
    /// first occurrences. Used for host-controlled strips.
    pub fn with_items_replaced(&self, strip_id: &StripId, ids: Vec<ImageId>) -> Self {
        let mut next = self.clone();
        let mut seen = BTreeSet::new();
        let deduped: Vec<ImageId> = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
        next.item_ids_by_strip.insert(strip_id.clone(), deduped);
        next
    }

    pub fn with_pin_state(&self, strip_id: &StripId, pinned: bool) -> Self {
        let mut next = self.clone();
        if pinned {
            next.pinned_strip_ids.insert(strip_id.clone());
        } else {
            next.pinned_strip_ids.remove(strip_id);
        }
        next
    }

    /// Set the active strip, clearing any previous value.
    pub fn with_active(&self, strip_id: Option<StripId>) -> Self {
        let mut next = self.clone();
        next.active_strip_id = strip_id;
        next
    }

    /// Union of all strip memberships.
    pub fn referenced_ids(&self) -> BTreeSet<ImageId> {
        self.item_ids_by_strip
            .values()
            .flatten()
            .cloned()
            .collect()
    }

    /// Drop every id `keep` rejects from every strip. Used by reconcile;
    /// not part of the mutation surface.
    pub fn retaining_ids(&self, keep: impl Fn(&ImageId) -> bool) -> Self {
        let mut next = self.clone();
        for items in next.item_ids_by_strip.values_mut() {
            items.retain(|id| keep(id));
        }
        next
    }
}
