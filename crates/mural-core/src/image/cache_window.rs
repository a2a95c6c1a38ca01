use std::collections::BTreeMap;

use super::record::ImageRecord;
use crate::ids::ImageId;

/// How many history records keep inline payload bytes in the persisted
/// blob. Everything older is written dehydrated and relies on its
/// backing file for recovery after a reload.
pub const LOCAL_HISTORY_CACHE_LIMIT: usize = 20;

/// Partition records by history position for persistence.
///
/// The first `limit` ids of `history_order` (newest first) keep their
/// payload; records further down are cloned with payload cleared.
/// Records outside the history strip are not part of the window and keep
/// whatever payload they have. Live in-memory state is unaffected; this
/// only bounds what survives a reload.
pub fn apply_cache_window(
    records: Vec<ImageRecord>,
    history_order: &[ImageId],
    limit: usize,
) -> Vec<ImageRecord> {
    let position: BTreeMap<&ImageId, usize> = history_order
        .iter()
        .enumerate()
        .map(|(index, id)| (id, index))
        .collect();

    records
        .into_iter()
        .map(|mut record| {
            if let Some(&index) = position.get(&record.id) {
                if index >= limit {
                    record.payload = None;
                }
            }
            record
        })
        .collect()
}
