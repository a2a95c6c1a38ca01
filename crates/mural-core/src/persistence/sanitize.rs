use std::collections::BTreeSet;

use super::state::PersistedState;
use crate::ids::ImageId;

/// Load-time selection sanitation.
///
/// Drops any selection id (target, references, result) whose record
/// lacks inline payload at load time, instead of leaving it dangling.
/// This intentionally also clears selections of dehydrated records that
/// a valid backing file and folder binding could rehydrate moments
/// later; that is the behavior this store specifies, ambiguous as it is
/// for older folder-backed images.
///
/// Returns how many selection slots were cleared.
pub fn sanitize_loaded_state(state: &mut PersistedState) -> usize {
    let hydrated: BTreeSet<ImageId> = state
        .records
        .iter()
        .filter(|record| record.has_payload())
        .map(|record| record.id.clone())
        .collect();

    let before = state.selections.referenced_ids().len();
    state.selections = state
        .selections
        .retaining_ids(|id| hydrated.contains(id));
    before - state.selections.referenced_ids().len()
}
