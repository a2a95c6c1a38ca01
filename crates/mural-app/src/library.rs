use std::collections::BTreeMap;

use mural_core::ids::{ImageId, StripId, ToolId};
use mural_core::image::{
    apply_cache_window, reconcile, ActiveSelections, ImagePayload, ImageRecord, PendingDeletion,
    RecordTable, StripConfig, ThumbnailStripsSnapshot,
};
use mural_core::persistence::{AuthMaterial, PersistedState, CURRENT_SCHEMA_VERSION};

/// The explicit state container for everything this subsystem owns: the
/// record table, the strips, the live selections, and the session-scoped
/// application fields carried through persistence.
///
/// Single-owner; all mutation happens on the caller's thread through the
/// pure snapshot functions. Every mutation batch ends with a reconcile
/// pass, so the strips never dangle between calls. Backing files whose
/// records were evicted accumulate in a pending-deletions buffer the
/// controller drains into fire-and-forget tasks.
pub struct ImageLibrary {
    table: RecordTable,
    strips: ThumbnailStripsSnapshot,
    selections: ActiveSelections,
    strip_configs: BTreeMap<StripId, StripConfig>,
    tool_parameters: BTreeMap<ToolId, serde_json::Value>,
    active_tool_id: Option<ToolId>,
    active_style_id: Option<String>,
    selected_model_id: Option<String>,
    auth: Option<AuthMaterial>,
    pending_deletions: Vec<PendingDeletion>,
}

impl ImageLibrary {
    pub fn new() -> Self {
        let mut strip_configs = BTreeMap::new();
        // history is the timeline: populated by produced images, never by drops
        strip_configs.insert(
            StripId::history(),
            StripConfig {
                allow_drop: false,
                allow_reorder: true,
                allow_remove: true,
            },
        );
        strip_configs.insert(StripId::starred(), StripConfig::default());
        strip_configs.insert(StripId::environment(), StripConfig::locked());

        Self {
            table: RecordTable::new(),
            strips: ThumbnailStripsSnapshot::default(),
            selections: ActiveSelections::default(),
            strip_configs,
            tool_parameters: BTreeMap::new(),
            active_tool_id: None,
            active_style_id: None,
            selected_model_id: None,
            auth: None,
            pending_deletions: Vec::new(),
        }
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn strips(&self) -> &ThumbnailStripsSnapshot {
        &self.strips
    }

    pub fn selections(&self) -> &ActiveSelections {
        &self.selections
    }

    pub fn strip_config(&self, strip_id: &StripId) -> StripConfig {
        self.strip_configs
            .get(strip_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_strip_config(&mut self, strip_id: StripId, config: StripConfig) {
        self.strip_configs.insert(strip_id, config);
    }

    /// Backing files of evicted records, to be deleted by the caller as
    /// fire-and-forget tasks.
    pub fn take_pending_deletions(&mut self) -> Vec<PendingDeletion> {
        std::mem::take(&mut self.pending_deletions)
    }

    fn reconcile(&mut self) {
        let outcome = reconcile(
            std::mem::take(&mut self.table),
            std::mem::take(&mut self.strips),
            std::mem::take(&mut self.selections),
        );
        self.table = outcome.table;
        self.strips = outcome.strips;
        self.selections = outcome.selections;
        self.pending_deletions.extend(outcome.deletions);
    }

    // ---- record intake ----

    /// A produced or uploaded image enters the table and the front of
    /// the history strip (newest first).
    pub fn add_history_record(&mut self, record: ImageRecord) -> ImageId {
        let id = record.id.clone();
        self.table.insert(record);
        self.strips = self
            .strips
            .with_item_added(&StripId::history(), id.clone(), Some(0));
        self.reconcile();
        id
    }

    /// Host-supplied images replace the environment strip wholesale.
    pub fn set_environment_records(&mut self, records: Vec<ImageRecord>) {
        let ids: Vec<ImageId> = records.iter().map(|r| r.id.clone()).collect();
        for record in records {
            self.table.insert(record);
        }
        self.strips = self
            .strips
            .with_items_replaced(&StripId::environment(), ids);
        self.reconcile();
    }

    // ---- strip mutations (capability-gated) ----

    /// An id dragged in from elsewhere. Ignored when the strip does not
    /// accept drops.
    pub fn drop_into_strip(&mut self, strip_id: &StripId, id: ImageId, at_index: Option<usize>) {
        if !self.strip_config(strip_id).allow_drop {
            return;
        }
        self.strips = self.strips.with_item_added(strip_id, id, at_index);
        self.reconcile();
    }

    pub fn remove_from_strip(&mut self, strip_id: &StripId, id: &ImageId) {
        if !self.strip_config(strip_id).allow_remove {
            return;
        }
        self.strips = self.strips.with_item_removed(strip_id, id);
        self.reconcile();
    }

    /// Reorder within a strip; a non-member joins it (drag from
    /// elsewhere), which is gated as a drop instead.
    pub fn reorder_in_strip(&mut self, strip_id: &StripId, id: ImageId, to_index: usize) {
        let config = self.strip_config(strip_id);
        let is_member = self.strips.contains(strip_id, &id);
        if (is_member && !config.allow_reorder) || (!is_member && !config.allow_drop) {
            return;
        }
        self.strips = self.strips.with_item_reordered(strip_id, id, to_index);
        self.reconcile();
    }

    /// Wholesale replacement for host-controlled strips; not gated.
    pub fn replace_strip_items(&mut self, strip_id: &StripId, ids: Vec<ImageId>) {
        self.strips = self.strips.with_items_replaced(strip_id, ids);
        self.reconcile();
    }

    pub fn set_pin_state(&mut self, strip_id: &StripId, pinned: bool) {
        self.strips = self.strips.with_pin_state(strip_id, pinned);
    }

    pub fn set_active_strip(&mut self, strip_id: Option<StripId>) {
        self.strips = self.strips.with_active(strip_id);
    }

    /// Remove an id from every strip and every selection slot; the next
    /// reconcile then evicts the record unless something else holds it.
    pub fn remove_everywhere(&mut self, id: &ImageId) {
        self.strips = self.strips.retaining_ids(|member| member != id);
        self.selections = self.selections.retaining_ids(|member| member != id);
        self.reconcile();
    }

    // ---- starring ----

    /// Starring mirrors the record flag into the starred strip. An
    /// unstarred record stays alive as long as any other strip or
    /// selection references it.
    pub fn set_starred(&mut self, id: &ImageId, starred: bool) {
        let Some(record) = self.table.get_mut(id) else {
            return;
        };
        record.is_starred = starred;
        self.strips = if starred {
            self.strips.with_item_added(&StripId::starred(), id.clone(), None)
        } else {
            self.strips.with_item_removed(&StripId::starred(), id)
        };
        self.reconcile();
    }

    // ---- selections ----

    pub fn set_target_selection(&mut self, id: Option<ImageId>) {
        self.selections.target = id;
        self.reconcile();
    }

    pub fn set_reference_selections(&mut self, ids: Vec<ImageId>) {
        self.selections.references = ids;
        self.reconcile();
    }

    pub fn set_result_selection(&mut self, id: Option<ImageId>) {
        self.selections.result = id;
        self.reconcile();
    }

    // ---- session-scoped application fields ----

    pub fn set_tool_parameters(&mut self, tool_id: ToolId, parameters: serde_json::Value) {
        self.tool_parameters.insert(tool_id, parameters);
    }

    pub fn tool_parameters(&self, tool_id: &ToolId) -> Option<&serde_json::Value> {
        self.tool_parameters.get(tool_id)
    }

    pub fn set_active_tool(&mut self, tool_id: Option<ToolId>) {
        self.active_tool_id = tool_id;
    }

    pub fn set_active_style(&mut self, style_id: Option<String>) {
        self.active_style_id = style_id;
    }

    pub fn set_selected_model(&mut self, model_id: Option<String>) {
        self.selected_model_id = model_id;
    }

    pub fn set_auth(&mut self, auth: Option<AuthMaterial>) {
        self.auth = auth;
    }

    pub fn auth(&self) -> Option<&AuthMaterial> {
        self.auth.as_ref()
    }

    // ---- hydration plumbing ----

    /// Records that lost their inline payload but can be refetched from
    /// the folder store.
    pub fn dehydrated_backed_records(&self) -> Vec<(ImageId, String)> {
        self.table
            .iter()
            .filter(|record| record.payload.is_none())
            .filter_map(|record| {
                let file_name = record.backing_file_name.clone()?;
                Some((record.id.clone(), file_name))
            })
            .collect()
    }

    /// `false` when the record disappeared while the read was in flight.
    pub fn apply_hydrated_payload(&mut self, id: &ImageId, payload: ImagePayload) -> bool {
        match self.table.get_mut(id) {
            Some(record) => {
                record.payload = Some(payload);
                true
            }
            None => false,
        }
    }

    /// Hydrated records the folder store has not seen yet, with their
    /// derived filenames.
    pub fn records_needing_backing(&self) -> Vec<(ImageId, String, ImagePayload)> {
        self.table
            .iter()
            .filter(|record| record.backing_file_name.is_none())
            .filter_map(|record| {
                let payload = record.payload.clone()?;
                let file_name = record.derived_backing_file_name()?;
                Some((record.id.clone(), file_name, payload))
            })
            .collect()
    }

    pub fn assign_backing_file_name(&mut self, id: &ImageId, file_name: String) {
        if let Some(record) = self.table.get_mut(id) {
            record.backing_file_name = Some(file_name);
        }
    }

    // ---- persistence mapping ----

    /// Build the persisted blob, dehydrating history records outside the
    /// cache window. Live state is untouched.
    pub fn to_persisted_state(&self, cache_limit: usize) -> PersistedState {
        let history_order = self.strips.items(&StripId::history());
        let records = apply_cache_window(
            self.table.records().to_vec(),
            history_order,
            cache_limit,
        );

        PersistedState {
            schema_version: CURRENT_SCHEMA_VERSION,
            records,
            strips: self.strips.clone(),
            selections: self.selections.clone(),
            tool_parameters: self.tool_parameters.clone(),
            active_tool_id: self.active_tool_id.clone(),
            active_style_id: self.active_style_id.clone(),
            selected_model_id: self.selected_model_id.clone(),
            auth: self.auth.clone(),
        }
    }

    /// Adopt a loaded (already sanitized) state. Ends with a reconcile
    /// pass so stray ids from the blob never survive into live state.
    pub fn apply_persisted_state(&mut self, state: PersistedState) {
        self.table = RecordTable::from_records(state.records);
        self.strips = state.strips;
        self.selections = state.selections;
        self.tool_parameters = state.tool_parameters;
        self.active_tool_id = state.active_tool_id;
        self.active_style_id = state.active_style_id;
        self.selected_model_id = state.selected_model_id;
        self.auth = state.auth;
        self.reconcile();
    }
}

impl Default for ImageLibrary {
    fn default() -> Self {
        Self::new()
    }
}
