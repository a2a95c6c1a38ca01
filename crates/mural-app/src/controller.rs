use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use mural_core::ids::{ImageId, StripId, ToolId};
use mural_core::image::{ImageRecord, MimeType, PendingDeletion};
use mural_core::ports::{
    ClockPort, GenerationError, GenerationPort, MediaProbePort, SessionStorePort,
};

use crate::folder::FolderPersistence;
use crate::generation::{GenerateImageUseCase, GenerationSpec, QueryCreditsUseCase};
use crate::library::ImageLibrary;
use crate::usecases::{
    HydrateRecordsUseCase, IngestError, IngestUploadUseCase, LoadSessionUseCase, SaveReport,
    SaveSessionUseCase,
};

/// The session persistence controller: owns the [`ImageLibrary`] state
/// container and the use cases around it, and exposes the load()/save()
/// contract to the surrounding application.
///
/// `save` is expected to be debounced by the caller; `load` is called
/// once at startup. Everything runs on the caller's task; the only
/// spawned work is fire-and-forget deletion of backing files for
/// records the reconcile pass evicted.
pub struct SessionController {
    library: ImageLibrary,
    folder: Arc<FolderPersistence>,
    load_session: LoadSessionUseCase,
    save_session: SaveSessionUseCase,
    hydrate_records: HydrateRecordsUseCase,
    ingest_upload: IngestUploadUseCase,
    generate_image: GenerateImageUseCase,
    query_credits: QueryCreditsUseCase,
}

impl SessionController {
    pub fn new(
        session_store: Arc<dyn SessionStorePort>,
        folder: Arc<FolderPersistence>,
        generation: Arc<dyn GenerationPort>,
        probe: Arc<dyn MediaProbePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            library: ImageLibrary::new(),
            folder: Arc::clone(&folder),
            load_session: LoadSessionUseCase::new(Arc::clone(&session_store), Arc::clone(&folder)),
            save_session: SaveSessionUseCase::new(session_store, Arc::clone(&folder)),
            hydrate_records: HydrateRecordsUseCase::new(Arc::clone(&folder)),
            ingest_upload: IngestUploadUseCase::new(probe, Arc::clone(&clock)),
            generate_image: GenerateImageUseCase::new(Arc::clone(&generation), clock),
            query_credits: QueryCreditsUseCase::new(generation),
        }
    }

    pub fn library(&self) -> &ImageLibrary {
        &self.library
    }

    // ---- the load()/save() contract ----

    /// Restore the previous session, if any. Returns whether a persisted
    /// state existed.
    pub async fn load(&mut self) -> Result<bool> {
        let loaded = self.load_session.execute().await?;
        let restored = loaded.state.is_some();
        if let Some(state) = loaded.state {
            self.library.apply_persisted_state(state);
            self.drain_deletions();
        }
        Ok(restored)
    }

    pub async fn save(&mut self) -> Result<SaveReport> {
        self.save_session.execute(&mut self.library).await
    }

    /// One batched rehydration pass over all dehydrated, folder-backed
    /// records.
    pub async fn hydrate(&mut self) -> Result<usize> {
        self.hydrate_records.execute(&mut self.library).await
    }

    // ---- folder binding lifecycle ----

    pub async fn is_folder_persistence_active(&self) -> bool {
        self.folder.is_active().await
    }

    /// Ask the user to grant a folder; returns its display name, or
    /// `None` when they cancel.
    pub async fn request_folder_binding(&mut self) -> Result<Option<String>> {
        let binding = self.folder.request_binding().await?;
        Ok(binding.map(|b| b.directory_name))
    }

    pub async fn forget_folder_binding(&mut self) -> Result<()> {
        self.folder.forget_binding().await
    }

    // ---- record intake ----

    pub fn upload(
        &mut self,
        bytes: Vec<u8>,
        declared_mime: Option<MimeType>,
    ) -> Result<ImageId, IngestError> {
        let id = self
            .ingest_upload
            .execute(&mut self.library, bytes, declared_mime)?;
        self.drain_deletions();
        Ok(id)
    }

    pub fn set_environment_records(&mut self, records: Vec<ImageRecord>) {
        self.library.set_environment_records(records);
        self.drain_deletions();
    }

    // ---- remote calls ----

    pub async fn generate(&mut self, spec: GenerationSpec) -> Result<ImageId, GenerationError> {
        let id = self.generate_image.execute(&mut self.library, spec).await?;
        self.drain_deletions();
        Ok(id)
    }

    pub async fn cancel_generation(&self) {
        self.generate_image.cancel().await;
    }

    pub async fn is_generating(&self) -> bool {
        self.generate_image.is_generating().await
    }

    pub async fn query_credits(
        &self,
    ) -> Result<mural_core::ports::CreditsSummary, GenerationError> {
        self.query_credits.execute().await
    }

    // ---- strip and selection mutations ----

    pub fn drop_into_strip(&mut self, strip_id: &StripId, id: ImageId, at_index: Option<usize>) {
        self.library.drop_into_strip(strip_id, id, at_index);
        self.drain_deletions();
    }

    pub fn remove_from_strip(&mut self, strip_id: &StripId, id: &ImageId) {
        self.library.remove_from_strip(strip_id, id);
        self.drain_deletions();
    }

    pub fn reorder_in_strip(&mut self, strip_id: &StripId, id: ImageId, to_index: usize) {
        self.library.reorder_in_strip(strip_id, id, to_index);
        self.drain_deletions();
    }

    pub fn replace_strip_items(&mut self, strip_id: &StripId, ids: Vec<ImageId>) {
        self.library.replace_strip_items(strip_id, ids);
        self.drain_deletions();
    }

    pub fn remove_everywhere(&mut self, id: &ImageId) {
        self.library.remove_everywhere(id);
        self.drain_deletions();
    }

    pub fn set_pin_state(&mut self, strip_id: &StripId, pinned: bool) {
        self.library.set_pin_state(strip_id, pinned);
    }

    pub fn set_active_strip(&mut self, strip_id: Option<StripId>) {
        self.library.set_active_strip(strip_id);
    }

    pub fn set_starred(&mut self, id: &ImageId, starred: bool) {
        self.library.set_starred(id, starred);
        self.drain_deletions();
    }

    pub fn set_target_selection(&mut self, id: Option<ImageId>) {
        self.library.set_target_selection(id);
        self.drain_deletions();
    }

    pub fn set_reference_selections(&mut self, ids: Vec<ImageId>) {
        self.library.set_reference_selections(ids);
        self.drain_deletions();
    }

    pub fn set_result_selection(&mut self, id: Option<ImageId>) {
        self.library.set_result_selection(id);
        self.drain_deletions();
    }

    // ---- session-scoped application fields ----

    pub fn set_tool_parameters(&mut self, tool_id: ToolId, parameters: serde_json::Value) {
        self.library.set_tool_parameters(tool_id, parameters);
    }

    pub fn set_active_tool(&mut self, tool_id: Option<ToolId>) {
        self.library.set_active_tool(tool_id);
    }

    pub fn set_active_style(&mut self, style_id: Option<String>) {
        self.library.set_active_style(style_id);
    }

    pub fn set_selected_model(&mut self, model_id: Option<String>) {
        self.library.set_selected_model(model_id);
    }

    /// Register capability flags for a host-defined strip.
    pub fn set_strip_config(&mut self, strip_id: StripId, config: mural_core::image::StripConfig) {
        self.library.set_strip_config(strip_id, config);
    }

    // ---- GC side effects ----

    /// Evicted records' backing files are deleted in the background.
    /// Failures are logged and never retried; the records are already
    /// gone from memory either way.
    fn drain_deletions(&mut self) {
        let deletions = self.library.take_pending_deletions();
        if deletions.is_empty() {
            return;
        }
        let folder = Arc::clone(&self.folder);
        tokio::spawn(async move {
            for PendingDeletion {
                image_id,
                backing_file_name,
            } in deletions
            {
                if let Err(err) = folder.delete_image(&backing_file_name).await {
                    warn!(
                        image_id = %image_id,
                        error = %err,
                        "Failed to delete backing file for evicted record"
                    );
                }
            }
        });
    }
}
