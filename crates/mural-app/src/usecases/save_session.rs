use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use mural_core::image::LOCAL_HISTORY_CACHE_LIMIT;
use mural_core::manifest::HistoryManifest;
use mural_core::ports::SessionStorePort;

use crate::folder::FolderPersistence;
use crate::library::ImageLibrary;

#[derive(Debug, Default)]
pub struct SaveReport {
    pub folder_writes: usize,
    pub dehydrated_records: usize,
    /// User-visible, non-blocking status lines (lost folder access,
    /// failed writes). Never carries a hard failure.
    pub messages: Vec<String>,
}

/// Persist the whole session: flush new payloads to the folder store,
/// refresh the manifest, then write the cache-windowed blob to the
/// session database.
///
/// Invoked on every meaningful state change. Debouncing/coalescing is
/// the caller's job; there is no internal queue and no at-most-one
/// in-flight guarantee here.
pub struct SaveSessionUseCase {
    session_store: Arc<dyn SessionStorePort>,
    folder: Arc<FolderPersistence>,
}

impl SaveSessionUseCase {
    pub fn new(session_store: Arc<dyn SessionStorePort>, folder: Arc<FolderPersistence>) -> Self {
        Self {
            session_store,
            folder,
        }
    }

    pub async fn execute(&self, library: &mut ImageLibrary) -> Result<SaveReport> {
        let mut report = SaveReport::default();

        if self.folder.is_active().await {
            self.flush_payloads(library, &mut report).await;
        }

        let state = library.to_persisted_state(LOCAL_HISTORY_CACHE_LIMIT);
        report.dehydrated_records = state
            .records
            .iter()
            .filter(|record| record.payload.is_none())
            .count();

        self.session_store.save_state(&state).await?;
        Ok(report)
    }

    /// Write every not-yet-backed payload, then the manifest. A revoked
    /// grant stops the batch; an individual write failure is logged and
    /// surfaced but leaves the in-memory record exactly as it was.
    async fn flush_payloads(&self, library: &mut ImageLibrary, report: &mut SaveReport) {
        for (id, file_name, payload) in library.records_needing_backing() {
            match self.folder.write_image(&file_name, &payload).await {
                Ok(true) => {
                    library.assign_backing_file_name(&id, file_name);
                    report.folder_writes += 1;
                }
                Ok(false) => {
                    report.messages.push(
                        "Folder access was lost; history is kept in the session database only."
                            .to_string(),
                    );
                    return;
                }
                Err(err) => {
                    warn!(image_id = %id, error = %err, "Failed to write image to folder store");
                    report
                        .messages
                        .push(format!("Couldn't save an image to the backing folder: {err}"));
                }
            }
        }

        let manifest = HistoryManifest::from_records(library.table().iter());
        match self.folder.write_manifest(&manifest).await {
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "Failed to write folder manifest");
                report
                    .messages
                    .push(format!("Couldn't update the backing folder index: {err}"));
            }
        }
    }
}
