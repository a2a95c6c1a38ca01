use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use mural_core::persistence::{sanitize_loaded_state, PersistedState};
use mural_core::ports::{FolderBinding, SessionStorePort};

use crate::folder::FolderPersistence;

pub struct LoadedSession {
    pub state: Option<PersistedState>,
    pub folder_binding: Option<FolderBinding>,
    pub selections_dropped: usize,
}

/// Startup load: the session database's single state record, sanitized,
/// plus a re-probe of the remembered folder binding. Called exactly once.
pub struct LoadSessionUseCase {
    session_store: Arc<dyn SessionStorePort>,
    folder: Arc<FolderPersistence>,
}

impl LoadSessionUseCase {
    pub fn new(session_store: Arc<dyn SessionStorePort>, folder: Arc<FolderPersistence>) -> Self {
        Self {
            session_store,
            folder,
        }
    }

    pub async fn execute(&self) -> Result<LoadedSession> {
        let mut state = self.session_store.load_state().await?;

        let mut selections_dropped = 0;
        if let Some(state) = state.as_mut() {
            selections_dropped = sanitize_loaded_state(state);
            if selections_dropped > 0 {
                debug!(
                    dropped = selections_dropped,
                    "Cleared selections without inline payload during load"
                );
            }
        }

        let folder_binding = self.folder.restore_binding().await?;
        if folder_binding.is_some() {
            match self.folder.read_manifest().await? {
                Some(manifest) => {
                    debug!(entries = manifest.entries.len(), "Folder manifest loaded")
                }
                None => debug!("Folder store has no usable manifest"),
            }
        }

        info!(
            restored = state.is_some(),
            folder_active = folder_binding.is_some(),
            "Session load finished"
        );

        Ok(LoadedSession {
            state,
            folder_binding,
            selections_dropped,
        })
    }
}
