use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::{info, warn};

use mural_core::image::ImagePayload;
use mural_core::manifest::HistoryManifest;
use mural_core::ports::{BindingRepositoryPort, FolderBinding, FolderPickerPort, FolderStorePort};

/// Owns the single live folder binding and funnels all folder I/O
/// through it.
///
/// Permission loss is handled here, once: any store call that reports a
/// revoked grant forgets the binding and the service degrades to "no
/// folder store". Callers never see an error for revocation, only the
/// inactive state.
pub struct FolderPersistence {
    store: Arc<dyn FolderStorePort>,
    picker: Arc<dyn FolderPickerPort>,
    bindings: Arc<dyn BindingRepositoryPort>,
    active: Mutex<Option<FolderBinding>>,
}

impl FolderPersistence {
    pub fn new(
        store: Arc<dyn FolderStorePort>,
        picker: Arc<dyn FolderPickerPort>,
        bindings: Arc<dyn BindingRepositoryPort>,
    ) -> Self {
        Self {
            store,
            picker,
            bindings,
            active: Mutex::new(None),
        }
    }

    pub async fn active_binding(&self) -> Option<FolderBinding> {
        self.active.lock().await.clone()
    }

    pub async fn is_active(&self) -> bool {
        self.active.lock().await.is_some()
    }

    /// Ask the user to grant a folder. `Ok(None)` when they cancel.
    pub async fn request_binding(&self) -> Result<Option<FolderBinding>> {
        let Some(binding) = self.picker.pick_directory().await? else {
            return Ok(None);
        };

        self.bindings.save(&binding).await?;
        *self.active.lock().await = Some(binding.clone());
        info!(directory = %binding.directory.display(), "Folder binding granted");
        Ok(Some(binding))
    }

    /// Re-activate the remembered binding if it still grants access.
    pub async fn restore_binding(&self) -> Result<Option<FolderBinding>> {
        let Some(binding) = self.bindings.load().await? else {
            return Ok(None);
        };

        if !self.store.ensure_permission(&binding).await? {
            warn!(
                directory = %binding.directory.display(),
                "Remembered folder binding no longer grants access, forgetting it"
            );
            self.bindings.clear().await?;
            return Ok(None);
        }

        *self.active.lock().await = Some(binding.clone());
        Ok(Some(binding))
    }

    pub async fn forget_binding(&self) -> Result<()> {
        *self.active.lock().await = None;
        self.bindings.clear().await?;
        info!("Folder binding forgotten");
        Ok(())
    }

    async fn handle_revoked(&self) {
        *self.active.lock().await = None;
        if let Err(err) = self.bindings.clear().await {
            warn!(error = %err, "Failed to clear remembered binding after revocation");
        }
        warn!("Folder access was revoked; falling back to session-database persistence");
    }

    /// `Ok(false)` when no binding is active or the grant turned out to
    /// be revoked (the binding is forgotten as a side effect).
    pub async fn write_image(&self, file_name: &str, payload: &ImagePayload) -> Result<bool> {
        let Some(binding) = self.active_binding().await else {
            return Ok(false);
        };
        let written = self.store.write_image(&binding, file_name, payload).await?;
        if !written {
            self.handle_revoked().await;
        }
        Ok(written)
    }

    pub async fn read_image(&self, file_name: &str) -> Result<Option<ImagePayload>> {
        let Some(binding) = self.active_binding().await else {
            return Ok(None);
        };
        self.store.read_image(&binding, file_name).await
    }

    /// Best-effort; not-found counts as already deleted.
    pub async fn delete_image(&self, file_name: &str) -> Result<()> {
        let Some(binding) = self.active_binding().await else {
            return Ok(());
        };
        self.store.delete_image(&binding, file_name).await
    }

    pub async fn read_manifest(&self) -> Result<Option<HistoryManifest>> {
        let Some(binding) = self.active_binding().await else {
            return Ok(None);
        };
        self.store.read_manifest(&binding).await
    }

    pub async fn write_manifest(&self, manifest: &HistoryManifest) -> Result<bool> {
        let Some(binding) = self.active_binding().await else {
            return Ok(false);
        };
        let written = self.store.write_manifest(&binding, manifest).await?;
        if !written {
            self.handle_revoked().await;
        }
        Ok(written)
    }
}
