use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::image::ImagePayload;
use crate::manifest::HistoryManifest;

/// The live connection to a user-granted folder: where it is and what to
/// call it in status messages. At most one binding is active at a time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderBinding {
    pub directory: PathBuf,
    pub directory_name: String,
}

/// Durable per-image storage under a user-granted folder.
///
/// Permission discipline: every operation re-checks access before
/// touching the folder. After the binding has been revoked, calls fail
/// closed (`Ok(false)` / `Ok(None)` / no-op) instead of erroring from
/// deep inside a persistence path; the caller decides when to forget the
/// binding.
#[async_trait]
pub trait FolderStorePort: Send + Sync {
    /// `Ok(false)` when the write was skipped because permission is gone.
    async fn write_image(
        &self,
        binding: &FolderBinding,
        file_name: &str,
        payload: &ImagePayload,
    ) -> Result<bool>;

    /// `Ok(None)` for a missing file or lost permission; not an error.
    async fn read_image(
        &self,
        binding: &FolderBinding,
        file_name: &str,
    ) -> Result<Option<ImagePayload>>;

    /// Not-found is treated as already-deleted.
    async fn delete_image(&self, binding: &FolderBinding, file_name: &str) -> Result<()>;

    /// `Ok(None)` when absent, unreadable, or written by an incompatible
    /// version.
    async fn read_manifest(&self, binding: &FolderBinding) -> Result<Option<HistoryManifest>>;

    async fn write_manifest(
        &self,
        binding: &FolderBinding,
        manifest: &HistoryManifest,
    ) -> Result<bool>;

    /// Cheap pre-flight: whether the binding still grants read-write
    /// access.
    async fn ensure_permission(&self, binding: &FolderBinding) -> Result<bool>;
}

/// Native directory chooser. `Ok(None)` when the user cancels.
#[async_trait]
pub trait FolderPickerPort: Send + Sync {
    async fn pick_directory(&self) -> Result<Option<FolderBinding>>;
}

/// Remembers the last granted binding across sessions so it can be
/// re-probed at startup.
#[async_trait]
pub trait BindingRepositoryPort: Send + Sync {
    async fn load(&self) -> Result<Option<FolderBinding>>;
    async fn save(&self, binding: &FolderBinding) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
