use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use mural_core::image::{ImagePayload, MimeType};
use mural_core::manifest::HistoryManifest;
use mural_core::ports::{FolderBinding, FolderStorePort};

/// Fixed subdirectory under the granted folder holding one file per
/// image record.
const IMAGES_SUBDIR: &str = "mural-images";
const MANIFEST_FILE_NAME: &str = "manifest.json";

/// Folder store over a user-granted directory.
///
/// The grant can disappear at any time (folder deleted, permissions
/// changed); every operation re-probes and fails closed when it has.
pub struct FsFolderStore;

impl FsFolderStore {
    pub fn new() -> Self {
        Self
    }

    fn images_dir(binding: &FolderBinding) -> PathBuf {
        binding.directory.join(IMAGES_SUBDIR)
    }

    fn manifest_path(binding: &FolderBinding) -> PathBuf {
        Self::images_dir(binding).join(MANIFEST_FILE_NAME)
    }

    /// Whether the granted directory still exists and accepts the images
    /// subdirectory. Revocation shows up as the directory being gone or
    /// no longer writable.
    async fn probe(&self, binding: &FolderBinding) -> Result<bool> {
        match fs::metadata(&binding.directory).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Ok(false),
            Err(e) if revokes_access(&e) => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("probe folder binding failed: {}", binding.directory.display())
                })
            }
        }

        match fs::create_dir_all(Self::images_dir(binding)).await {
            Ok(()) => Ok(true),
            Err(e) if revokes_access(&e) => Ok(false),
            Err(e) => Err(e).with_context(|| {
                format!("create images dir failed under {}", binding.directory.display())
            }),
        }
    }
}

impl Default for FsFolderStore {
    fn default() -> Self {
        Self::new()
    }
}

fn revokes_access(error: &std::io::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::PermissionDenied | ErrorKind::NotFound
    )
}

#[async_trait]
impl FolderStorePort for FsFolderStore {
    async fn write_image(
        &self,
        binding: &FolderBinding,
        file_name: &str,
        payload: &ImagePayload,
    ) -> Result<bool> {
        if !self.probe(binding).await? {
            return Ok(false);
        }

        let path = Self::images_dir(binding).join(file_name);
        match fs::write(&path, payload.bytes()).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(false),
            Err(e) => Err(e).with_context(|| format!("write image failed: {}", path.display())),
        }
    }

    async fn read_image(
        &self,
        binding: &FolderBinding,
        file_name: &str,
    ) -> Result<Option<ImagePayload>> {
        if !self.probe(binding).await? {
            return Ok(None);
        }

        let path = Self::images_dir(binding).join(file_name);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if revokes_access(&e) => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read image failed: {}", path.display()))
            }
        };

        let mime = file_name
            .rsplit_once('.')
            .map(|(_, ext)| MimeType::from_extension(ext))
            .unwrap_or_else(|| MimeType("application/octet-stream".into()));
        Ok(Some(ImagePayload::from_bytes(mime, bytes)))
    }

    async fn delete_image(&self, binding: &FolderBinding, file_name: &str) -> Result<()> {
        if !self.probe(binding).await? {
            return Ok(());
        }

        let path = Self::images_dir(binding).join(file_name);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            // already deleted, or the grant is gone: both fine
            Err(e) if revokes_access(&e) => Ok(()),
            Err(e) => Err(e).with_context(|| format!("delete image failed: {}", path.display())),
        }
    }

    async fn read_manifest(&self, binding: &FolderBinding) -> Result<Option<HistoryManifest>> {
        if !self.probe(binding).await? {
            return Ok(None);
        }

        let path = Self::manifest_path(binding);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if revokes_access(&e) => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read manifest failed: {}", path.display()))
            }
        };

        let manifest: HistoryManifest = match serde_json::from_str(&content) {
            Ok(manifest) => manifest,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Unreadable manifest, ignoring");
                return Ok(None);
            }
        };

        if !manifest.is_current() {
            debug!(
                version = manifest.version,
                "Manifest written by an incompatible version, ignoring"
            );
            return Ok(None);
        }

        Ok(Some(manifest))
    }

    async fn write_manifest(
        &self,
        binding: &FolderBinding,
        manifest: &HistoryManifest,
    ) -> Result<bool> {
        if !self.probe(binding).await? {
            return Ok(false);
        }

        let content =
            serde_json::to_string_pretty(manifest).context("serialize manifest failed")?;
        let path = Self::manifest_path(binding);
        let tmp_path = path.with_extension("json.tmp");

        match fs::write(&tmp_path, content).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::PermissionDenied => return Ok(false),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("write temp manifest failed: {}", tmp_path.display()))
            }
        }

        fs::rename(&tmp_path, &path).await.with_context(|| {
            format!(
                "rename temp manifest to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(true)
    }

    async fn ensure_permission(&self, binding: &FolderBinding) -> Result<bool> {
        self.probe(binding).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mural_core::ids::ImageId;
    use mural_core::manifest::{ManifestEntry, MANIFEST_VERSION};
    use tempfile::TempDir;

    fn binding(dir: &TempDir) -> FolderBinding {
        FolderBinding {
            directory: dir.path().to_path_buf(),
            directory_name: "granted".into(),
        }
    }

    fn payload() -> ImagePayload {
        ImagePayload::from_bytes(MimeType::image_png(), vec![0x89, 0x50, 0x4e, 0x47])
    }

    #[tokio::test]
    async fn test_write_read_delete_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FsFolderStore::new();
        let binding = binding(&dir);

        assert!(store
            .write_image(&binding, "img-1.png", &payload())
            .await
            .unwrap());

        let read = store.read_image(&binding, "img-1.png").await.unwrap();
        assert_eq!(read, Some(payload()));

        store.delete_image(&binding, "img-1.png").await.unwrap();
        assert_eq!(store.read_image(&binding, "img-1.png").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsFolderStore::new();
        assert_eq!(
            store.read_image(&binding(&dir), "nope.png").await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = FsFolderStore::new();
        store
            .delete_image(&binding(&dir), "nope.png")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_revoked_binding_fails_closed() {
        let dir = TempDir::new().unwrap();
        let binding = binding(&dir);
        let store = FsFolderStore::new();
        drop(dir); // the granted folder disappears

        assert!(!store.ensure_permission(&binding).await.unwrap());
        assert!(!store
            .write_image(&binding, "img-1.png", &payload())
            .await
            .unwrap());
        assert_eq!(store.read_image(&binding, "img-1.png").await.unwrap(), None);
        store.delete_image(&binding, "img-1.png").await.unwrap();
    }

    #[tokio::test]
    async fn test_manifest_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = FsFolderStore::new();
        let binding = binding(&dir);

        let manifest = HistoryManifest::new(vec![ManifestEntry {
            file_name: "img-1.png".into(),
            image_id: ImageId::from("img-1"),
            mime: MimeType::image_png(),
        }]);
        assert!(store.write_manifest(&binding, &manifest).await.unwrap());
        assert_eq!(
            store.read_manifest(&binding).await.unwrap(),
            Some(manifest)
        );
    }

    #[tokio::test]
    async fn test_incompatible_manifest_is_treated_as_absent() {
        let dir = TempDir::new().unwrap();
        let store = FsFolderStore::new();
        let binding = binding(&dir);

        let stale = HistoryManifest {
            version: MANIFEST_VERSION + 1,
            entries: vec![],
        };
        assert!(store.write_manifest(&binding, &stale).await.unwrap());
        assert_eq!(store.read_manifest(&binding).await.unwrap(), None);
    }
}
