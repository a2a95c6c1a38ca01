use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use mural_core::ports::{BindingRepositoryPort, FolderBinding};

/// Remembers the last granted folder binding in a JSON file under the
/// app data directory, so startup can re-probe it.
pub struct FileBindingRepository {
    path: PathBuf,
}

impl FileBindingRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the default location for this installation.
    pub fn in_app_data_dir() -> Result<Self> {
        Ok(Self::new(super::app_data_dir::binding_file()?))
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    async fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create binding dir failed: {}", dir.display()))?;
        }
        Ok(())
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp binding failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp binding to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[async_trait]
impl BindingRepositoryPort for FileBindingRepository {
    async fn load(&self) -> Result<Option<FolderBinding>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read binding failed: {}", self.path.display()))
            }
        };

        match serde_json::from_str(&content) {
            Ok(binding) => Ok(Some(binding)),
            Err(e) => {
                // a corrupt remembered binding is disposable, not fatal
                warn!(error = %e, "Unreadable folder binding file, ignoring");
                Ok(None)
            }
        }
    }

    async fn save(&self, binding: &FolderBinding) -> Result<()> {
        let content = serde_json::to_string_pretty(binding).context("serialize binding failed")?;
        self.atomic_write(&content).await
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("clear binding failed: {}", self.path.display()))
            }
        }
    }
}
