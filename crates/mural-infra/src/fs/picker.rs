use anyhow::Result;
use async_trait::async_trait;

use mural_core::ports::{FolderBinding, FolderPickerPort};

/// Native directory chooser backed by the platform file dialog.
pub struct RfdFolderPicker;

impl RfdFolderPicker {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RfdFolderPicker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FolderPickerPort for RfdFolderPicker {
    async fn pick_directory(&self) -> Result<Option<FolderBinding>> {
        let Some(handle) = rfd::AsyncFileDialog::new()
            .set_title("Choose a folder for Mural's image history")
            .pick_folder()
            .await
        else {
            return Ok(None);
        };

        Ok(Some(FolderBinding {
            directory: handle.path().to_path_buf(),
            directory_name: handle.file_name(),
        }))
    }
}
