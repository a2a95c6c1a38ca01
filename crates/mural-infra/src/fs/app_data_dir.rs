use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Mural application data root directory.
///
/// # Platform-specific Paths
/// - macOS: ~/Library/Application Support/Mural
/// - Windows: %APPDATA%\Mural
/// - Linux: $XDG_DATA_HOME/Mural or ~/.local/share/Mural
///
/// This function does not create directories; the caller decides when to.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("Mural"))
}

/// Directory holding the session database.
pub fn db_dir() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("db"))
}

/// File remembering the last granted folder binding.
pub fn binding_file() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("folder_binding.json"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get macOS data directory"))
    }

    #[cfg(target_os = "windows")]
    {
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get Windows APPDATA directory"))
    }

    #[cfg(target_os = "linux")]
    {
        // Prefer XDG_DATA_HOME, fall back to ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            Ok(PathBuf::from(xdg_data_home))
        } else {
            dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get Linux data directory"))
        }
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        compile_error!("Unsupported platform for app_data_dir")
    }
}
