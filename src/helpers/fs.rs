//! File System Utilities
//!
//! Configuration directory management.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use home::home_dir;

use crate::error::{Error, Result};

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/tablet-configurator/` or `$XDG_CONFIG_HOME/tablet-configurator/`
/// - **macOS**: `~/Library/Application Support/dev.storycraft.tablet-configurator/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\storycraft\tablet-configurator\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let Some(project_dirs) = ProjectDirs::from("dev", "storycraft", "tablet-configurator") else {
        return Err(Error::Invalid {
            message: "Could not determine project directories".to_string(),
        });
    };

    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    // Handle migration from old location if needed
    if let Some(home) = home_dir() {
        let old_config_path = home.join(".tablet-configurator");
        if old_config_path.exists() {
            // Copy files from old location (ignore errors)
            let _ = copy_dir_files(&old_config_path, config_dir);
            // Clean up old directory
            let _ = fs::remove_dir_all(&old_config_path);
        }
    }

    Ok(config_dir.to_path_buf())
}

/// Copy files (not directories) from source to destination
fn copy_dir_files(src: &PathBuf, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;

        // Skip subdirectories
        if file_type.is_dir() {
            continue;
        }

        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        fs::copy(&src_path, &dst_path)?;
    }
    Ok(())
}
