//! Path resolution for panel configuration files.
//!
//! ```text
//! ~/.config/synth-panel/
//! └── config.toml        # Optional configuration
//!
//! ./frontend/build/      # Default prebuilt frontend bundle (relative to cwd)
//! ```

use std::path::PathBuf;

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "synth-panel";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

pub struct PanelPaths;

impl PanelPaths {
    /// Returns the panel configuration directory (e.g. `~/.config/synth-panel/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the default config file path. The file may not exist.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Frontend bundle location used when none is configured.
    pub fn default_frontend_dir() -> PathBuf {
        PathBuf::from("frontend").join("build")
    }
}
