//! Path management for statement-collate
//!
//! ## Path Resolution Order
//!
//! 1. `STATEMENT_COLLATE_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory from [`directories::ProjectDirs`]
//!    (e.g. `~/.config/statement-collate` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CollateError;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "STATEMENT_COLLATE_CONFIG_DIR";

/// Manages the paths used by statement-collate
#[derive(Debug, Clone)]
pub struct CollatePaths {
    /// Directory holding the settings file
    config_dir: PathBuf,
}

impl CollatePaths {
    /// Resolve the config directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// environment override is not set.
    pub fn new() -> Result<Self, CollateError> {
        let config_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "statement-collate")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    CollateError::Config("Could not determine a config directory".into())
                })?
        };

        Ok(Self { config_dir })
    }

    /// Create CollatePaths with a custom config directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), CollateError> {
        std::fs::create_dir_all(&self.config_dir)
            .map_err(|e| CollateError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
