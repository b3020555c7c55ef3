//! Configuration file storage (`config.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use boardroom_core::config::AppConfig;
use boardroom_core::error::{BoardroomError, Result};

/// Read-only access to `config.toml`.
///
/// A missing or empty file yields the default configuration.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(
                "[ConfigStorage] No config at '{}', using defaults",
                self.path.display()
            );
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            BoardroomError::io(format!(
                "Failed to read config '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        let config: AppConfig = toml::from_str(&content).map_err(|e| {
            BoardroomError::config(format!(
                "Invalid config '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(config)
    }
}
