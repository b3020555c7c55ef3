//! Path management for boardroom configuration and data files.
//!
//! Default locations are resolved via `AppPaths` from the version-migrate
//! crate. Every path can be re-rooted under a base directory for tests and
//! portable installs.

use std::path::{Path, PathBuf};

use boardroom_core::error::{BoardroomError, Result};
use version_migrate::{AppPaths, PathStrategy};

use crate::storage::DOCUMENTS_DOMAIN;

const APP_NAME: &str = "boardroom";

/// Resolves every file and directory the application uses.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/boardroom/          # Config directory
/// ├── config.toml               # Application configuration
/// ├── secret.json               # API keys
/// └── logs/                     # Application logs
///     └── boardroom.log.YYYY-MM-DD
///
/// ~/.local/share/boardroom/     # Data directory
/// ├── snapshot.json             # Application state snapshot
/// └── documents/                # Document content records
///     └── <id>.json
/// ```
///
/// With a base directory, the config directory becomes `<base>/boardroom`
/// and the data directory `<base>/data/boardroom`.
#[derive(Debug, Clone)]
pub struct BoardroomPaths {
    app_paths: AppPaths,
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl BoardroomPaths {
    /// Resolves the platform default directories.
    pub fn new() -> Result<Self> {
        Self::from_app_paths(AppPaths::new(APP_NAME))
    }

    /// Roots every path under `base`.
    pub fn with_base(base: &Path) -> Result<Self> {
        let base = base.to_path_buf();
        Self::from_app_paths(
            AppPaths::new(APP_NAME)
                .config_strategy(PathStrategy::CustomBase(base.clone()))
                .data_strategy(PathStrategy::CustomBase(base)),
        )
    }

    /// Uses `base` when given, the platform defaults otherwise.
    pub fn resolve(base: Option<&Path>) -> Result<Self> {
        match base {
            Some(base) => Self::with_base(base),
            None => Self::new(),
        }
    }

    /// Creates the config and data directories if needed.
    fn from_app_paths(app_paths: AppPaths) -> Result<Self> {
        let config_dir = app_paths
            .config_dir()
            .map_err(|e| BoardroomError::config(format!("Cannot prepare config directory: {}", e)))?;
        let data_dir = app_paths
            .data_dir()
            .map_err(|e| BoardroomError::config(format!("Cannot prepare data directory: {}", e)))?;

        Ok(Self {
            app_paths,
            config_dir,
            data_dir,
        })
    }

    /// The `AppPaths` the directory-backed stores resolve against.
    pub fn app_paths(&self) -> AppPaths {
        self.app_paths.clone()
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to `secret.json`. Keep it readable by the owner only.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.config_dir.join("logs")
    }

    pub fn snapshot_file(&self) -> PathBuf {
        self.data_dir.join("snapshot.json")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join(DOCUMENTS_DOMAIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FileDocumentStore;
    use tempfile::TempDir;

    #[test]
    fn test_base_override() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let paths = BoardroomPaths::with_base(base).unwrap();

        assert_eq!(paths.config_file(), base.join("boardroom/config.toml"));
        assert_eq!(paths.secret_file(), base.join("boardroom/secret.json"));
        assert_eq!(paths.snapshot_file(), base.join("data/boardroom/snapshot.json"));
        assert_eq!(paths.documents_dir(), base.join("data/boardroom/documents"));
        assert!(paths.config_dir().is_dir());
        assert!(paths.data_dir().is_dir());
    }

    #[tokio::test]
    async fn test_document_store_lands_in_documents_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BoardroomPaths::with_base(temp_dir.path()).unwrap();

        let store = FileDocumentStore::with_app_paths(paths.app_paths()).await.unwrap();
        assert_eq!(store.dir(), paths.documents_dir());
    }
}
