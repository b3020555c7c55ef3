//! Wiring of the file-backed stores, configuration and state manager.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use boardroom_core::config::AppConfig;
use boardroom_infrastructure::{
    BoardroomPaths, BoundedSnapshotStore, ConfigStorage, FileDocumentStore, FileTextSlot,
    SecretStorage,
};

use crate::state_manager::AppStateManager;

#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Roots config and data under this directory instead of the platform
    /// defaults.
    pub base_dir: Option<PathBuf>,
}

/// Everything a front end needs, loaded from disk.
pub struct Bootstrap {
    pub paths: BoardroomPaths,
    pub config: AppConfig,
    pub secrets: SecretStorage,
    pub state_manager: Arc<AppStateManager>,
}

impl Bootstrap {
    /// Resolves paths, reads `config.toml`, opens both stores and loads the
    /// saved state.
    pub async fn load(options: BootstrapOptions) -> Result<Self> {
        let paths = BoardroomPaths::resolve(options.base_dir.as_deref())
            .context("Failed to resolve boardroom directories")?;
        tracing::info!("[Bootstrap] Config dir: {}", paths.config_dir().display());
        tracing::info!("[Bootstrap] Data dir: {}", paths.data_dir().display());

        let config = ConfigStorage::new(paths.config_file())
            .load()
            .context("Failed to load config.toml")?;

        let slot = FileTextSlot::new(paths.snapshot_file())
            .with_quota(config.storage.snapshot_quota_bytes);
        let snapshot_store = Arc::new(BoundedSnapshotStore::new(slot));
        let content_store = Arc::new(
            FileDocumentStore::with_app_paths(paths.app_paths())
                .await
                .context("Failed to create document store")?,
        );

        let state_manager = Arc::new(AppStateManager::new(snapshot_store, content_store));
        state_manager.initialize();
        state_manager
            .open_content_store()
            .await
            .context("Failed to open document store")?;

        let secrets = SecretStorage::new(paths.secret_file());

        Ok(Self {
            paths,
            config,
            secrets,
            state_manager,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boardroom_core::advisor::AdvisorDraft;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_bootstrap_under_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let options = BootstrapOptions {
            base_dir: Some(temp_dir.path().to_path_buf()),
        };

        let first = Bootstrap::load(options.clone()).await.unwrap();
        assert_eq!(first.config, AppConfig::default());
        assert!(first.paths.documents_dir().exists());
        let advisor = first
            .state_manager
            .create_advisor(AdvisorDraft::new("Ada", "CTO"))
            .unwrap();

        let second = Bootstrap::load(options).await.unwrap();
        assert!(second.state_manager.state().find_advisor(&advisor.id).is_some());
    }
}
