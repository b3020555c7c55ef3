//! Secret configuration file storage.
//!
//! Loads `secret.json` (`{"claude": {"api_key": "..."}}`). The file is only
//! read, never written.
//!
//! # Security Note
//!
//! The file holds plaintext keys and should have permissions 600.

use std::fs;
use std::path::{Path, PathBuf};

use boardroom_core::config::SecretConfig;
use boardroom_core::error::{BoardroomError, Result};

/// Environment variable holding the server-side Claude API key.
pub const API_KEY_ENV: &str = "CLAUDE_API_KEY";

pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `Ok(None)` when the file does not exist.
    pub fn load(&self) -> Result<Option<SecretConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let config: SecretConfig = serde_json::from_str(&content).map_err(|e| {
            BoardroomError::config(format!(
                "Invalid secret file '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        Ok(Some(config))
    }

    /// Resolves the server-side API key.
    ///
    /// A non-empty `env_value` (normally `CLAUDE_API_KEY`) wins over the key
    /// in `secret.json`. An unreadable secret file is logged and ignored.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        if let Some(key) = env_value.filter(|key| !key.trim().is_empty()) {
            return Some(key);
        }

        match self.load() {
            Ok(Some(config)) => config.claude_api_key().map(str::to_string),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[SecretStorage] {}", e);
                None
            }
        }
    }

    /// Resolves the key from the process environment and the secret file.
    pub fn server_api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::new(temp_dir.path().join("secret.json"));
        assert!(storage.load().unwrap().is_none());
        assert!(storage.resolve_api_key(None).is_none());
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"claude": {"api_key": "sk-file"}}"#).unwrap();

        let storage = SecretStorage::new(path);
        assert_eq!(storage.resolve_api_key(None).as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_env_value_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"claude": {"api_key": "sk-file"}}"#).unwrap();

        let storage = SecretStorage::new(path);
        assert_eq!(
            storage.resolve_api_key(Some("sk-env".to_string())).as_deref(),
            Some("sk-env")
        );
        assert_eq!(
            storage.resolve_api_key(Some(String::new())).as_deref(),
            Some("sk-file")
        );
    }

    #[test]
    fn test_invalid_json_is_ignored_when_resolving() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{ invalid json").unwrap();

        let storage = SecretStorage::new(path);
        assert!(storage.load().is_err());
        assert!(storage.resolve_api_key(None).is_none());
    }
}
