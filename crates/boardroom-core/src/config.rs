//! Application configuration models.
//!
//! Loaded from `config.toml`; every section and field is optional and falls
//! back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::meeting::DEFAULT_MAX_STORED_MEETINGS;

/// Model requested from the completion API unless configured otherwise.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Reply length cap sent with every completion request.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Completion API endpoint.
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.anthropic.com/v1/messages";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3001";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub relay: RelayConfig,
    pub meeting: MeetingConfig,
    pub storage: StorageConfig,
}

/// `[relay]` section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct RelayConfig {
    pub listen_addr: String,
    pub model: String,
    pub max_tokens: u32,
    pub upstream_url: String,
    /// No timeout is applied when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            request_timeout_secs: None,
        }
    }
}

/// `[meeting]` section.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct MeetingConfig {
    pub max_stored_meetings: usize,
}

impl Default for MeetingConfig {
    fn default() -> Self {
        Self {
            max_stored_meetings: DEFAULT_MAX_STORED_MEETINGS,
        }
    }
}

/// `[storage]` section.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Byte quota of the snapshot file. Unlimited when unset.
    pub snapshot_quota_bytes: Option<usize>,
}

/// Claude API credentials from `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClaudeConfig {
    pub api_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Contents of `secret.json`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretConfig {
    #[serde(default)]
    pub claude: Option<ClaudeConfig>,
}

impl SecretConfig {
    /// Returns the Claude API key when one is set and non-empty.
    pub fn claude_api_key(&self) -> Option<&str> {
        self.claude
            .as_ref()
            .map(|claude| claude.api_key.trim())
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.relay.max_tokens, 1000);
        assert_eq!(config.meeting.max_stored_meetings, 50);
        assert!(config.relay.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [relay]
            request_timeout_secs = 30

            [storage]
            snapshot_quota_bytes = 5242880
            "#,
        )
        .unwrap();

        assert_eq!(config.relay.request_timeout_secs, Some(30));
        assert_eq!(config.relay.model, DEFAULT_MODEL);
        assert_eq!(config.storage.snapshot_quota_bytes, Some(5 * 1024 * 1024));
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let secret: SecretConfig =
            serde_json::from_str(r#"{"claude": {"api_key": "  "}}"#).unwrap();
        assert!(secret.claude_api_key().is_none());

        let secret: SecretConfig =
            serde_json::from_str(r#"{"claude": {"api_key": "sk-test"}}"#).unwrap();
        assert_eq!(secret.claude_api_key(), Some("sk-test"));
    }
}
