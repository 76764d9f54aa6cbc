use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::error::InboxError;

/// Default remote API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.siddz.com/compt";

/// Inbox engine configuration
///
/// Always passed explicitly to constructors; there is no process-wide
/// config singleton, so tests and multiple instances can point at
/// distinct endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboxConfig {
    /// Base URL of the remote message API, without the trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Overall request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl InboxConfig {
    /// Full URL of the message list endpoint
    pub fn emails_url(&self) -> String {
        format!("{}/emails/", self.base_url.trim_end_matches('/'))
    }

    /// Load configuration from the first default path that exists
    ///
    /// Falls back to defaults when no config file is present.
    pub fn load() -> Result<Self, InboxError> {
        for path in default_config_paths() {
            if path.exists() {
                info!("Found config at: {:?}", path);
                return Self::load_from_path(&path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, InboxError> {
        info!("Loading configuration from: {:?}", path);

        let content = fs::read_to_string(path)
            .map_err(|e| InboxError::Config(format!("Failed to read config: {}", e)))?;

        let config: InboxConfig = toml::from_str(&content)
            .map_err(|e| InboxError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}

/// Get default config paths
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // XDG config path
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("compos").join("inbox.toml"));
    }

    // Home directory fallback
    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".config").join("compos").join("inbox.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_production_endpoint() {
        let config = InboxConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_emails_url_joins_without_double_slash() {
        let config = InboxConfig {
            base_url: "http://localhost:8000/".into(),
            ..InboxConfig::default()
        };
        assert_eq!(config.emails_url(), "http://localhost:8000/emails/");

        let config = InboxConfig {
            base_url: "http://localhost:8000".into(),
            ..InboxConfig::default()
        };
        assert_eq!(config.emails_url(), "http://localhost:8000/emails/");
    }

    #[test]
    fn test_parse_partial_toml_fills_defaults() {
        let config: InboxConfig = toml::from_str(r#"base_url = "http://127.0.0.1:9000""#).unwrap();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_parse_empty_toml_is_all_defaults() {
        let config: InboxConfig = toml::from_str("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_from_missing_path_is_config_error() {
        let result = InboxConfig::load_from_path(Path::new("/nonexistent/compos/inbox.toml"));
        match result {
            Err(InboxError::Config(msg)) => assert!(msg.contains("Failed to read config")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_from_malformed_file_is_config_error() {
        let tmp = tempfile::Builder::new()
            .prefix("compos-config")
            .tempdir()
            .expect("tempdir");
        let path = tmp.path().join("inbox.toml");
        fs::write(&path, "base_url = [not toml").expect("write config");

        let result = InboxConfig::load_from_path(&path);
        match result {
            Err(InboxError::Config(msg)) => assert!(msg.contains("Failed to parse config")),
            other => panic!("expected config error, got {:?}", other),
        }
    }
}
