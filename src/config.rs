//! Configuration handling for the TUI

use crate::auth::DEFAULT_TIMEOUT_SECS;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the server URL
pub const SERVER_URL_ENV: &str = "JOB_PORTAL_SERVER_URL";

/// Default authentication service URL
const DEFAULT_SERVER_URL: &str = "https://job-hunt-3-jqng.onrender.com";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PortalConfig {
    /// Base URL of the authentication service
    pub server_url: Option<String>,
    /// Where the session token is kept between runs
    pub session_file: Option<PathBuf>,
    /// HTTP request timeout
    pub request_timeout_secs: Option<u64>,
}

impl PortalConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("com", "jobportal", "job-portal-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user's config file
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`; a missing file yields the defaults
    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: PortalConfig = serde_json::from_str(&content)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Directory for the log file
    pub fn log_dir() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_dir().join("logs"))
    }

    /// Base URL: environment, then config file, then the default
    pub fn server_url(&self) -> String {
        self.resolve_server_url(std::env::var(SERVER_URL_ENV).ok())
    }

    fn resolve_server_url(&self, env_value: Option<String>) -> String {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string()
    }

    /// Session file path, `None` when no data directory can be determined
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file.clone().or_else(|| {
            Self::project_dirs().map(|dirs| dirs.data_dir().join("session.json"))
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortalConfig::default();
        assert!(config.server_url.is_none());
        assert!(config.session_file.is_none());
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = PortalConfig {
            server_url: Some("http://localhost:5000".to_string()),
            session_file: Some(PathBuf::from("/tmp/session.json")),
            request_timeout_secs: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: PortalConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.server_url, Some("http://localhost:5000".to_string()));
        assert_eq!(
            parsed.session_file,
            Some(PathBuf::from("/tmp/session.json"))
        );
        assert_eq!(parsed.request_timeout_secs, Some(10));
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: PortalConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.server_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"server_url": "http://x", "unknown_field": "value"}"#;
        let parsed: PortalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.server_url, Some("http://x".to_string()));
    }

    #[test]
    fn test_server_url_defaults() {
        let config = PortalConfig::default();
        assert_eq!(config.resolve_server_url(None), DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_server_url_env_beats_file() {
        let config = PortalConfig {
            server_url: Some("http://from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_server_url(Some("http://from-env/".to_string())),
            "http://from-env"
        );
        assert_eq!(
            config.resolve_server_url(Some("  ".to_string())),
            "http://from-file"
        );
    }

    #[test]
    fn test_server_url_trailing_slash_trimmed() {
        let config = PortalConfig {
            server_url: Some("http://localhost:5000//".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_server_url(None), "http://localhost:5000");
    }

    #[test]
    fn test_explicit_session_file_wins() {
        let config = PortalConfig {
            session_file: Some(PathBuf::from("/tmp/custom.json")),
            ..Default::default()
        };
        assert_eq!(config.session_path(), Some(PathBuf::from("/tmp/custom.json")));
    }

    #[test]
    fn test_request_timeout_default() {
        assert_eq!(
            PortalConfig::default().request_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_log_dir_sits_next_to_default_session() {
        let config = PortalConfig::default();
        if let (Some(log_dir), Some(session)) = (PortalConfig::log_dir(), config.session_path()) {
            assert!(log_dir.ends_with("logs"));
            assert_eq!(log_dir.parent(), session.parent());
        }
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PortalConfig::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.server_url.is_none());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"server_url": "http://localhost:5000", "request_timeout_secs": 5}"#)
            .unwrap();

        let config = PortalConfig::load_from(&path).unwrap();
        assert_eq!(config.server_url.as_deref(), Some("http://localhost:5000"));
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(PortalConfig::load_from(&path).is_err());
    }
}
