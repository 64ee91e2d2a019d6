//! Configuration for the auth module.
//!
//! Loads configuration from ${SMARTBOOK_AUTH_HOME}/config.toml with sensible
//! defaults. The embedding app shell decides where the home directory lives.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Production API host. Overridable for tests and staging.
pub const DEFAULT_BASE_URL: &str = "https://smart-book.net/";

/// Default debounce window for field revalidation after an edit.
pub const DEFAULT_VALIDATION_DEBOUNCE_MS: u64 = 500;

/// Default cap on automatic submit attempts (initial call + retries).
pub const DEFAULT_MAX_SUBMIT_ATTEMPTS: u32 = 3;

/// Auth module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the authentication API.
    pub base_url: String,
    /// Milliseconds to wait after the last edit before revalidating a field.
    pub validation_debounce_ms: u64,
    /// How many times a failed login/registration call is issued before the
    /// form re-enables. `1` disables automatic retry.
    pub max_submit_attempts: u32,
    /// Optional per-request timeout. The server contract has none; unset
    /// means requests may wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            validation_debounce_ms: DEFAULT_VALIDATION_DEBOUNCE_MS,
            max_submit_attempts: DEFAULT_MAX_SUBMIT_ATTEMPTS,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }
}

/// Resolves the auth module home directory.
///
/// `SMARTBOOK_AUTH_HOME` wins; otherwise `~/.smartbook-auth`.
pub fn home_dir() -> PathBuf {
    if let Ok(home) = std::env::var("SMARTBOOK_AUTH_HOME") {
        return PathBuf::from(home);
    }
    let user_home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(user_home).join(".smartbook-auth")
}

/// Path of the config file inside the home directory.
pub fn config_path() -> PathBuf {
    home_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.validation_debounce_ms, 500);
        assert_eq!(config.max_submit_attempts, 3);
        assert!(config.request_timeout_secs.is_none());
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://localhost:9999/\"").unwrap();
        writeln!(file, "max_submit_attempts = 1").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://localhost:9999/");
        assert_eq!(config.max_submit_attempts, 1);
        assert_eq!(config.validation_debounce_ms, 500);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
