//! Configuration management for Trimlink
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file. A missing configuration file is not an error; the
//! defaults point at a local development server.

use crate::error::{Result, TrimlinkError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Main configuration structure for Trimlink
///
/// Holds everything the client needs: where the shortening service lives
/// and how the authenticated session is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the shortening service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Session persistence configuration
///
/// The session (access/refresh token pair) is stored as a single record
/// under a well-known key. The `keyring` backend uses the OS credential
/// store; the `memory` backend keeps the record for the process lifetime
/// only and exists for tests and throwaway environments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Storage backend: "keyring" or "memory"
    #[serde(default = "default_session_backend")]
    pub backend: String,

    /// Service name under which the session record is stored
    #[serde(default = "default_session_service")]
    pub service: String,
}

fn default_session_backend() -> String {
    "keyring".to_string()
}

fn default_session_service() -> String {
    "trimlink".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: default_session_backend(),
            service: default_session_service(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Returns the defaults when the file does not exist, so a fresh
    /// install works without any setup.
    ///
    /// # Errors
    ///
    /// Returns [`TrimlinkError::Io`] if the file exists but cannot be read,
    /// or [`TrimlinkError::Yaml`] if it is not valid YAML.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimlink::config::Config;
    ///
    /// let config = Config::load(std::path::Path::new("does-not-exist.yaml")).unwrap();
    /// assert_eq!(config.api.base_url, "http://localhost:5000/");
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(TrimlinkError::Io)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(TrimlinkError::Yaml)?;
        Ok(config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TrimlinkError::Config`] when the base URL does not parse,
    /// the timeout is zero, or the session backend is unknown.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.api.base_url).map_err(|e| {
            TrimlinkError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(TrimlinkError::Config(
                "api.timeout_seconds must be greater than zero".to_string(),
            )
            .into());
        }

        match self.session.backend.as_str() {
            "keyring" | "memory" => Ok(()),
            other => Err(TrimlinkError::Config(format!(
                "unknown session.backend '{}' (expected 'keyring' or 'memory')",
                other
            ))
            .into()),
        }
    }

    /// The default configuration file location: `trimlink.yaml` in the
    /// platform config directory, or the working directory when no home
    /// directory can be determined.
    pub fn default_path() -> PathBuf {
        match ProjectDirs::from("", "", "trimlink") {
            Some(dirs) => dirs.config_dir().join("trimlink.yaml"),
            None => PathBuf::from("trimlink.yaml"),
        }
    }

    /// Parse the configured base URL, normalising it to end with a slash so
    /// endpoint paths join below it instead of replacing its last segment.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.api.base_url).map_err(|e| {
            TrimlinkError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
