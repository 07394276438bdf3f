//! Configuration module for mediabin.

use serde::Deserialize;
use std::path::Path;

use crate::{MediabinError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Storage configuration: where uploads and the two JSON stores live.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory uploaded binaries are written to.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Path to the JSON credential store.
    #[serde(default = "default_users_file")]
    pub users_file: String,
    /// Path to the JSON media metadata store.
    #[serde(default = "default_comments_file")]
    pub comments_file: String,
}

fn default_upload_dir() -> String {
    "public/uploads".to_string()
}

fn default_users_file() -> String {
    "data/users.json".to_string()
}

fn default_comments_file() -> String {
    "data/comments.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            users_file: default_users_file(),
            comments_file: default_comments_file(),
        }
    }
}

/// Web configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    /// Directory the static HTML pages and assets are served from.
    #[serde(default = "default_static_path")]
    pub static_path: String,
}

fn default_static_path() -> String {
    "public".to_string()
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            static_path: default_static_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/mediabin.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Web settings.
    #[serde(default)]
    pub web: WebConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MediabinError::Io)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MediabinError::Config(format!("config parse error: {e}")))
    }
}
