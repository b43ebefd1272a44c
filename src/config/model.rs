// src/config/model.rs

//! Configuration structures: the raw TOML sections and the typed runtime
//! form handed to every component. Keeping the two apart means the file
//! format can stay loose (strings, optional tables) while the rest of the
//! daemon only ever sees parsed paths and durations.

use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

/// Fully-typed runtime configuration, passed explicitly into the store,
/// collector, and sink constructors.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub refresh_interval: Duration,
    /// Bytes read per chunk while hashing executables.
    pub hash_chunk_size: usize,
    pub logging: LoggingConfig,
    pub alerts: AlertFlags,
    pub email: EmailConfig,
    pub webhook: WebhookConfig,
}

/// Top-level config as deserialized from TOML. Every section is optional;
/// a missing file yields pure defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub general: GeneralSection,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub alerts: AlertFlags,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub webhook: WebhookSection,
}

/// Raw `[general]` table; durations are humantime strings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    pub database_path: String,
    pub refresh_interval: String,
    pub hash_chunk_size: usize,
}

impl Default for GeneralSection {
    fn default() -> Self {
        GeneralSection {
            database_path: "procwatch.db".into(),
            refresh_interval: "30s".into(),
            hash_chunk_size: 1024,
        }
    }
}

/// Mirror of the `[logging]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write the log stream to a file.
    pub enable: bool,
    pub file: Option<String>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { enable: true, file: None, level: "INFO".into() }
    }
}

/// Which delivery channels are enabled for a cycle's alerts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertFlags {
    pub syslog: bool,
    pub email: bool,
    pub webhook: bool,
}

impl Default for AlertFlags {
    fn default() -> Self {
        AlertFlags { syslog: true, email: false, webhook: false }
    }
}

/// Mirror of the `[email]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub subject_prefix: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub destination: String,
    pub use_tls: bool,
}

impl Default for EmailConfig {
    fn default() -> Self {
        EmailConfig {
            subject_prefix: "procwatch".into(),
            smtp_server: "localhost".into(),
            smtp_port: 25,
            username: String::new(),
            password: String::new(),
            sender: "root@localhost".into(),
            destination: "root@localhost".into(),
            use_tls: false,
        }
    }
}

/// Raw `[webhook]` table.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WebhookSection {
    pub endpoint: String,
    pub timeout: String,
}

impl Default for WebhookSection {
    fn default() -> Self {
        WebhookSection { endpoint: String::new(), timeout: "5s".into() }
    }
}

/// Typed webhook settings.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub endpoint: String,
    pub timeout: Duration,
}

/// All the ways config loading can go wrong.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid duration '{0}': {1}")]
    InvalidDuration(String, #[source] humantime::DurationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
