// src/config/mod.rs
//! Runtime configuration: raw TOML sections plus the typed form.

pub mod loader;
pub mod model;

pub use loader::load_config;
pub use model::{AlertFlags, Config, ConfigError, EmailConfig, LoggingConfig, WebhookConfig};
