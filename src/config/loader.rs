// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads a TOML file into `ConfigFile` and resolves it into the typed
//! `Config`. Without an explicit `--config` path the loader probes
//! `/etc/procwatch.toml` then `./procwatch.toml`; if neither exists the
//! daemon runs on defaults, like any freshly-installed agent should.

use crate::config::model::{Config, ConfigError, ConfigFile, WebhookConfig};
use std::{fs, path::Path, path::PathBuf, time::Duration};

const DEFAULT_LOCATIONS: [&str; 2] = ["/etc/procwatch.toml", "procwatch.toml"];

/// Load and resolve the configuration. An explicit path must be readable;
/// the default locations are probed and may all be absent.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match explicit {
        Some(path) => parse_file(path)?,
        None => match DEFAULT_LOCATIONS.iter().map(Path::new).find(|p| p.exists()) {
            Some(path) => parse_file(path)?,
            None => ConfigFile::default(),
        },
    };
    resolve(file)
}

fn parse_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    log::debug!("Reading config from {:?}", path);
    let txt = fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&txt)?;
    log::info!("Loaded config from {:?}", path);
    Ok(file)
}

/// Convert the raw sections into runtime types.
fn resolve(file: ConfigFile) -> Result<Config, ConfigError> {
    Ok(Config {
        database_path: PathBuf::from(file.general.database_path),
        refresh_interval: parse_duration(&file.general.refresh_interval)?,
        hash_chunk_size: file.general.hash_chunk_size,
        logging: file.logging,
        alerts: file.alerts,
        email: file.email,
        webhook: WebhookConfig {
            endpoint: file.webhook.endpoint,
            timeout: parse_duration(&file.webhook.timeout)?,
        },
    })
}

fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(text).map_err(|e| ConfigError::InvalidDuration(text.to_string(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_resolves_to_defaults() {
        let cfg = resolve(ConfigFile::default()).unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("procwatch.db"));
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.hash_chunk_size, 1024);
        assert!(cfg.alerts.syslog);
        assert!(!cfg.alerts.email);
        assert!(!cfg.alerts.webhook);
        assert_eq!(cfg.webhook.timeout, Duration::from_secs(5));
    }

    #[test]
    fn full_file_parses() {
        let toml = r#"
            [general]
            database_path = "/var/lib/procwatch/history.db"
            refresh_interval = "2m"
            hash_chunk_size = 65536

            [logging]
            enable = false
            level = "DEBUG"

            [alerts]
            syslog = false
            webhook = true

            [webhook]
            endpoint = "https://hooks.example.com/procwatch"
            timeout = "10s"
        "#;
        let file: ConfigFile = toml::from_str(toml).unwrap();
        let cfg = resolve(file).unwrap();
        assert_eq!(cfg.database_path, PathBuf::from("/var/lib/procwatch/history.db"));
        assert_eq!(cfg.refresh_interval, Duration::from_secs(120));
        assert_eq!(cfg.hash_chunk_size, 65536);
        assert_eq!(cfg.logging.level, "DEBUG");
        assert!(!cfg.alerts.syslog);
        assert!(cfg.alerts.webhook);
        assert_eq!(cfg.webhook.endpoint, "https://hooks.example.com/procwatch");
        assert_eq!(cfg.webhook.timeout, Duration::from_secs(10));
    }

    #[test]
    fn bad_duration_is_rejected() {
        let file: ConfigFile =
            toml::from_str("[general]\nrefresh_interval = \"soon\"\n").unwrap();
        match resolve(file) {
            Err(ConfigError::InvalidDuration(text, _)) => assert_eq!(text, "soon"),
            other => panic!("expected InvalidDuration, got {:?}", other),
        }
    }
}
