// src/alert/mod.rs

//! Alert values and best-effort delivery sinks.
//!
//! Each enabled sink independently formats the cycle's alerts into a
//! one-line-per-alert digest and attempts exactly one delivery. Nothing
//! retries, queues, or escalates: a failed delivery is logged and the
//! cycle moves on.

pub mod email;
pub mod syslog;
pub mod webhook;

pub use self::email::EmailSink;
pub use self::syslog::SyslogSink;
pub use self::webhook::WebhookSink;

use crate::config::Config;
use std::fmt::{self, Write as _};
use thiserror::Error;

/// A detected suspicious event. Value object: no identity beyond its
/// fields, no deduplication or acknowledgment state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub pid: u32,
    pub name: String,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) {}", self.name, self.pid, self.message)
    }
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[cfg(unix)]
    #[error("syslog delivery failed: {0}")]
    Syslog(#[from] ::syslog::Error),

    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("mail assembly failed: {0}")]
    Mail(#[from] lettre::error::Error),

    #[error("SMTP delivery failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    UnexpectedStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// One delivery channel for a cycle's alerts.
pub trait AlertSink {
    fn name(&self) -> &'static str;
    fn deliver(&mut self, alerts: &[Alert]) -> Result<(), SinkError>;
}

/// Format the batch as one `name(pid) message` line per alert.
pub fn render_digest(alerts: &[Alert]) -> String {
    let mut text = String::new();
    for alert in alerts {
        let _ = writeln!(text, "{alert}");
    }
    text
}

/// Hand the cycle's alerts to every sink; each sink's failure is logged
/// and swallowed independently of the others.
pub fn dispatch(sinks: &mut [Box<dyn AlertSink>], alerts: &[Alert]) {
    for sink in sinks.iter_mut() {
        if let Err(e) = sink.deliver(alerts) {
            log::error!("{} alert delivery failed: {}", sink.name(), e);
        }
    }
}

/// Instantiate the sinks enabled in configuration.
pub fn build_sinks(config: &Config) -> Vec<Box<dyn AlertSink>> {
    let mut sinks: Vec<Box<dyn AlertSink>> = Vec::new();
    if config.alerts.syslog {
        sinks.push(Box::new(SyslogSink::probe()));
    }
    if config.alerts.email {
        sinks.push(Box::new(EmailSink::new(config.email.clone())));
    }
    if config.alerts.webhook {
        match WebhookSink::new(&config.webhook) {
            Ok(sink) => sinks.push(Box::new(sink)),
            Err(e) => log::error!("Webhook sink disabled: {}", e),
        }
    }
    sinks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Alert {
        Alert {
            pid: 42,
            name: "bash".into(),
            path: "/usr/bin/bash".into(),
            message: "Process does not have executable on disk.".into(),
        }
    }

    #[test]
    fn renders_like_a_process_listing() {
        assert_eq!(
            sample().to_string(),
            "bash(42) Process does not have executable on disk."
        );
    }

    #[test]
    fn digest_is_one_line_per_alert() {
        let digest = render_digest(&[sample(), sample()]);
        assert_eq!(digest.lines().count(), 2);
        assert!(digest.ends_with('\n'));
    }
}
