// src/alert/syslog.rs

//! System-log delivery with an application-log fallback.
//!
//! The backend is probed once at startup: on Unix hosts with a reachable
//! system logger every alert goes out as a daemon-facility warning; where
//! the system logger is missing (or on other platforms) the alerts land in
//! the application log instead.

use super::{Alert, AlertSink, SinkError};

#[cfg(unix)]
use syslog::{Facility, Formatter3164, LoggerBackend};

enum Backend {
    #[cfg(unix)]
    Native(syslog::Logger<LoggerBackend, Formatter3164>),
    Fallback,
}

pub struct SyslogSink {
    backend: Backend,
}

impl SyslogSink {
    /// Probe the platform for a system logger and pick the backend.
    pub fn probe() -> Self {
        #[cfg(unix)]
        {
            let formatter = Formatter3164 {
                facility: Facility::LOG_DAEMON,
                hostname: None,
                process: "procwatch".into(),
                pid: std::process::id(),
            };
            match syslog::unix(formatter) {
                Ok(logger) => {
                    return SyslogSink {
                        backend: Backend::Native(logger),
                    };
                }
                Err(e) => log::warn!(
                    "System log unavailable ({}); alerts will go to the application log",
                    e
                ),
            }
        }
        SyslogSink {
            backend: Backend::Fallback,
        }
    }
}

impl AlertSink for SyslogSink {
    fn name(&self) -> &'static str {
        "syslog"
    }

    fn deliver(&mut self, alerts: &[Alert]) -> Result<(), SinkError> {
        match &mut self.backend {
            #[cfg(unix)]
            Backend::Native(logger) => {
                for alert in alerts {
                    logger.warning(format!("procwatch alert: {alert}"))?;
                }
            }
            Backend::Fallback => {
                for alert in alerts {
                    log::warn!("procwatch alert: {alert}");
                }
            }
        }
        Ok(())
    }
}
