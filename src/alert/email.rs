// src/alert/email.rs

//! SMTP delivery of alert digests.
//!
//! One message per cycle containing every alert line. The relay connection
//! is opened per delivery and closed again; refusal or authentication
//! failure surfaces as a `SinkError` for the dispatcher to log.

use super::{Alert, AlertSink, SinkError, render_digest};
use crate::config::EmailConfig;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

pub struct EmailSink {
    config: EmailConfig,
}

impl EmailSink {
    pub fn new(config: EmailConfig) -> Self {
        EmailSink { config }
    }

    fn transport(&self) -> Result<SmtpTransport, SinkError> {
        let builder = if self.config.use_tls {
            SmtpTransport::relay(&self.config.smtp_server)?
        } else {
            SmtpTransport::builder_dangerous(self.config.smtp_server.as_str())
        };
        let mut builder = builder.port(self.config.smtp_port);
        if !self.config.username.is_empty() && !self.config.password.is_empty() {
            builder = builder.credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ));
        }
        Ok(builder.build())
    }
}

impl AlertSink for EmailSink {
    fn name(&self) -> &'static str {
        "email"
    }

    fn deliver(&mut self, alerts: &[Alert]) -> Result<(), SinkError> {
        let message = Message::builder()
            .from(self.config.sender.parse::<Mailbox>()?)
            .to(self.config.destination.parse::<Mailbox>()?)
            .subject(format!(
                "ProcWatch - {} - Suspicious Process Alerts",
                self.config.subject_prefix
            ))
            .body(render_digest(alerts))?;
        self.transport()?.send(&message)?;
        Ok(())
    }
}
