// src/alert/webhook.rs

//! HTTP webhook delivery.
//!
//! POSTs `{"text": <digest>}` to the configured endpoint with a bounded
//! timeout so a hung remote cannot stall the cycle loop.

use super::{Alert, AlertSink, SinkError, render_digest};
use crate::config::WebhookConfig;

pub struct WebhookSink {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl WebhookSink {
    pub fn new(config: &WebhookConfig) -> Result<Self, SinkError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(WebhookSink {
            endpoint: config.endpoint.clone(),
            client,
        })
    }
}

impl AlertSink for WebhookSink {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn deliver(&mut self, alerts: &[Alert]) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "text": render_digest(alerts) }))
            .send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SinkError::UnexpectedStatus {
                status,
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }
}
