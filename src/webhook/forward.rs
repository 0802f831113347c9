//! Best-effort forwarding of webhook bodies to a second local server.
//!
//! The outcome is only ever logged. A failed forward never changes the
//! response the webhook sender gets.

use axum::body::Bytes;
use axum::http::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

use crate::config::ForwardConfig;

/// What happened to one forward attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Target answered with a 2xx/3xx status.
    Delivered(StatusCode),
    /// Target answered with an error status.
    Rejected(StatusCode),
    /// Connection, timeout, or protocol failure.
    Failed(String),
    /// Forwarding is switched off.
    Disabled,
}

impl ForwardOutcome {
    pub fn log(&self, url: &str) {
        match self {
            ForwardOutcome::Delivered(status) => {
                tracing::info!(url = %url, status = status.as_u16(), "Forwarded to production server")
            }
            ForwardOutcome::Rejected(status) => {
                tracing::warn!(url = %url, status = status.as_u16(), "Failed to forward: error status")
            }
            ForwardOutcome::Failed(reason) => {
                tracing::warn!(url = %url, error = %reason, "Failed to forward")
            }
            ForwardOutcome::Disabled => tracing::debug!("Forwarding disabled"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    url: Option<String>,
}

impl Forwarder {
    pub fn from_config(config: &ForwardConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(Self {
            client,
            url: config.enabled.then(|| config.url.clone()),
        })
    }

    /// POST the raw body, unmodified, as JSON.
    pub async fn forward(&self, body: Bytes) -> ForwardOutcome {
        let Some(url) = self.url.as_deref() else {
            return ForwardOutcome::Disabled;
        };

        let result = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await;

        let outcome = match result {
            Ok(response) if response.status().is_client_error() || response.status().is_server_error() => {
                ForwardOutcome::Rejected(response.status())
            }
            Ok(response) => ForwardOutcome::Delivered(response.status()),
            Err(e) => ForwardOutcome::Failed(e.to_string()),
        };
        outcome.log(url);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_forwarder_does_nothing() {
        let config = ForwardConfig {
            enabled: false,
            ..ForwardConfig::default()
        };
        let forwarder = Forwarder::from_config(&config).unwrap();
        assert_eq!(forwarder.forward(Bytes::from_static(b"{}")).await, ForwardOutcome::Disabled);
    }

    #[tokio::test]
    async fn unreachable_target_is_failure() {
        let config = ForwardConfig {
            enabled: true,
            url: "http://127.0.0.1:9/webhook/inbound-call".into(),
            timeout_secs: 2,
        };
        let forwarder = Forwarder::from_config(&config).unwrap();
        let outcome = forwarder.forward(Bytes::from_static(b"{}")).await;
        assert!(matches!(outcome, ForwardOutcome::Failed(_)));
    }
}
