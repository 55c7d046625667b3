//! Outbound client for the external inference endpoint

use std::sync::Arc;
use std::time::Duration;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::adapter::{adapter_for, ResponseAdapter};
use crate::core::config::RelayConfig;
use crate::core::errors::{RelayError, Result};

/// Forwards text to the configured inference endpoint and normalizes the reply
#[derive(Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: Arc<RelayConfig>,
    adapter: Arc<dyn ResponseAdapter>,
}

impl RelayClient {
    /// Create a new relay client
    pub fn new(config: Arc<RelayConfig>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .pool_max_idle_per_host(10)
            .build()?;

        let adapter: Arc<dyn ResponseAdapter> = Arc::from(adapter_for(config.backend));

        Ok(Self {
            client,
            config,
            adapter,
        })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Translate a single text through the external endpoint
    pub async fn translate(&self, text: &str) -> Result<String> {
        let url = self.config.inference_url()?;

        info!("Translating: {:?} via {}", text, url);

        let mut request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&self.adapter.request_body(text));

        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            let message = upstream_message(status.as_u16(), &body);
            warn!("Upstream returned {}: {}", status, message);
            return Err(RelayError::Upstream {
                status: Some(status.as_u16()),
                message,
            });
        }

        // Non-JSON bodies are kept as a string and fall through to serialization.
        let data = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
        debug!("Upstream response: {}", data);

        Ok(self.adapter.normalize(&data))
    }

    fn transport_error(&self, err: reqwest::Error) -> RelayError {
        if err.is_timeout() {
            RelayError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else {
            RelayError::Upstream {
                status: err.status().map(|s| s.as_u16()),
                message: err.to_string(),
            }
        }
    }
}

/// Most specific error message available from an upstream error body.
///
/// Looks at `error` (or `error.message`), then `message`, then falls back
/// to a generic description of the status.
pub fn upstream_message(status: u16, body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();

    parsed
        .as_ref()
        .and_then(|data| {
            let error = data.get("error");
            error
                .and_then(Value::as_str)
                .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
                .or_else(|| data.get("message").and_then(Value::as_str))
        })
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}
