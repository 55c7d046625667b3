//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::core::errors::{RelayError, Result};
use crate::core::models::InferenceBackend;

/// Model served by the hosted inference API unless overridden
pub const DEFAULT_MODEL_ID: &str = "williampepple1/ibani-translator";

/// Base URL of the hosted inference API
pub const DEFAULT_HOSTED_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Configuration for the relay, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub host: String,
    pub port: u16,
    pub access_token: Option<String>,
    pub model_id: String,
    pub hosted_base_url: String,
    pub custom_inference_url: Option<String>,
    pub backend: InferenceBackend,
    pub allowed_origins: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            access_token: None,
            model_id: DEFAULT_MODEL_ID.to_string(),
            hosted_base_url: DEFAULT_HOSTED_BASE_URL.to_string(),
            custom_inference_url: None,
            backend: InferenceBackend::Hosted,
            allowed_origins: vec!["*".to_string()],
            timeout_ms: 30000,
        }
    }
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_vars<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let host = var("HOST").unwrap_or(defaults.host);

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("invalid PORT {:?}: {}", port, e))?,
            None => defaults.port,
        };

        let timeout_ms = match var("REQUEST_TIMEOUT_MS") {
            Some(timeout) => timeout
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("invalid REQUEST_TIMEOUT_MS {:?}: {}", timeout, e))?,
            None => defaults.timeout_ms,
        };

        let custom_inference_url = var("CUSTOM_INFERENCE_URL");

        let explicit_backend = var("INFERENCE_BACKEND")
            .map(|name| name.parse::<InferenceBackend>())
            .transpose()
            .map_err(anyhow::Error::msg)?;
        let backend = select_backend(explicit_backend, custom_inference_url.as_deref());

        let allowed_origins = match var("ALLOWED_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            None => defaults.allowed_origins,
        };

        let config = Self {
            host,
            port,
            access_token: var("HUGGING_FACE_ACCESS_TOKEN"),
            model_id: var("MODEL_ID").unwrap_or(defaults.model_id),
            hosted_base_url: var("HOSTED_INFERENCE_BASE_URL").unwrap_or(defaults.hosted_base_url),
            custom_inference_url,
            backend,
            allowed_origins,
            timeout_ms,
        };
        config.validate()?;

        info!(
            "Loaded configuration: backend={}, model={}",
            config.backend, config.model_id
        );

        Ok(config)
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: serde_json::Value = serde_json::from_str(&content)?;
        let explicit_backend = raw
            .get("backend")
            .map(|backend| serde_json::from_value::<InferenceBackend>(backend.clone()))
            .transpose()?;

        let mut config: Self = serde_json::from_value(raw)?;
        config.custom_inference_url = config
            .custom_inference_url
            .filter(|url| !url.trim().is_empty());
        config.backend = select_backend(explicit_backend, config.custom_inference_url.as_deref());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.port == 0 {
            return Err(anyhow::anyhow!("port must be greater than 0"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        if self.model_id.trim().is_empty() {
            return Err(anyhow::anyhow!("model id is required"));
        }

        if self.hosted_base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("hosted inference base URL is required"));
        }

        if let Some(origin) = self
            .allowed_origins
            .iter()
            .find(|o| {
                o.trim().trim_end_matches('/').is_empty() || o.chars().any(char::is_whitespace)
            })
        {
            return Err(anyhow::anyhow!("invalid allowed origin: {:?}", origin));
        }

        // Requests fail with a configuration error until the URL is provided.
        if self.backend == InferenceBackend::Custom && self.custom_inference_url.is_none() {
            warn!("Custom inference backend selected but CUSTOM_INFERENCE_URL is not set");
        }

        if self.backend == InferenceBackend::Hosted && self.access_token.is_none() {
            warn!("HUGGING_FACE_ACCESS_TOKEN is not set; requests are sent unauthenticated");
        }

        Ok(())
    }

    /// Whether a self-hosted endpoint is selected and has a URL
    pub fn uses_custom_inference(&self) -> bool {
        self.backend == InferenceBackend::Custom && self.custom_inference_url.is_some()
    }

    /// Resolve the URL the relay forwards to
    pub fn inference_url(&self) -> Result<String> {
        match self.backend {
            InferenceBackend::Hosted => Ok(format!(
                "{}/{}",
                self.hosted_base_url.trim_end_matches('/'),
                self.model_id
            )),
            InferenceBackend::Custom => {
                self.custom_inference_url
                    .clone()
                    .ok_or_else(|| RelayError::Configuration {
                        message: "CUSTOM_INFERENCE_URL is not configured".to_string(),
                    })
            }
        }
    }

    /// Copy with the access token masked, for display
    pub fn redacted(&self) -> Self {
        Self {
            access_token: self.access_token.as_ref().map(|_| "***".to_string()),
            ..self.clone()
        }
    }
}

/// An explicit backend wins; otherwise a custom URL selects the custom backend.
fn select_backend(explicit: Option<InferenceBackend>, custom_url: Option<&str>) -> InferenceBackend {
    match explicit {
        Some(backend) => backend,
        None if custom_url.is_some() => InferenceBackend::Custom,
        None => InferenceBackend::Hosted,
    }
}
