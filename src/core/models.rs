//! Core data models for the relay

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::errors::{RelayError, Result};

/// Language of the text accepted by the relay
pub const SOURCE_LANGUAGE: &str = "English";

/// Language produced by the external model
pub const TARGET_LANGUAGE: &str = "Ibani";

/// Message returned when the request body carries no usable `text`
pub const MISSING_TEXT_MESSAGE: &str = "Please provide a \"text\" field in the request body.";

/// Kind of external inference backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InferenceBackend {
    /// Hosted inference API addressed by model id
    Hosted,
    /// Self-hosted endpoint addressed by URL
    Custom,
}

impl fmt::Display for InferenceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceBackend::Hosted => write!(f, "hosted"),
            InferenceBackend::Custom => write!(f, "custom"),
        }
    }
}

impl std::str::FromStr for InferenceBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hosted" => Ok(InferenceBackend::Hosted),
            "custom" => Ok(InferenceBackend::Custom),
            other => Err(format!("unknown inference backend: {}", other)),
        }
    }
}

/// Translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Validate a raw JSON body; `text` must be a non-empty string.
    pub fn from_value(body: &Value) -> Result<Self> {
        match body.get("text").and_then(Value::as_str) {
            Some(text) if !text.is_empty() => Ok(Self::new(text)),
            _ => Err(RelayError::Validation {
                message: MISSING_TEXT_MESSAGE.to_string(),
            }),
        }
    }
}

/// Successful translation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub success: bool,
}

impl TranslationResponse {
    pub fn new(original_text: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            original_text: original_text.into(),
            translated_text: translated_text.into(),
            source_language: SOURCE_LANGUAGE.to_string(),
            target_language: TARGET_LANGUAGE.to_string(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub success: bool,
}

impl From<&RelayError> for ErrorResponse {
    fn from(err: &RelayError) -> Self {
        Self {
            error: err.label().to_string(),
            message: err.message(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub timestamp: String,
    pub using_custom_inference: bool,
}

/// One entry of the endpoint catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointInfo {
    pub method: String,
    pub path: String,
    pub description: String,
}

/// Static service descriptor served at `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub model: String,
    pub endpoints: Vec<EndpointInfo>,
}
