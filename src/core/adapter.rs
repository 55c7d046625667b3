//! External response adapters
//!
//! Each inference backend expects its own request body and names the
//! translation field differently. Normalization is shared: the first
//! element of a non-empty array, then a bare object, then the raw payload
//! serialized as text.

use serde_json::{json, Value};

use crate::core::models::InferenceBackend;

/// Request/response shaping for one kind of inference backend
pub trait ResponseAdapter: Send + Sync {
    /// JSON body sent to the external endpoint
    fn request_body(&self, text: &str) -> Value;

    /// Fields that may carry the translation, in lookup order
    fn translation_fields(&self) -> &'static [&'static str];

    /// Extract the translated text from an external response
    fn normalize(&self, response: &Value) -> String {
        let fields = self.translation_fields();

        let translated = match response {
            Value::Array(items) => items.first().and_then(|first| find_field(first, fields)),
            Value::Object(_) => find_field(response, fields),
            _ => None,
        };

        translated.unwrap_or_else(|| response.to_string())
    }
}

fn find_field(value: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| {
            value
                .get(*field)
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .map(str::to_string)
}

/// Hosted inference API (`[{ "translation_text": ... }]`)
#[derive(Debug, Clone, Copy, Default)]
pub struct HostedInferenceAdapter;

impl ResponseAdapter for HostedInferenceAdapter {
    fn request_body(&self, text: &str) -> Value {
        json!({
            "inputs": text,
            "parameters": {
                // Block on cold start instead of failing with 503
                "wait_for_model": true
            }
        })
    }

    fn translation_fields(&self) -> &'static [&'static str] {
        &["translation_text"]
    }
}

/// Self-hosted endpoint taking `{ "text": ... }`
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomEndpointAdapter;

impl ResponseAdapter for CustomEndpointAdapter {
    fn request_body(&self, text: &str) -> Value {
        json!({ "text": text })
    }

    fn translation_fields(&self) -> &'static [&'static str] {
        &["translated_text", "translation_text", "translation"]
    }
}

/// Select the adapter for a configured backend
pub fn adapter_for(backend: InferenceBackend) -> Box<dyn ResponseAdapter> {
    match backend {
        InferenceBackend::Hosted => Box::new(HostedInferenceAdapter),
        InferenceBackend::Custom => Box::new(CustomEndpointAdapter),
    }
}
