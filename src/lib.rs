//! Ibani Translator - English to Ibani translation relay
//!
//! This library validates translation requests, forwards them to a hosted
//! or self-hosted inference endpoint, and normalizes the reply into a
//! stable JSON contract.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    client::RelayClient,
    config::RelayConfig,
    errors::RelayError,
    models::{InferenceBackend, TranslationRequest, TranslationResponse},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
