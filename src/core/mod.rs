//! Core relay module

pub mod adapter;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
