//! Common types and utilities for the Terraform OpenAPI generator
//!
//! This crate contains the provider specification (IR) data model, the
//! generator configuration model, and the shared error type used across
//! the mapper, sdk, and CLI components.

pub mod config;
pub mod spec;

use thiserror::Error;

/// Errors that can occur during provider generation
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
