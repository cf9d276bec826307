//! Client SDK code synthesis
//!
//! Walks operation schemas a second time to emit Rust SDK source text: a
//! request struct per operation, a response-refresh model with null-safe
//! decoding, and a shared client. Emission is two-phase: the schema walk in
//! [`convert`] builds an explicit codegen AST ([`ast`]), and [`template`]
//! renders it through three fixed tera templates (method, refresh, client).
//!
//! The engine returns text; writing files is the caller's job.

pub mod ast;
pub mod convert;
pub mod generate;
pub mod naming;
pub mod template;

use std::fmt;

use thiserror::Error;

use tf_openapi_generator_mapper::oas::SchemaError;

pub use convert::RefreshDetails;
pub use generate::{generate_sdk, GeneratedFile};
pub use template::Template;

/// What to do when the walk hits a schema shape the synthesis engine cannot
/// express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsupportedShapePolicy {
    /// Abort the operation's synthesis with a typed error.
    Fail,
    /// Record a warning, emit nothing for the offending node, continue.
    #[default]
    Warn,
}

/// Code-synthesis failures.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("unsupported schema shape at '{path}': {detail}")]
    UnsupportedShape { path: String, detail: String },

    #[error("schema nesting exceeds depth limit at '{path}'")]
    DepthExceeded { path: String },

    #[error("template rendering failed: {0}")]
    Template(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A shape the engine skipped under [`UnsupportedShapePolicy::Warn`].
///
/// Warnings are values, not log lines: the caller decides how to surface
/// them. Nothing is ever dropped silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthWarning {
    pub path: String,
    pub detail: String,
}

impl fmt::Display for SynthWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped '{}': {}", self.path, self.detail)
    }
}
