//! Typed schema-build errors with property-path context

use std::fmt;

use thiserror::Error;

/// Property path from the schema root down to the offending node.
///
/// Segments accumulate as errors bubble out of nested builds, so the final
/// message points at the exact property, e.g. `authorizer_config.payload`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaPath(Vec<String>);

impl SchemaPath {
    pub fn root() -> Self {
        SchemaPath(Vec::new())
    }

    pub fn prepend(&mut self, segment: &str) {
        self.0.insert(0, segment.to_string());
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", self.0.join("."))
        }
    }
}

/// Errors raised while classifying a schema node or building an attribute.
///
/// `NotFound` is a sentinel, not a failure: it marks an absent optional
/// facet (no request body, no 2xx JSON response) and callers treat it as
/// "skip this contribution". Every other variant is a real build failure
/// and is always propagated to the immediate caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("no schema found")]
    NotFound,

    #[error("invalid schema type '{found}' at '{path}'")]
    InvalidType { found: String, path: SchemaPath },

    #[error("missing schema type at '{path}'")]
    MissingType { path: SchemaPath },

    #[error("invalid schema format '{found}' for type '{schema_type}' at '{path}'")]
    InvalidFormat {
        schema_type: String,
        found: String,
        path: SchemaPath,
    },

    #[error("unresolvable schema reference '{reference}' at '{path}'")]
    UnresolvableRef { reference: String, path: SchemaPath },

    #[error("missing items schema for array at '{path}'")]
    MissingItems { path: SchemaPath },

    #[error("missing additionalProperties schema for map at '{path}'")]
    MissingAdditionalProperties { path: SchemaPath },
}

impl SchemaError {
    pub fn invalid_type(found: &str) -> Self {
        SchemaError::InvalidType {
            found: found.to_string(),
            path: SchemaPath::root(),
        }
    }

    pub fn invalid_format(schema_type: &str, found: Option<&str>) -> Self {
        SchemaError::InvalidFormat {
            schema_type: schema_type.to_string(),
            found: found.unwrap_or("(none)").to_string(),
            path: SchemaPath::root(),
        }
    }

    /// True for the absent-facet sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SchemaError::NotFound)
    }

    /// Push a property segment onto the error's path as it bubbles out of a
    /// nested build.
    pub fn nest(mut self, segment: &str) -> Self {
        match &mut self {
            SchemaError::NotFound => {}
            SchemaError::InvalidType { path, .. }
            | SchemaError::MissingType { path }
            | SchemaError::InvalidFormat { path, .. }
            | SchemaError::UnresolvableRef { path, .. }
            | SchemaError::MissingItems { path }
            | SchemaError::MissingAdditionalProperties { path } => path.prepend(segment),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_errors_report_full_path() {
        let err = SchemaError::invalid_type("unknown")
            .nest("payload")
            .nest("authorizer_config");
        assert_eq!(
            err.to_string(),
            "invalid schema type 'unknown' at 'authorizer_config.payload'"
        );
    }

    #[test]
    fn not_found_is_sentinel() {
        assert!(SchemaError::NotFound.is_not_found());
        assert!(!SchemaError::invalid_type("x").is_not_found());
    }
}
