//! Error types for json-fit
//!
//! Only failures that abort a whole run live here. Per-field problems are
//! [`crate::inference::Diagnostic`]s: logged, collected, and skipped.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Shape errors
    // ============================================================================
    #[error("JSON root must be an object, got: {input}")]
    InvalidRootShape { input: String },

    #[error("JSON nesting exceeds the limit of {limit} at `{path}`")]
    TooDeeplyNested { path: String, limit: usize },

    // ============================================================================
    // Input errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("jq filter failed: {message}")]
    Jq { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    // ============================================================================
    // I/O errors
    // ============================================================================
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Build an `InvalidRootShape` error from the offending value.
    pub fn invalid_root(value: &serde_json::Value) -> Self {
        Self::InvalidRootShape {
            input: value.to_string(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn jq(message: impl Into<String>) -> Self {
        Self::Jq {
            message: message.into(),
        }
    }

    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for json-fit
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_root(&serde_json::json!([1, 2]));
        assert_eq!(err.to_string(), "JSON root must be an object, got: [1,2]");

        let err = Error::config("bad");
        assert_eq!(err.to_string(), "Configuration error: bad");

        let err = Error::TooDeeplyNested {
            path: "Root.a.b".into(),
            limit: 2,
        };
        assert_eq!(
            err.to_string(),
            "JSON nesting exceeds the limit of 2 at `Root.a.b`"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = Error::io(
            "/nowhere/Model.swift",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/nowhere/Model.swift"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
