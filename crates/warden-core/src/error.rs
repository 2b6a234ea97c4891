//! Error types for the warden library.
//!
//! Validators never fail: a rejected document or command is a
//! [`Verdict`](crate::validation::Verdict), not an error. The variants here
//! cover the process-level failures around them (reading files, loading
//! configuration, asking git for the current branch).

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all warden operations.
#[derive(Error, Debug)]
pub enum WardenError {
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// The current branch could not be resolved
    #[error("Branch resolution failed: {message}")]
    BranchResolution { message: String },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WardenError {
        WardenError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WardenError {
    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a file system error for the given path.
    pub fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Creates a branch resolution error.
    pub fn branch(message: impl Into<String>) -> Self {
        Self::BranchResolution {
            message: message.into(),
        }
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T> {
    /// Add context to any error type, converting to a configuration error.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| WardenError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

/// Specialized extension trait for file system Results.
pub trait IoResultExt<T> {
    /// Attach the path the failed operation touched.
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| WardenError::file_system(path, e))
    }
}

/// Result type alias for warden operations
pub type Result<T> = std::result::Result<T, WardenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = WardenError::invalid_input("trunk_branch").with_reason("must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'trunk_branch': must not be empty"
        );
    }

    #[test]
    fn test_fs_context_keeps_path() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        let err = result.fs_context("/tmp/missing.json").unwrap_err();
        assert!(err.to_string().contains("/tmp/missing.json"));
    }
}
