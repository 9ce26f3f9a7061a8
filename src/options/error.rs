//! Options Error Types
//!
//! Errors raised while reading, upgrading and merging plugin options. None of
//! them escape the loader: it logs them and keeps the options it already has.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for options operations
pub type OptionsResult<T> = Result<T, OptionsError>;

#[derive(Error, Debug, Clone)]
pub enum OptionsError {
    /// No file at the conventional location
    #[error("Options file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Options file could not be read
    #[error("Failed to read options file {}: {message}", path.display())]
    Io { path: PathBuf, message: String },

    /// Document holds no JSON at all
    #[error("Options document is empty")]
    EmptyDocument,

    /// JSON text did not deserialize into the expected schema
    #[error("Failed to parse options ({schema}): {message}")]
    Parse { schema: String, message: String },

    /// Legacy document parsed, but the upgrade produced nothing
    #[error("Upgrade '{mapping}' failed: {message}")]
    Upgrade { mapping: String, message: String },

    /// A regex replacement pattern did not compile
    #[error("Invalid replacement pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Embedded resource or library entry missing
    #[error("Resource not found: {name}")]
    ResourceNotFound { name: String },
}

impl From<std::io::Error> for OptionsError {
    fn from(err: std::io::Error) -> Self {
        OptionsError::io(PathBuf::new(), err.to_string())
    }
}

impl From<regex::Error> for OptionsError {
    fn from(err: regex::Error) -> Self {
        OptionsError::invalid_pattern("", err.to_string())
    }
}

impl OptionsError {
    pub fn not_found<P: Into<PathBuf>>(path: P) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn io<P: Into<PathBuf>, S: Into<String>>(path: P, message: S) -> Self {
        Self::Io { path: path.into(), message: message.into() }
    }

    pub fn parse<T: Into<String>, S: Into<String>>(schema: T, message: S) -> Self {
        Self::Parse { schema: schema.into(), message: message.into() }
    }

    pub fn upgrade<M: Into<String>, S: Into<String>>(mapping: M, message: S) -> Self {
        Self::Upgrade { mapping: mapping.into(), message: message.into() }
    }

    pub fn invalid_pattern<P: Into<String>, S: Into<String>>(pattern: P, message: S) -> Self {
        Self::InvalidPattern { pattern: pattern.into(), message: message.into() }
    }

    pub fn resource_not_found<S: Into<String>>(name: S) -> Self {
        Self::ResourceNotFound { name: name.into() }
    }

    /// Missing files are expected and not worth more than a debug line
    pub fn is_not_found(&self) -> bool {
        matches!(self, OptionsError::NotFound { .. } | OptionsError::ResourceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = OptionsError::parse("GenericFormOptions", "expected value at line 1 column 1");
        assert_eq!(
            error.to_string(),
            "Failed to parse options (GenericFormOptions): expected value at line 1 column 1"
        );
        assert_eq!(OptionsError::EmptyDocument.to_string(), "Options document is empty");
    }

    #[test]
    fn test_not_found_classification() {
        assert!(OptionsError::resource_not_found("x.json").is_not_found());
        assert!(OptionsError::not_found("/tmp/x.json").is_not_found());
        assert!(!OptionsError::io("/tmp/x.json", "permission denied").is_not_found());
        assert!(!OptionsError::EmptyDocument.is_not_found());
    }
}
