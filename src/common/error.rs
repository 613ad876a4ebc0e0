//! Error types for bdd
//!
//! Authoring errors point at a mistake in the test source and abort the
//! whole run. Data errors describe a fixture file that cannot be used.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bdd
#[derive(Error, Debug)]
pub enum Error {
    // === Authoring Errors ===
    #[error("A like table must be the last argument of a sentence")]
    TableNotLast,

    #[error("More than one body was given to a sentence; pass one body and at most one like table")]
    MultipleBodies,

    #[error("A golden context is driven by its fixture records and takes no like table")]
    TableInGoldenContext,

    #[error("Invalid fixture key '{0}': keys must start with 'input.' or 'golden.'")]
    InvalidKeyPrefix(String),

    // === Fixture Data Errors ===
    #[error("Unsupported fixture format '{0}'. Supported extensions: .json, .yml, .yaml")]
    UnsupportedFormat(String),

    #[error("Invalid key sequence '{0}' for fixture value: a step does not land on a map")]
    InvalidKeySequence(String),

    #[error("No fixture file for feature '{feature}' in '{dir}'")]
    FixtureNotFound { feature: String, dir: String },

    #[error("Failed to parse fixture file '{path}': {message}")]
    FixtureParse { path: String, message: String },

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    #[error("Data folder is a file: {}", .0.display())]
    DataDirIsFile(PathBuf),

    #[error("Context '{context}' not found in '{path}'")]
    ContextNotFound { context: String, path: String },

    #[error("Record #{index} not found in context '{context}'; it holds {len} record(s)")]
    RecordIndex {
        context: String,
        index: usize,
        len: usize,
    },

    // === Argument Errors ===
    #[error("Argument #{index} is missing; the set holds {len} value(s)")]
    ArgumentIndex { index: usize, len: usize },

    #[error("Argument #{index} has an unexpected type: {message}")]
    ArgumentType { index: usize, message: String },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Whether the error is a mistake in the test source rather than in
    /// the fixture data
    pub fn is_authoring(&self) -> bool {
        matches!(
            self,
            Error::TableNotLast
                | Error::MultipleBodies
                | Error::TableInGoldenContext
                | Error::InvalidKeyPrefix(_)
        )
    }

    /// Create a file read error
    pub fn file_read(path: &Path, error: &io::Error) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }

    /// Create a fixture parse error
    pub fn fixture_parse(path: &Path, error: &Error) -> Self {
        Self::FixtureParse {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Create a fixture not found error
    pub fn fixture_not_found(feature: &str, dir: &Path) -> Self {
        Self::FixtureNotFound {
            feature: feature.to_string(),
            dir: dir.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authoring_classification() {
        assert!(Error::TableNotLast.is_authoring());
        assert!(Error::MultipleBodies.is_authoring());
        assert!(Error::InvalidKeyPrefix("output.x".into()).is_authoring());
        assert!(!Error::InvalidKeySequence("input.a.b".into()).is_authoring());
        assert!(!Error::DataDirIsFile(PathBuf::from("testdata")).is_authoring());
    }

    #[test]
    fn test_messages_name_the_cause() {
        assert!(Error::TableNotLast.to_string().contains("last argument"));
        assert!(Error::MultipleBodies.to_string().contains("More than one body"));
        let err = Error::DataDirIsFile(PathBuf::from("testdata"));
        assert_eq!(err.to_string(), "Data folder is a file: testdata");
    }
}
