//! Error types for the email triage pipeline
//!
//! This module provides structured error definitions using thiserror, with
//! anyhow used for propagation at the binary boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for triage operations
#[derive(Error, Debug)]
pub enum TriageError {
    /// A model artifact is missing, unreadable or malformed
    #[error("Model artifact error ({path}): {reason}")]
    ModelArtifact { path: PathBuf, reason: String },

    /// Classifier produced an index the label decoder does not know
    #[error("Unknown class index {index} (label decoder has {known} classes)")]
    UnknownClassIndex { index: usize, known: usize },

    /// Feedback log has not been created yet
    #[error("Feedback log not found: {0}")]
    LogNotFound(PathBuf),

    /// Feedback record failed validation
    #[error("Invalid feedback: {0}")]
    InvalidFeedback(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// TOML parse error
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid token pattern in a vectorizer
    #[error("Invalid token pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl TriageError {
    /// Build a model artifact error for `path`
    pub fn artifact(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        TriageError::ModelArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Convert anyhow::Error to TriageError
impl From<anyhow::Error> for TriageError {
    fn from(err: anyhow::Error) -> Self {
        TriageError::Other(err.to_string())
    }
}
