//! Classification rule loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading classification rules.
#[derive(Debug, Error)]
pub enum RulesError {
    /// The rules file could not be read.
    #[error("failed to read rules file {path}: {source}")]
    Io {
        /// Path of the rules file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rules document is not valid JSON for the rule schema.
    #[error("invalid rules document: {0}")]
    Json(#[from] serde_json::Error),

    /// A rule can never match.
    #[error("rule '{0}' has no keywords and no account types")]
    EmptyRule(String),
}
