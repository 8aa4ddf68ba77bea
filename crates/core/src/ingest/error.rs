//! Ingestion error types.

use thiserror::Error;

/// Errors that can occur while ingesting a ledger export.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The table is too short, unreadable, or has no recognizable header.
    #[error("Invalid ledger format: {0}")]
    Format(String),

    /// A required semantic column has no matching header.
    #[error("Required column not found: {field} (looked for: {tried})", tried = .tried.join(", "))]
    MissingColumn {
        /// Semantic field name.
        field: String,
        /// Header synonyms that were tried.
        tried: Vec<String>,
    },

    /// An amount cell could not be parsed.
    #[error("Invalid amount in row {row}: {value:?}")]
    InvalidAmount {
        /// 1-based row number in the uploaded file.
        row: usize,
        /// Raw cell text.
        value: String,
    },

    /// The CSV text itself could not be read.
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl IngestError {
    /// Create a format error.
    #[must_use]
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    /// Create a missing column error.
    #[must_use]
    pub fn missing_column(field: &str, tried: &[&str]) -> Self {
        Self::MissingColumn {
            field: field.to_string(),
            tried: tried.iter().map(ToString::to_string).collect(),
        }
    }

    /// Create an invalid amount error.
    #[must_use]
    pub fn invalid_amount(row: usize, value: impl Into<String>) -> Self {
        Self::InvalidAmount {
            row,
            value: value.into(),
        }
    }
}
