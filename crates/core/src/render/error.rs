//! Rendering error types.

use thiserror::Error;

/// Errors raised while serializing a statement.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The workbook could not be built or serialized.
    #[error("failed to build workbook: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    /// The CSV rendition could not be written.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}
