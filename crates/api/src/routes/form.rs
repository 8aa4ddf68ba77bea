//! Multipart ledger uploads and conversion plumbing shared by the handlers.

use std::sync::Arc;

use axum::{
    extract::{Multipart, multipart::MultipartError},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use cashflow_core::{Pipeline, PipelineError};
use cashflow_shared::{AppError, AppResult};

use crate::error::ApiError;

/// Form field carrying the ledger CSV.
pub(crate) const CSV_FIELD: &str = "csvfile";

/// An uploaded ledger.
pub(crate) struct CsvUpload {
    /// Client-side filename.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Bytes,
}

/// Maps a multipart read failure, keeping the size limit distinct.
fn multipart_error(err: &MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(err.body_text())
    }
}

/// Reads the ledger file from a multipart form. Other fields are ignored.
pub(crate) async fn read_csv_upload(mut multipart: Multipart) -> AppResult<CsvUpload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        if field.name() != Some(CSV_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or("ledger.csv").to_string();
        let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
        return Ok(CsvUpload { filename, bytes });
    }

    Err(AppError::Validation(format!(
        "Failed to get file: no '{CSV_FIELD}' field in upload"
    )))
}

/// Runs one pipeline call on the blocking pool.
///
/// Parsing and workbook building are CPU-bound and must not hold an async
/// worker.
pub(crate) async fn run_pipeline<T, F>(
    pipeline: &Arc<Pipeline>,
    bytes: Bytes,
    convert: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&Pipeline, &[u8]) -> Result<T, PipelineError> + Send + 'static,
{
    let pipeline = Arc::clone(pipeline);
    let output = tokio::task::spawn_blocking(move || convert(&pipeline, &bytes))
        .await
        .map_err(|e| AppError::Internal(format!("conversion task failed: {e}")))??;
    Ok(output)
}

/// Builds a file download response.
pub(crate) fn attachment(bytes: Vec<u8>, filename: &str, content_type: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
