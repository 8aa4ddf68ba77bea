//! Upload and download routes.
//!
//! Two flows convert an uploaded ledger into a workbook:
//! - `POST /upload` stages the workbook and answers with its filename,
//!   which the client then fetches from `GET /download/{filename}`
//! - `POST /upload/direct` answers with the workbook itself

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    response::Response,
    routing::{get, post},
};
use cashflow_core::Pipeline;
use serde::Serialize;
use tracing::info;

use super::form::{attachment, read_csv_upload, run_pipeline};
use crate::{AppState, error::ApiError};

/// MIME type of `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Filename offered for direct downloads.
const DIRECT_FILENAME: &str = "cash_flow_statement.xlsx";

/// Creates the upload and download routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload))
        .route("/upload/direct", post(upload_direct))
        .route("/download/{filename}", get(download))
}

/// Response body for a staged conversion.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Human-readable status.
    pub message: &'static str,
    /// Name to pass to the download route.
    pub filename: String,
    /// Filename of the uploaded ledger.
    pub original: String,
}

/// Converts an upload and stages the workbook for download.
async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let upload = read_csv_upload(multipart).await?;
    let workbook = run_pipeline(&state.pipeline, upload.bytes, Pipeline::convert_to_xlsx).await?;
    let staged = state.staging.stage(workbook).await?;

    drop(state.staging.schedule_purge(staged.key.clone()));

    info!(
        original = %upload.filename,
        filename = %staged.key,
        expires_at = %staged.expires_at,
        "Statement staged for download"
    );

    Ok(Json(UploadResponse {
        message: "File processed successfully",
        filename: staged.key,
        original: upload.filename,
    }))
}

/// Serves a staged workbook.
async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, ApiError> {
    let bytes = state.staging.fetch(&filename).await?;
    info!(filename = %filename, size = bytes.len(), "Statement downloaded");
    Ok(attachment(bytes, &filename, XLSX_CONTENT_TYPE))
}

/// Converts an upload and answers with the workbook.
async fn upload_direct(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_csv_upload(multipart).await?;
    let workbook = run_pipeline(&state.pipeline, upload.bytes, Pipeline::convert_to_xlsx).await?;
    info!(original = %upload.filename, size = workbook.len(), "Statement converted");
    Ok(attachment(workbook, DIRECT_FILENAME, XLSX_CONTENT_TYPE))
}
