//! Statement routes returning data instead of a workbook.

use axum::{
    Json, Router,
    extract::{Multipart, State},
    response::Response,
    routing::post,
};
use cashflow_core::Pipeline;
use cashflow_core::statement::CashFlowStatement;
use tracing::info;

use super::form::{attachment, read_csv_upload, run_pipeline};
use crate::{AppState, error::ApiError};

const CSV_FILENAME: &str = "cash_flow_statement.csv";

/// Creates the statement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/statements/preview", post(preview))
        .route("/statements/csv", post(export_csv))
}

/// Assembles the statement and returns it as JSON.
async fn preview(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CashFlowStatement>, ApiError> {
    let upload = read_csv_upload(multipart).await?;
    let statement =
        run_pipeline(&state.pipeline, upload.bytes, Pipeline::statement_from_csv).await?;
    info!(
        original = %upload.filename,
        net_cash_flow = %statement.net_cash_flow,
        "Statement previewed"
    );
    Ok(Json(statement))
}

/// Renders the statement as CSV.
async fn export_csv(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_csv_upload(multipart).await?;
    let csv = run_pipeline(&state.pipeline, upload.bytes, Pipeline::convert_to_csv).await?;
    info!(original = %upload.filename, size = csv.len(), "Statement exported as CSV");
    Ok(attachment(csv, CSV_FILENAME, "text/csv; charset=utf-8"))
}

#[cfg(test)]
mod tests {
    use axum::http::{StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::create_router;
    use crate::test_support::{LEDGER_CSV, multipart_request, test_state};

    #[tokio::test]
    async fn test_preview_returns_statement() {
        let app = create_router(test_state());

        let response = app
            .oneshot(multipart_request(
                "/api/v1/statements/preview",
                "csvfile",
                "ledger.csv",
                LEDGER_CSV,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["period_start"], "2025-04-15");
        assert_eq!(json["period_end"], "2025-06-30");
        assert_eq!(json["net_cash_flow"], "-1150.00");
        assert_eq!(json["operating"][0]["description"], "Accounts Receivable");
        assert_eq!(json["operating"][1]["kind"], "subtotal");
        assert_eq!(json["investing"][0]["amount"], "-2400.00");
    }

    #[tokio::test]
    async fn test_csv_export() {
        let app = create_router(test_state());

        let response = app
            .oneshot(multipart_request(
                "/api/v1/statements/csv",
                "csvfile",
                "ledger.csv",
                LEDGER_CSV,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("CASH FLOWS FROM OPERATING ACTIVITIES"));
        assert!(text.contains("NET INCREASE (DECREASE) IN CASH,\"(1,150.00)\""));
    }

    #[tokio::test]
    async fn test_preview_rejects_missing_columns() {
        let app = create_router(test_state());

        let response = app
            .oneshot(multipart_request(
                "/api/v1/statements/preview",
                "csvfile",
                "ledger.csv",
                "Account,Amount\nCash,1\n",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
