//! Router test helpers.

use axum::{
    body::Body,
    http::{Request, header},
};
use cashflow_core::{
    Pipeline,
    storage::{StagingStore, StorageConfig, StorageProvider},
};

use crate::AppState;

/// Small flat ledger: one receivable change and one equipment purchase.
pub(crate) const LEDGER_CSV: &str = "\
Date,Account,Account Type,Description,Amount
2025-04-15,1010 - Accounts Receivable,Current Asset,Invoices collected,(1250.00)
2025-06-30,1500 - Office Equipment,Fixed Asset,Laptops,2400.00
";

const BOUNDARY: &str = "cashflow-test-boundary";

/// State backed by an in-memory staging store.
pub(crate) fn test_state() -> AppState {
    let staging = StagingStore::from_config(StorageConfig::new(StorageProvider::memory()))
        .expect("memory store should build");
    AppState::new(Pipeline::default(), staging, 1024 * 1024)
}

/// Builds a single-file multipart POST.
pub(crate) fn multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    content: &str,
) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("valid request")
}
