//! Core conversion logic for the cash flow service.
//!
//! This crate contains the ledger-to-statement pipeline with ZERO web
//! dependencies. Transport adapters (HTTP, CLI) live elsewhere and call
//! [`Pipeline`].
//!
//! # Modules
//!
//! - `ingest` - CSV reading, layout detection and record normalization
//! - `classify` - Ordered keyword rules assigning activity buckets
//! - `statement` - Indirect-method statement assembly
//! - `render` - Workbook and CSV renditions
//! - `storage` - Short-lived staging of rendered workbooks
//! - `pipeline` - The composed conversion

pub mod classify;
pub mod ingest;
pub mod pipeline;
pub mod render;
pub mod statement;
pub mod storage;

#[cfg(test)]
mod test_fixtures;

pub use pipeline::{Pipeline, PipelineError};
