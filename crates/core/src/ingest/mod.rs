//! Ledger ingestion.
//!
//! Turns raw CSV exports into normalized [`LedgerRecord`]s. Two export
//! layouts are recognized:
//! - Flat transaction ledgers with a header row of named columns
//! - Comparative balance sheets (current / prior / variance per account)

pub mod amount;
mod balance_sheet;
pub mod error;
mod flat;
pub mod service;
pub mod types;


pub use amount::{format_amount, parse_amount};
pub use error::IngestError;
pub use service::{Ingestor, detect_shape, read_table};
pub use types::{
    BalanceSheetItem, IngestedLedger, InputShape, LedgerRecord, ReportingPeriod, Section,
};
