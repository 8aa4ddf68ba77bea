//! Staging area for rendered statements using Apache OpenDAL.
//!
//! A rendered workbook is written under a unique key, handed back to the
//! client for download, and purged once the retention window elapses.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Apache OpenDAL                          │
//! ├──────────────────────────────────────────────────────────────┤
//! │ op.write("cash_flow_….xlsx", bytes)  │ op.stat(key)          │
//! │ op.read(key)                         │ op.delete(key)        │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod service;

pub use config::{StorageConfig, StorageProvider};
pub use error::StorageError;
pub use service::{StagedStatement, StagingStore};
