//! Shared errors and configuration for the cash-flow statement service.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types with HTTP status mapping
//! - Layered configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, ClassificationConfig, ReportingConfig, ServerConfig, StagingConfig};
pub use error::{AppError, AppResult};
