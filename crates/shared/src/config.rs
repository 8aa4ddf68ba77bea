//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Staging area for rendered statements.
    #[serde(default)]
    pub staging: StagingConfig,
    /// Reporting period stamped on balance-sheet conversions.
    #[serde(default)]
    pub reporting: ReportingConfig,
    /// Classification rule source.
    #[serde(default)]
    pub classification: ClassificationConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Staging area configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StagingConfig {
    /// Root directory for staged workbooks.
    #[serde(default = "default_staging_root")]
    pub root: PathBuf,
    /// Seconds a staged workbook is kept before it is purged.
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            root: default_staging_root(),
            retention_secs: default_retention_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_staging_root() -> PathBuf {
    PathBuf::from("./temp")
}

fn default_retention_secs() -> u64 {
    300 // 5 minutes
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Reporting period used when a comparative balance sheet is converted.
///
/// Balance-sheet exports carry no per-row dates, so the statement period and
/// the date stamped on every derived record come from here.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingConfig {
    /// Period start caption.
    #[serde(default = "default_period_start")]
    pub period_start: String,
    /// Period end; also the date stamped on derived records.
    #[serde(default = "default_period_end")]
    pub period_end: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            period_start: default_period_start(),
            period_end: default_period_end(),
        }
    }
}

fn default_period_start() -> String {
    "2025-03-31".to_string()
}

fn default_period_end() -> String {
    "2025-06-30".to_string()
}

/// Classification rule source.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClassificationConfig {
    /// JSON file with ordered classification rules. Built-in rules when unset.
    pub rules_path: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// A bare `PORT` environment variable overrides `server.port`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CASHFLOW").separator("__"))
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .build()?;

        config.try_deserialize()
    }
}
