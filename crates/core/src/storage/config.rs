//! Staging storage configuration types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// Local filesystem directory.
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// Process memory (tests and one-shot tools).
    Memory,
}

impl StorageProvider {
    /// Create local filesystem provider.
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Create in-memory provider.
    #[must_use]
    pub const fn memory() -> Self {
        Self::Memory
    }

    /// Get the provider name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }
}

/// Staging store configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Seconds a staged statement is kept (default: 300 = 5 minutes).
    pub retention_secs: u64,
}

impl StorageConfig {
    /// Default retention: 5 minutes.
    pub const DEFAULT_RETENTION: u64 = 300;

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            retention_secs: Self::DEFAULT_RETENTION,
        }
    }

    /// Set retention window.
    #[must_use]
    pub fn with_retention_secs(mut self, secs: u64) -> Self {
        self.retention_secs = secs;
        self
    }
}

impl From<&cashflow_shared::StagingConfig> for StorageConfig {
    fn from(config: &cashflow_shared::StagingConfig) -> Self {
        Self::new(StorageProvider::local_fs(&config.root)).with_retention_secs(config.retention_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./temp");
        assert_eq!(provider.name(), "local");
    }

    #[test]
    fn test_storage_provider_memory() {
        assert_eq!(StorageProvider::memory().name(), "memory");
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::memory());
        assert_eq!(config.retention_secs, StorageConfig::DEFAULT_RETENTION);
    }

    #[test]
    fn test_storage_config_from_app_config() {
        let staging = cashflow_shared::StagingConfig {
            root: PathBuf::from("/var/tmp/cashflow"),
            retention_secs: 42,
            max_upload_bytes: 1024,
        };
        let config = StorageConfig::from(&staging);
        assert_eq!(config.provider, StorageProvider::local_fs("/var/tmp/cashflow"));
        assert_eq!(config.retention_secs, 42);
    }

    #[test]
    fn test_provider_serde_tag() {
        let provider: StorageProvider =
            serde_json::from_str(r#"{"type":"local_fs","root":"./temp"}"#).expect("valid json");
        assert_eq!(provider, StorageProvider::local_fs("./temp"));
    }
}
