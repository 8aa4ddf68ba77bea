//! Staging store implementation using Apache OpenDAL.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use opendal::{ErrorKind, Operator, services};
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;

/// Prefix of every generated key.
const KEY_PREFIX: &str = "cash_flow_";

/// Extension of staged workbooks.
const KEY_EXTENSION: &str = ".xlsx";

/// A statement written to the staging area.
#[derive(Debug, Clone)]
pub struct StagedStatement {
    /// Storage key, also the download filename.
    pub key: String,
    /// Size in bytes.
    pub size: u64,
    /// When the statement will be purged.
    pub expires_at: DateTime<Utc>,
}

/// Short-lived store for rendered statements.
#[derive(Debug, Clone)]
pub struct StagingStore {
    operator: Operator,
    config: StorageConfig,
}

impl StagingStore {
    /// Create a new staging store from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish()
                    .pipe(Ok)
            }
            StorageProvider::Memory => Operator::new(services::Memory::default())
                .map_err(|e| StorageError::configuration(e.to_string()))?
                .finish()
                .pipe(Ok),
        }
    }

    /// Generate a fresh, time-ordered statement key.
    ///
    /// Format: `cash_flow_{uuid v7}.xlsx`
    #[must_use]
    pub fn generate_key() -> String {
        format!("{KEY_PREFIX}{}{KEY_EXTENSION}", Uuid::now_v7().simple())
    }

    /// Check that a client-supplied key names a file inside the staging root.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is empty, hidden, or contains anything
    /// other than ASCII alphanumerics, dots, hyphens and underscores.
    pub fn validate_key(key: &str) -> Result<(), StorageError> {
        if key.is_empty() || key.starts_with('.') || key != sanitize_filename(key) {
            return Err(StorageError::invalid_key(key));
        }
        Ok(())
    }

    /// Write a rendered statement under a new key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn stage(&self, bytes: Vec<u8>) -> Result<StagedStatement, StorageError> {
        let key = Self::generate_key();
        let size = u64::try_from(bytes.len()).unwrap_or(u64::MAX);

        self.operator
            .write(&key, bytes)
            .await
            .map_err(StorageError::from)?;

        let retention = i64::try_from(self.config.retention_secs).unwrap_or(i64::MAX);
        let expires_at = TimeDelta::try_seconds(retention)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        info!(key = %key, size, provider = self.provider_name(), "staged statement");
        Ok(StagedStatement {
            key,
            size,
            expires_at,
        })
    }

    /// Read a staged statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or the statement is gone.
    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        Self::validate_key(key)?;

        match self.operator.read(key).await {
            Ok(buffer) => Ok(buffer.to_vec()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::not_found(key)),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Delete a staged statement. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if deletion fails.
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        Self::validate_key(key)?;
        self.operator.delete(key).await.map_err(StorageError::from)
    }

    /// Check if a statement is staged.
    pub async fn exists(&self, key: &str) -> bool {
        Self::validate_key(key).is_ok() && self.operator.stat(key).await.is_ok()
    }

    /// Delete `key` once the retention window elapses.
    ///
    /// The returned task is detached by callers; failures are logged and
    /// never surfaced. Must be called from within a Tokio runtime.
    #[must_use = "drop the handle to detach the purge task"]
    pub fn schedule_purge(&self, key: String) -> JoinHandle<()> {
        let store = self.clone();
        let retention = self.retention();

        tokio::spawn(async move {
            tokio::time::sleep(retention).await;
            match store.delete(&key).await {
                Ok(()) => debug!(key = %key, "purged staged statement"),
                Err(e) => debug!(key = %key, error = %e, "failed to purge staged statement"),
            }
        })
    }

    /// Retention window for staged statements.
    #[must_use]
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.config.retention_secs)
    }

    /// Get the storage provider name.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}

/// Sanitize filename for storage key.
///
/// Only allows ASCII alphanumeric characters, dots, hyphens, and underscores.
fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Extension trait for pipe operator.
trait Pipe: Sized {
    fn pipe<F, R>(self, f: F) -> R
    where
        F: FnOnce(Self) -> R,
    {
        f(self)
    }
}

impl<T> Pipe for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn memory_store() -> StagingStore {
        StagingStore::from_config(StorageConfig::new(StorageProvider::memory()))
            .expect("should create store")
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("statement.xlsx"), "statement.xlsx");
        assert_eq!(sanitize_filename("../etc/passwd"), ".._etc_passwd");
        assert_eq!(sanitize_filename("my file (1).xlsx"), "my_file__1_.xlsx");
    }

    #[test]
    fn test_generate_key_format() {
        let key = StagingStore::generate_key();
        assert!(key.starts_with("cash_flow_"));
        assert!(key.ends_with(".xlsx"));
        // 32 hex digits between prefix and extension.
        assert_eq!(key.len(), "cash_flow_".len() + 32 + ".xlsx".len());
        assert!(StagingStore::validate_key(&key).is_ok());
    }

    #[test]
    fn test_generated_keys_are_time_ordered() {
        let first = StagingStore::generate_key();
        let second = StagingStore::generate_key();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[rstest]
    #[case("")]
    #[case(".env")]
    #[case("../secret.xlsx")]
    #[case("nested/cash_flow.xlsx")]
    #[case("cash flow.xlsx")]
    #[case("..")]
    fn test_validate_key_rejects(#[case] key: &str) {
        let err = StagingStore::validate_key(key).expect_err("key should be rejected");
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_stage_and_fetch() {
        let store = memory_store();
        let staged = store.stage(b"workbook".to_vec()).await.expect("should stage");

        assert_eq!(staged.size, 8);
        assert!(staged.expires_at > Utc::now());
        assert!(store.exists(&staged.key).await);
        assert_eq!(store.fetch(&staged.key).await.expect("should fetch"), b"workbook");
    }

    #[tokio::test]
    async fn test_fetch_missing_is_not_found() {
        let store = memory_store();
        let err = store
            .fetch("cash_flow_missing.xlsx")
            .await
            .expect_err("nothing staged");
        assert!(matches!(err, StorageError::NotFound { ref key } if key == "cash_flow_missing.xlsx"));
    }

    #[tokio::test]
    async fn test_fetch_rejects_traversal() {
        let store = memory_store();
        let err = store.fetch("../Cargo.toml").await.expect_err("unsafe key");
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_statement() {
        let store = memory_store();
        let staged = store.stage(vec![1, 2, 3]).await.expect("should stage");

        store.delete(&staged.key).await.expect("should delete");
        assert!(!store.exists(&staged.key).await);
        // Deleting again is not an error.
        store.delete(&staged.key).await.expect("delete is idempotent");
    }

    #[tokio::test(start_paused = true)]
    async fn test_schedule_purge_after_retention() {
        let store = StagingStore::from_config(
            StorageConfig::new(StorageProvider::memory()).with_retention_secs(300),
        )
        .expect("should create store");
        let staged = store.stage(vec![0; 16]).await.expect("should stage");

        let purge = store.schedule_purge(staged.key.clone());
        tokio::time::sleep(Duration::from_secs(299)).await;
        assert!(store.exists(&staged.key).await);

        purge.await.expect("purge task should finish");
        assert!(!store.exists(&staged.key).await);
    }

    #[tokio::test]
    async fn test_local_fs_round_trip() {
        let root = std::env::temp_dir()
            .join(format!("cashflow-staging-{}", Uuid::now_v7().simple()));
        let store = StagingStore::from_config(StorageConfig::new(StorageProvider::local_fs(&root)))
            .expect("should create store");

        let staged = store.stage(b"xlsx".to_vec()).await.expect("should stage");
        assert!(root.join(&staged.key).exists());
        assert_eq!(store.fetch(&staged.key).await.expect("should fetch"), b"xlsx");

        store.delete(&staged.key).await.expect("should delete");
        let _ = std::fs::remove_dir_all(&root);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Property: Sanitized filename only contains safe characters
    proptest! {
        #[test]
        fn prop_sanitized_filename_safe_chars(filename in ".*") {
            let sanitized = sanitize_filename(&filename);

            for c in sanitized.chars() {
                let is_safe = c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_';
                prop_assert!(is_safe, "Unexpected character in sanitized filename: {}", c);
            }
        }
    }

    // Property: Keys containing a path separator never validate
    proptest! {
        #[test]
        fn prop_keys_with_separators_rejected(
            left in "[a-z0-9_]{0,10}",
            right in "[a-z0-9_]{0,10}",
            sep in prop::sample::select(vec!['/', '\\']),
        ) {
            let key = format!("{left}{sep}{right}");
            prop_assert!(StagingStore::validate_key(&key).is_err());
        }
    }
}
