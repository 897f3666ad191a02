//! Key-value blob stores holding serialised settings.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::devops::error::IntakeError;

/// Opaque string blob storage keyed by `(scope, key)`.
///
/// The scope is the identity the blob belongs to; the dashboard uses the
/// current user's id so settings are per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the blob stored under `key`, if any.
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, IntakeError>;

    /// Replace the blob stored under `key`.
    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), IntakeError>;
}

/// Process-local store used when no database is configured.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    entries: Mutex<HashMap<(String, String), String>>,
}

impl InMemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> IntakeError {
        IntakeError::SettingsStore {
            message: "in-memory settings store lock poisoned".to_owned(),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, IntakeError> {
        let entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        Ok(entries
            .get(&(scope.to_owned(), key.to_owned()))
            .cloned())
    }

    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), IntakeError> {
        let mut entries = self.entries.lock().map_err(|_| Self::poisoned())?;
        entries.insert((scope.to_owned(), key.to_owned()), value.to_owned());
        Ok(())
    }
}
