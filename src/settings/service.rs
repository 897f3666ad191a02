//! Loading and saving settings for one user and project.

use tracing::debug;

use crate::devops::error::IntakeError;
use crate::devops::locator::ProjectName;
use crate::devops::models::CurrentUser;

use super::store::SettingsStore;
use super::{Settings, SettingsColumn};

/// Reads and writes [`Settings`] through a [`SettingsStore`].
pub struct SettingsService<'a> {
    store: &'a dyn SettingsStore,
}

impl<'a> SettingsService<'a> {
    /// Creates a service over the given store.
    #[must_use]
    pub const fn new(store: &'a dyn SettingsStore) -> Self {
        Self { store }
    }

    /// Loads the user's settings for a project.
    ///
    /// Absent, blank and malformed blobs all resolve to the defaults.
    ///
    /// # Errors
    ///
    /// Propagates store failures; these are fatal to a dashboard load.
    pub async fn load(
        &self,
        user: &CurrentUser,
        project: &ProjectName,
    ) -> Result<Settings, IntakeError> {
        let key = project.settings_key();
        let blob = self.store.get(&user.id, &key).await?;
        debug!(key, present = blob.is_some(), "loaded settings blob");
        Ok(Settings::from_blob(blob.as_deref()))
    }

    /// Saves the user's settings for a project.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::SettingsStore` if the store rejects the write.
    pub async fn save(
        &self,
        user: &CurrentUser,
        project: &ProjectName,
        settings: &Settings,
    ) -> Result<(), IntakeError> {
        let blob = settings.to_blob()?;
        self.store
            .set(&user.id, &project.settings_key(), &blob)
            .await
    }

    /// Applies column toggles on top of the stored settings and saves them.
    ///
    /// # Errors
    ///
    /// Propagates load and save failures.
    pub async fn update(
        &self,
        user: &CurrentUser,
        project: &ProjectName,
        changes: &[(SettingsColumn, bool)],
    ) -> Result<Settings, IntakeError> {
        let current = self.load(user, project).await?;
        let updated = changes
            .iter()
            .fold(current, |settings, &(column, enabled)| {
                settings.with_column(column, enabled)
            });
        self.save(user, project, &updated).await?;
        Ok(updated)
    }
}
