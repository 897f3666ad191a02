//! CLI operation mode handlers.
//!
//! - [`dashboard`]: Load and print the pull request dashboard
//! - [`migrations`]: Database schema migrations
//! - [`settings`]: Toggle stored column settings
//!
//! Output formatting utilities are in [`output`].

use prboard::persistence::{PersistenceError, SqliteSettingsStore};
use prboard::{
    AzureDevOpsGateway, InMemorySettingsStore, IntakeError, PrboardConfig, SettingsStore,
};

pub mod dashboard;
pub mod migrations;
pub mod output;
pub mod settings;

/// Builds the HTTP gateway from the configured token and timeout.
///
/// # Errors
///
/// Returns [`IntakeError::MissingToken`] when no token is configured, or
/// [`IntakeError::Configuration`] for a zero timeout.
pub fn build_gateway(config: &PrboardConfig) -> Result<AzureDevOpsGateway, IntakeError> {
    let token = config.resolve_token()?;
    AzureDevOpsGateway::for_token(&token, config.request_timeout()?)
}

/// Opens the settings store: the local database when configured, otherwise
/// an in-memory store that lives for this run only.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] for a blank database URL.
pub fn open_settings_store(
    config: &PrboardConfig,
) -> Result<Box<dyn SettingsStore>, IntakeError> {
    let Some(url) = config.database_url.as_deref() else {
        return Ok(Box::new(InMemorySettingsStore::new()));
    };
    let store = SqliteSettingsStore::new(url).map_err(|error| map_persistence_error(&error))?;
    Ok(Box::new(store))
}

/// Maps a persistence error to an intake error.
///
/// Configuration-related errors (blank URL) become [`IntakeError::Configuration`],
/// while runtime errors (connection, migration, query failures) become
/// [`IntakeError::Io`].
#[must_use]
pub fn map_persistence_error(error: &PersistenceError) -> IntakeError {
    if is_configuration_error(error) {
        IntakeError::Configuration {
            message: error.to_string(),
        }
    } else {
        IntakeError::Io {
            message: error.to_string(),
        }
    }
}

/// Returns true if the persistence error is a configuration problem.
#[must_use]
pub const fn is_configuration_error(error: &PersistenceError) -> bool {
    matches!(error, PersistenceError::BlankDatabaseUrl)
}

/// Returns the configured database URL or the "required" error.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] when no database URL is set.
pub fn require_database_url(config: &PrboardConfig) -> Result<&str, IntakeError> {
    config
        .database_url
        .as_deref()
        .ok_or_else(|| IntakeError::Configuration {
            message: PersistenceError::MissingDatabaseUrl.to_string(),
        })
}
