//! Column settings update operation.

use std::io::{self, Write};

use prboard::dashboard::resolve_current_user;
use prboard::devops::IdentityGateway;
use prboard::persistence::SqliteSettingsStore;
use prboard::{IntakeError, PrboardConfig, SettingsService, SettingsStore};

use super::output::write_settings_summary;
use super::{build_gateway, map_persistence_error, require_database_url};

/// Applies the requested column toggles to the stored settings.
///
/// Settings only outlive the process when they are written to the local
/// database, so a database URL is required.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] if the database URL is missing or a
/// column name is unknown, and store or identity failures otherwise.
pub async fn run(config: &PrboardConfig) -> Result<(), IntakeError> {
    let database_url = require_database_url(config)?;
    let store =
        SqliteSettingsStore::new(database_url).map_err(|error| map_persistence_error(&error))?;
    let gateway = build_gateway(config)?;
    let mut stdout = io::stdout().lock();
    run_with_store(config, &gateway, &store, &mut stdout).await
}

/// Applies the toggles using the given collaborators.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_store<W: Write>(
    config: &PrboardConfig,
    identity: &dyn IdentityGateway,
    store: &dyn SettingsStore,
    writer: &mut W,
) -> Result<(), IntakeError> {
    let changes = config.column_changes()?;
    let locator = config.require_locator()?;
    let user = resolve_current_user(config.configured_user(), identity, &locator).await?;

    let updated = SettingsService::new(store)
        .update(&user, locator.project(), &changes)
        .await?;
    write_settings_summary(writer, locator.project().as_str(), &updated)
}
