//! Database migration operations.

use prboard::persistence::migrate_database;
use prboard::telemetry::StderrJsonlTelemetrySink;
use prboard::{IntakeError, PrboardConfig};

use super::{map_persistence_error, require_database_url};

/// Runs database migrations.
///
/// # Errors
///
/// Returns [`IntakeError::Configuration`] if the database URL is missing or blank.
/// Returns [`IntakeError::Io`] for connection or migration failures.
pub fn run(config: &PrboardConfig) -> Result<(), IntakeError> {
    let database_url = require_database_url(config)?;

    let telemetry = StderrJsonlTelemetrySink;
    migrate_database(database_url, &telemetry)
        .map(drop)
        .map_err(|error| map_persistence_error(&error))
}
