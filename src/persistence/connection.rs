//! Connection setup shared by the migrator and the settings store.

use std::time::Duration;

use diesel::Connection;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sqlite::SqliteConnection;

use super::PersistenceError;

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a connection and applies the pragmas every caller relies on.
///
/// # Errors
///
/// Returns [`PersistenceError::BlankDatabaseUrl`] for a blank URL,
/// [`PersistenceError::ConnectionFailed`] when `SQLite` cannot open the
/// database, and [`PersistenceError::PragmaFailed`] when configuration fails.
pub(super) fn open_connection(database_url: &str) -> Result<SqliteConnection, PersistenceError> {
    let trimmed = database_url.trim();
    if trimmed.is_empty() {
        return Err(PersistenceError::BlankDatabaseUrl);
    }

    let mut connection =
        SqliteConnection::establish(trimmed).map_err(|error| PersistenceError::ConnectionFailed {
            message: error.to_string(),
        })?;

    sql_query(format!("PRAGMA busy_timeout = {};", BUSY_TIMEOUT.as_millis()))
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| PersistenceError::PragmaFailed {
            message: error.to_string(),
        })?;

    Ok(connection)
}
