//! `SQLite`-backed settings blob store.
//!
//! Blobs live in `settings_blobs`, keyed by `(scope, key)`. Diesel is
//! synchronous, so each store operation opens a connection on a blocking task.

use async_trait::async_trait;
use diesel::OptionalExtension;
use diesel::QueryableByName;
use diesel::RunQueryDsl;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Text};
use diesel::sqlite::SqliteConnection;

use crate::devops::error::IntakeError;
use crate::settings::SettingsStore;

use super::PersistenceError;
use super::connection::open_connection;

const SETTINGS_TABLE: &str = "settings_blobs";

/// Settings store persisted in the local database.
#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
    database_url: String,
}

impl SqliteSettingsStore {
    /// Creates a store targeting `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::BlankDatabaseUrl`] when the URL is blank.
    pub fn new(database_url: impl Into<String>) -> Result<Self, PersistenceError> {
        let url = database_url.into();
        if url.trim().is_empty() {
            return Err(PersistenceError::BlankDatabaseUrl);
        }
        Ok(Self { database_url: url })
    }

    /// Reads a blob synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SchemaNotInitialised`] before migrations
    /// have run and [`PersistenceError::QueryFailed`] for other failures.
    pub fn read(&self, scope: &str, key: &str) -> Result<Option<String>, PersistenceError> {
        #[derive(Debug, QueryableByName)]
        struct BlobRow {
            #[diesel(sql_type = Text)]
            value: String,
        }

        let mut connection = open_connection(&self.database_url)?;
        let row: Option<BlobRow> =
            sql_query("SELECT value FROM settings_blobs WHERE scope = ? AND key = ? LIMIT 1;")
                .bind::<Text, _>(scope)
                .bind::<Text, _>(key)
                .get_result(&mut connection)
                .optional()
                .map_err(|error| {
                    classify(&mut connection, &error, |message| {
                        PersistenceError::QueryFailed { message }
                    })
                })?;
        Ok(row.map(|found| found.value))
    }

    /// Inserts or replaces a blob synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::SchemaNotInitialised`] before migrations
    /// have run and [`PersistenceError::WriteFailed`] for other failures.
    pub fn write(&self, scope: &str, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut connection = open_connection(&self.database_url)?;
        sql_query(
            "INSERT INTO settings_blobs (scope, key, value) VALUES (?, ?, ?) \
             ON CONFLICT(scope, key) DO UPDATE SET \
               value = excluded.value, \
               updated_at = CURRENT_TIMESTAMP;",
        )
        .bind::<Text, _>(scope)
        .bind::<Text, _>(key)
        .bind::<Text, _>(value)
        .execute(&mut connection)
        .map(drop)
        .map_err(|error| {
            classify(&mut connection, &error, |message| {
                PersistenceError::WriteFailed { message }
            })
        })
    }

    async fn run_blocking<T, F>(&self, operation: F) -> Result<T, IntakeError>
    where
        T: Send + 'static,
        F: FnOnce(&Self) -> Result<T, PersistenceError> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || operation(&store))
            .await
            .map_err(|error| PersistenceError::TaskFailed {
                message: error.to_string(),
            })
            .and_then(|result| result)
            .map_err(to_intake_error)
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn get(&self, scope: &str, key: &str) -> Result<Option<String>, IntakeError> {
        let owned_scope = scope.to_owned();
        let owned_key = key.to_owned();
        self.run_blocking(move |store| store.read(&owned_scope, &owned_key))
            .await
    }

    async fn set(&self, scope: &str, key: &str, value: &str) -> Result<(), IntakeError> {
        let owned_scope = scope.to_owned();
        let owned_key = key.to_owned();
        let owned_value = value.to_owned();
        self.run_blocking(move |store| store.write(&owned_scope, &owned_key, &owned_value))
            .await
    }
}

fn to_intake_error(error: PersistenceError) -> IntakeError {
    IntakeError::SettingsStore {
        message: error.to_string(),
    }
}

fn table_exists(connection: &mut SqliteConnection) -> Result<bool, diesel::result::Error> {
    #[derive(Debug, QueryableByName)]
    struct PresenceRow {
        #[diesel(sql_type = BigInt)]
        one: i64,
    }

    sql_query("SELECT 1 AS one FROM sqlite_master WHERE type = 'table' AND name = ? LIMIT 1;")
        .bind::<Text, _>(SETTINGS_TABLE)
        .get_result::<PresenceRow>(connection)
        .optional()
        .map(|row| row.is_some_and(|found| found.one == 1))
}

fn classify<F>(
    connection: &mut SqliteConnection,
    error: &diesel::result::Error,
    otherwise: F,
) -> PersistenceError
where
    F: FnOnce(String) -> PersistenceError,
{
    match table_exists(connection) {
        Ok(false) => PersistenceError::SchemaNotInitialised,
        Ok(true) => otherwise(error.to_string()),
        Err(check_error) => otherwise(format!(
            "schema presence check failed: {check_error}; original error: {error}"
        )),
    }
}
