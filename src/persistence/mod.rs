//! Local persistence and database migrations.
//!
//! Per-user column settings can be kept in a local `SQLite` database instead
//! of process memory. The schema is managed with Diesel migrations so the
//! database can be created and upgraded consistently across machines.

mod connection;
mod error;
mod migrator;
mod settings_blob;

pub use error::PersistenceError;
pub use migrator::{
    CURRENT_SCHEMA_VERSION, INITIAL_SCHEMA_VERSION, MIGRATIONS, SchemaVersion, migrate_database,
};
pub use settings_blob::SqliteSettingsStore;
