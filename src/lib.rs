//! prboard library crate: a project-wide Azure DevOps pull request dashboard.
//!
//! The library drains the paginated pull request listing, matches each pull
//! request with its latest build, counts open review threads, and projects
//! the result into an immutable snapshot that can be sorted, split into the
//! Active and Drafts tabs, and filtered. Per-user column settings are kept in
//! a pluggable store, optionally backed by a local `SQLite` database.

pub mod config;
pub mod dashboard;
pub mod devops;
pub mod persistence;
pub mod settings;
pub mod telemetry;

pub use config::{OperationMode, OutputFormat, PrboardConfig};
pub use dashboard::{
    Dashboard, DashboardLoader, DashboardSnapshot, DashboardSources, DisplayRecord, RecordFilter,
    SortSpec, Tab,
};
pub use devops::{AzureDevOpsGateway, IntakeError, PersonalAccessToken, ProjectLocator};
pub use settings::{
    InMemorySettingsStore, Settings, SettingsColumn, SettingsService, SettingsStore,
};
