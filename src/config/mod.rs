//! Application configuration loaded from CLI, environment, and files.
//!
//! Values are merged with ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.prboard.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `PRBOARD_ORGANIZATION_URL`,
//!    `PRBOARD_TOKEN`, or the Azure CLI's `AZURE_DEVOPS_EXT_PAT`
//! 4. **Command-line arguments** – `--organization-url`, `--project`/`-p`,
//!    `--token`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! organization_url = "https://dev.azure.com/contoso"
//! project = "Fabrikam"
//! token = "example-pat"
//! database_url = "prboard.sqlite"
//! sort_column = "created"
//! sort_descending = true
//! ```

use std::env;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::dashboard::{RecordFilter, SortSpec, Tab};
use crate::devops::error::IntakeError;
use crate::devops::locator::{PersonalAccessToken, ProjectLocator};
use crate::devops::models::CurrentUser;
use crate::settings::SettingsColumn;

/// Environment variable read by the Azure DevOps CLI extension.
pub const AZURE_DEVOPS_PAT_ENV: &str = "AZURE_DEVOPS_EXT_PAT";

const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Apply pending schema migrations and exit.
    MigrateDatabase,
    /// Toggle stored column settings and exit.
    UpdateSettings,
    /// Load and print the dashboard.
    Dashboard,
}

/// Output format of the dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// One JSON object per record.
    JsonLines,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Example
///
/// ```no_run
/// use prboard::PrboardConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = PrboardConfig::load().expect("failed to load configuration");
/// let locator = config.require_locator().expect("organisation and project required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PRBOARD",
    discovery(
        dotfile_name = ".prboard.toml",
        config_file_name = "prboard.toml",
        app_name = "prboard"
    )
)]
pub struct PrboardConfig {
    /// Organisation or collection URL, e.g. `https://dev.azure.com/contoso`.
    ///
    /// Can be provided via:
    /// - CLI: `--organization-url <URL>` or `-o <URL>`
    /// - Environment: `PRBOARD_ORGANIZATION_URL`
    /// - Config file: `organization_url = "..."`
    #[ortho_config(cli_short = 'o')]
    pub organization_url: Option<String>,

    /// Project whose pull requests are listed.
    #[ortho_config(cli_short = 'p')]
    pub project: Option<String>,

    /// Personal access token used for HTTP basic authentication.
    ///
    /// Can be provided via:
    /// - CLI: `--token <TOKEN>` or `-t <TOKEN>`
    /// - Environment: `PRBOARD_TOKEN` or `AZURE_DEVOPS_EXT_PAT`
    /// - Config file: `token = "..."`
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Identity id of the current user. Looked up from the service when unset.
    #[ortho_config()]
    pub user_id: Option<String>,

    /// Display name paired with `user_id`.
    #[ortho_config()]
    pub user_name: Option<String>,

    /// Local `SQLite` database URL/path holding settings blobs.
    ///
    /// Without it, settings live in process memory for the run.
    #[ortho_config()]
    pub database_url: Option<String>,

    /// Runs database migrations and exits.
    ///
    /// Note: `PRBOARD_MIGRATE_DB` is not supported because `ortho_config`
    /// does not load boolean values from the environment.
    #[ortho_config()]
    pub migrate_db: bool,

    /// Tab to print: `active` or `drafts`.
    #[ortho_config(cli_short = 'T')]
    pub tab: Option<String>,

    /// Column to sort on (`details`, `author`, `created`, ...).
    #[ortho_config(cli_short = 's')]
    pub sort_column: Option<String>,

    /// Sorts descending instead of ascending.
    #[ortho_config(cli_short = 'D')]
    pub sort_descending: bool,

    /// Keyword filter over title, author, repository, branches and id.
    #[ortho_config(cli_short = 'k')]
    pub keyword: Option<String>,

    /// Comma-separated repository names to keep.
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Output format: `table` or `jsonl`.
    #[ortho_config(cli_short = 'f')]
    pub format: Option<String>,

    /// Comma-separated columns to switch on in the stored settings.
    #[ortho_config()]
    pub enable_column: Option<String>,

    /// Comma-separated columns to switch off in the stored settings.
    #[ortho_config()]
    pub disable_column: Option<String>,

    /// Per-request HTTP timeout, in seconds. Defaults to 30.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for PrboardConfig {
    fn default() -> Self {
        Self {
            organization_url: None,
            project: None,
            token: None,
            user_id: None,
            user_name: None,
            database_url: None,
            migrate_db: false,
            tab: None,
            sort_column: None,
            sort_descending: false,
            keyword: None,
            repository: None,
            format: None,
            enable_column: None,
            disable_column: None,
            request_timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECONDS,
        }
    }
}

impl PrboardConfig {
    /// Determines the operation mode.
    ///
    /// Migration wins over everything else; any column toggle selects
    /// `UpdateSettings`; otherwise the dashboard is shown.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.migrate_db {
            OperationMode::MigrateDatabase
        } else if self.enable_column.is_some() || self.disable_column.is_some() {
            OperationMode::UpdateSettings
        } else {
            OperationMode::Dashboard
        }
    }

    /// Builds the project locator from the organisation URL and project.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingOrganizationUrl`],
    /// [`IntakeError::MissingProject`] or [`IntakeError::InvalidUrl`].
    pub fn require_locator(&self) -> Result<ProjectLocator, IntakeError> {
        let organization_url = self
            .organization_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(IntakeError::MissingOrganizationUrl)?;
        let project = self
            .project
            .as_deref()
            .ok_or(IntakeError::MissingProject)?;
        ProjectLocator::new(organization_url, project)
    }

    /// Resolves the token from configuration or `AZURE_DEVOPS_EXT_PAT`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingToken`] when no source provides a
    /// non-blank value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, IntakeError> {
        let raw = self
            .token
            .clone()
            .or_else(|| env::var(AZURE_DEVOPS_PAT_ENV).ok())
            .ok_or(IntakeError::MissingToken)?;
        PersonalAccessToken::new(raw)
    }

    /// Identity configured explicitly, if `user_id` is set.
    ///
    /// The display name falls back to the id.
    #[must_use]
    pub fn configured_user(&self) -> Option<CurrentUser> {
        let id = self.user_id.as_deref().map(str::trim)?;
        if id.is_empty() {
            return None;
        }
        let display_name = self
            .user_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(id);
        Some(CurrentUser {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
        })
    }

    /// Selected tab, `Active` by default.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for unknown tab names.
    pub fn tab(&self) -> Result<Tab, IntakeError> {
        self.tab
            .as_deref()
            .map_or(Ok(Tab::Active), str::parse::<Tab>)
    }

    /// Requested sort, if a column was named.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for unknown column names.
    pub fn sort_spec(&self) -> Result<Option<SortSpec>, IntakeError> {
        let Some(name) = self.sort_column.as_deref() else {
            return Ok(None);
        };
        let column: SettingsColumn = name.parse()?;
        Ok(Some(if self.sort_descending {
            SortSpec::descending(column)
        } else {
            SortSpec::ascending(column)
        }))
    }

    /// Filter built from `keyword` and `repository`.
    #[must_use]
    pub fn filter(&self) -> RecordFilter {
        let with_keyword = self
            .keyword
            .as_deref()
            .map_or_else(RecordFilter::new, |keyword| {
                RecordFilter::new().with_keyword(keyword)
            });
        split_list(self.repository.as_deref())
            .fold(with_keyword, |filter, name| filter.with_repository(name))
    }

    /// Output format, `table` by default.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for unknown formats.
    pub fn output_format(&self) -> Result<OutputFormat, IntakeError> {
        match self
            .format
            .as_deref()
            .map(|value| value.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("table") => Ok(OutputFormat::Table),
            Some("jsonl" | "json-lines") => Ok(OutputFormat::JsonLines),
            Some(other) => Err(IntakeError::Configuration {
                message: format!("unknown output format '{other}' (expected 'table' or 'jsonl')"),
            }),
        }
    }

    /// Column toggles requested via `enable_column` and `disable_column`.
    ///
    /// Enables are listed first, so a column named in both ends up disabled.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] for unknown column names.
    pub fn column_changes(&self) -> Result<Vec<(SettingsColumn, bool)>, IntakeError> {
        let enabled = split_list(self.enable_column.as_deref()).map(|name| (name, true));
        let disabled = split_list(self.disable_column.as_deref()).map(|name| (name, false));
        enabled
            .chain(disabled)
            .map(|(name, flag)| name.parse().map(|column| (column, flag)))
            .collect()
    }

    /// Per-request HTTP timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Configuration`] when the timeout is zero.
    pub fn request_timeout(&self) -> Result<Duration, IntakeError> {
        if self.request_timeout_seconds == 0 {
            return Err(IntakeError::Configuration {
                message: "request timeout must be at least one second".to_owned(),
            });
        }
        Ok(Duration::from_secs(self.request_timeout_seconds))
    }
}

fn split_list(value: Option<&str>) -> impl Iterator<Item = &str> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests;
