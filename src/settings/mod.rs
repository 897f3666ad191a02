//! Per-user column settings for the dashboard table.
//!
//! Settings travel as an opaque JSON blob keyed by
//! `"{project}-extension-settings"` and scoped to the current user. A blob
//! that is absent, blank or malformed yields the all-enabled defaults so a
//! damaged store never blocks a dashboard load.

mod service;
mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::devops::error::IntakeError;

pub use service::SettingsService;
pub use store::{InMemorySettingsStore, SettingsStore};

/// Table columns that can be switched on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsColumn {
    /// Pull request author.
    Author,
    /// Creation time.
    Created,
    /// Title, id and branches.
    Details,
    /// Repository name.
    Repository,
    /// Open comment thread count.
    Comments,
    /// Latest pull request build.
    BuildStatus,
    /// Current user's vote.
    MyVote,
    /// Reviewer list.
    Reviewers,
}

impl SettingsColumn {
    /// Every column in table order.
    pub const ALL: [Self; 8] = [
        Self::Details,
        Self::Author,
        Self::Created,
        Self::Repository,
        Self::Comments,
        Self::BuildStatus,
        Self::MyVote,
        Self::Reviewers,
    ];

    /// Stable kebab-case name used on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Created => "created",
            Self::Details => "details",
            Self::Repository => "repository",
            Self::Comments => "comments",
            Self::BuildStatus => "build-status",
            Self::MyVote => "my-vote",
            Self::Reviewers => "reviewers",
        }
    }

    /// Column heading shown above the table.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        match self {
            Self::Author => "Author",
            Self::Created => "Created",
            Self::Details => "Details",
            Self::Repository => "Repository",
            Self::Comments => "Comments",
            Self::BuildStatus => "Build Status",
            Self::MyVote => "My Vote",
            Self::Reviewers => "Reviewers",
        }
    }
}

impl fmt::Display for SettingsColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingsColumn {
    type Err = IntakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalised = value.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == normalised)
            .ok_or_else(|| IntakeError::Configuration {
                message: format!("unknown column '{value}'"),
            })
    }
}

/// Column visibility flags persisted per user and project.
///
/// Keys are serialised in `PascalCase` (`AuthorColumnEnabled`, ...). Keys
/// missing from a stored blob default to enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "one flag per table column mirrors the stored blob"
)]
pub struct Settings {
    /// Show the author column.
    pub author_column_enabled: bool,
    /// Show the created column.
    pub created_column_enabled: bool,
    /// Show the details column.
    pub details_column_enabled: bool,
    /// Show the repository column.
    pub repository_column_enabled: bool,
    /// Show the comments column.
    pub comments_column_enabled: bool,
    /// Show the build status column.
    pub build_status_column_enabled: bool,
    /// Show the my vote column.
    pub my_vote_column_enabled: bool,
    /// Show the reviewers column.
    pub reviewers_column_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            author_column_enabled: true,
            created_column_enabled: true,
            details_column_enabled: true,
            repository_column_enabled: true,
            comments_column_enabled: true,
            build_status_column_enabled: true,
            my_vote_column_enabled: true,
            reviewers_column_enabled: true,
        }
    }
}

impl Settings {
    /// Parses a stored blob, falling back to defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use prboard::settings::Settings;
    ///
    /// assert_eq!(Settings::from_blob(None), Settings::default());
    /// assert_eq!(Settings::from_blob(Some("")), Settings::default());
    ///
    /// let stored = Settings::from_blob(Some(r#"{"AuthorColumnEnabled":false}"#));
    /// assert!(!stored.author_column_enabled);
    /// assert!(stored.created_column_enabled);
    /// ```
    #[must_use]
    pub fn from_blob(blob: Option<&str>) -> Self {
        let Some(raw) = blob.filter(|value| !value.trim().is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str(raw) {
            Ok(settings) => settings,
            Err(error) => {
                warn!(%error, "stored settings are malformed; using defaults");
                Self::default()
            }
        }
    }

    /// Serialises the settings into the stored blob format.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::SettingsStore` if serialisation fails.
    pub fn to_blob(&self) -> Result<String, IntakeError> {
        serde_json::to_string(self).map_err(|error| IntakeError::SettingsStore {
            message: format!("serialise settings failed: {error}"),
        })
    }

    /// Whether the column is shown.
    #[must_use]
    pub const fn is_enabled(&self, column: SettingsColumn) -> bool {
        match column {
            SettingsColumn::Author => self.author_column_enabled,
            SettingsColumn::Created => self.created_column_enabled,
            SettingsColumn::Details => self.details_column_enabled,
            SettingsColumn::Repository => self.repository_column_enabled,
            SettingsColumn::Comments => self.comments_column_enabled,
            SettingsColumn::BuildStatus => self.build_status_column_enabled,
            SettingsColumn::MyVote => self.my_vote_column_enabled,
            SettingsColumn::Reviewers => self.reviewers_column_enabled,
        }
    }

    /// Returns a copy with one column switched on or off.
    #[must_use]
    pub const fn with_column(mut self, column: SettingsColumn, enabled: bool) -> Self {
        let flag = match column {
            SettingsColumn::Author => &mut self.author_column_enabled,
            SettingsColumn::Created => &mut self.created_column_enabled,
            SettingsColumn::Details => &mut self.details_column_enabled,
            SettingsColumn::Repository => &mut self.repository_column_enabled,
            SettingsColumn::Comments => &mut self.comments_column_enabled,
            SettingsColumn::BuildStatus => &mut self.build_status_column_enabled,
            SettingsColumn::MyVote => &mut self.my_vote_column_enabled,
            SettingsColumn::Reviewers => &mut self.reviewers_column_enabled,
        };
        *flag = enabled;
        self
    }

    /// Enabled columns in table order.
    pub fn enabled_columns(&self) -> impl Iterator<Item = SettingsColumn> + '_ {
        SettingsColumn::ALL
            .into_iter()
            .filter(|column| self.is_enabled(*column))
    }
}
