//! Presentation state for the latest pull request build.

use crate::devops::models::{BuildResult, BuildStatus, RawBuild};

/// Build state shown in the dashboard's build column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BuildStatusView {
    /// No build was queued for the pull request.
    #[default]
    NoBuild,
    /// Completed successfully.
    Succeeded,
    /// Completed with failures, or completed without a result.
    Failed,
    /// Completed with warnings or failed optional steps.
    PartiallySucceeded,
    /// Currently running.
    InProgress,
    /// Queued or postponed.
    NotStarted,
    /// Cancelled or being cancelled.
    Cancelled,
}

impl BuildStatusView {
    /// Derives the view from the correlated build, if any.
    ///
    /// A completed build with no result is treated as failed.
    #[must_use]
    pub const fn from_build(build: Option<&RawBuild>) -> Self {
        let Some(found) = build else {
            return Self::NoBuild;
        };
        match found.status {
            Some(BuildStatus::Completed) => Self::from_result(found.result),
            Some(BuildStatus::InProgress) => Self::InProgress,
            Some(BuildStatus::Cancelling) => Self::Cancelled,
            Some(
                BuildStatus::NotStarted
                | BuildStatus::Postponed
                | BuildStatus::None
                | BuildStatus::Unknown,
            )
            | None => Self::NotStarted,
        }
    }

    const fn from_result(result: Option<BuildResult>) -> Self {
        match result {
            Some(BuildResult::Succeeded) => Self::Succeeded,
            Some(BuildResult::PartiallySucceeded) => Self::PartiallySucceeded,
            Some(BuildResult::Canceled) => Self::Cancelled,
            Some(BuildResult::Failed | BuildResult::None | BuildResult::Unknown) | None => {
                Self::Failed
            }
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NoBuild => "No Build",
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::PartiallySucceeded => "Partially Succeeded",
            Self::InProgress => "In Progress",
            Self::NotStarted => "Not Started",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Icon name understood by the host's icon font.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::NoBuild => "Blocked2",
            Self::Succeeded => "StatusCircleCheckmark",
            Self::Failed => "StatusCircleErrorX",
            Self::PartiallySucceeded => "StatusCircleExclamation",
            Self::InProgress => "StatusCircleRing",
            Self::NotStarted => "StatusCircleQuestionMark",
            Self::Cancelled => "StatusCircleBlock",
        }
    }
}
