//! Query parameter types for gateway operations.

use crate::devops::pagination::PAGE_SIZE;

/// Pull request status filter for listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PullRequestStatus {
    /// Only active pull requests.
    #[default]
    Active,
}

impl PullRequestStatus {
    /// Returns the API parameter value for this status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

/// One page of the project-wide pull request listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PullRequestQuery {
    /// Status filter.
    pub status: PullRequestStatus,
    /// Number of items to skip.
    pub skip: u32,
    /// Maximum number of items to return.
    pub top: u32,
}

impl PullRequestQuery {
    /// Active pull requests starting at `skip`, using the fixed page size.
    #[must_use]
    pub const fn active_page(skip: u32) -> Self {
        Self {
            status: PullRequestStatus::Active,
            skip,
            top: PAGE_SIZE,
        }
    }
}

impl Default for PullRequestQuery {
    fn default() -> Self {
        Self::active_page(0)
    }
}

/// Reason a build was queued, used to filter the build listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildReason {
    /// Builds queued by a pull request policy.
    #[default]
    PullRequest,
}

impl BuildReason {
    /// Returns the API parameter value for this reason.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PullRequest => "pullRequest",
        }
    }
}
