//! Gateways for loading dashboard data from Azure DevOps.
//!
//! Each concern is a separate trait so the dashboard loader can be exercised
//! with mocks while [`AzureDevOpsGateway`] handles the real HTTP requests.

mod azure;
mod client;
mod error_mapping;
mod http_utils;
mod types;

pub use azure::AzureDevOpsGateway;
pub use types::{BuildReason, PullRequestQuery, PullRequestStatus};

use async_trait::async_trait;

use crate::devops::error::IntakeError;
use crate::devops::locator::ProjectLocator;
use crate::devops::models::{CommentThread, CurrentUser, GitRepository, RawBuild, RawPullRequest};

/// Gateway that can load pull request data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestGateway: Send + Sync {
    /// Fetch one page of the project-wide pull request listing.
    async fn list_pull_requests(
        &self,
        locator: &ProjectLocator,
        query: &PullRequestQuery,
    ) -> Result<Vec<RawPullRequest>, IntakeError>;

    /// Fetch every comment thread of one pull request.
    async fn comment_threads(
        &self,
        locator: &ProjectLocator,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Vec<CommentThread>, IntakeError>;
}

/// Gateway for the project's build history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BuildGateway: Send + Sync {
    /// List builds queued for the given reason, in the service's order.
    async fn list_builds(
        &self,
        locator: &ProjectLocator,
        reason: BuildReason,
    ) -> Result<Vec<RawBuild>, IntakeError>;
}

/// Gateway for the project's Git repositories.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryGateway: Send + Sync {
    /// List every Git repository in the project.
    async fn list_repositories(
        &self,
        locator: &ProjectLocator,
    ) -> Result<Vec<GitRepository>, IntakeError>;
}

/// Gateway that resolves the identity behind the token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Resolve the authenticated user.
    async fn current_user(&self, locator: &ProjectLocator) -> Result<CurrentUser, IntakeError>;
}

#[cfg(test)]
mod tests;
