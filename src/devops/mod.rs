//! Azure DevOps intake: addressing, wire models and HTTP gateways.
//!
//! The gateways return raw service records. Shaping them into dashboard rows
//! happens in [`crate::dashboard`]; this layer only knows how to ask Azure
//! DevOps for data and how to map transport failures into [`IntakeError`].

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;

pub use error::IntakeError;
pub use gateway::{
    AzureDevOpsGateway, BuildGateway, BuildReason, IdentityGateway, PullRequestGateway,
    PullRequestQuery, PullRequestStatus, RepositoryGateway,
};
pub use locator::{API_VERSION, PersonalAccessToken, ProjectLocator, ProjectName};
pub use models::{
    BuildResult, BuildStatus, CommentThread, CurrentUser, GitRepository, IdentityRef,
    RawBuild, RawPullRequest, RepositoryRef, ReviewerVote, ThreadStatus,
};
pub use pagination::{PAGE_SIZE, PageCursor, PageOutcome};

#[cfg(test)]
pub use gateway::{
    MockBuildGateway, MockIdentityGateway, MockPullRequestGateway, MockRepositoryGateway,
};

#[cfg(test)]
mod tests;
