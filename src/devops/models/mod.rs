//! Data models for pull requests, builds, and review threads.
//!
//! Types prefixed with `Api` are internal deserialisation targets matching the
//! Azure DevOps REST payloads; they convert into the public `Raw*` types that
//! the dashboard pipeline consumes. Raw values are immutable snapshots of the
//! remote service for a single dashboard load.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Trigger metadata key carrying the originating pull request number.
pub const PULL_REQUEST_NUMBER_TRIGGER_KEY: &str = "pr.number";

/// Identity of a user as reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityRef {
    /// Stable identity id (a GUID string).
    pub id: String,
    /// Human readable display name.
    pub display_name: String,
}

/// Repository owning a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository id (a GUID string).
    pub id: String,
    /// Repository name.
    pub name: String,
}

/// Reviewer entry with its numeric vote code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewerVote {
    /// Reviewer identity.
    pub identity: IdentityRef,
    /// Vote code (10, 5, 0, -5, -10).
    pub vote: i32,
    /// Whether the reviewer is required by policy.
    pub is_required: bool,
}

/// Pull request exactly as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPullRequest {
    /// Pull request id, unique within the project.
    pub id: u32,
    /// Author identity.
    pub author: IdentityRef,
    /// Creation timestamp.
    pub creation_date: DateTime<Utc>,
    /// Title.
    pub title: String,
    /// Whether the author marked the pull request as a draft.
    pub is_draft: bool,
    /// Source ref, e.g. `refs/heads/feature/x`.
    pub source_ref_name: String,
    /// Target ref, e.g. `refs/heads/main`.
    pub target_ref_name: String,
    /// Owning repository.
    pub repository: RepositoryRef,
    /// Reviewers and their votes.
    pub reviewers: Vec<ReviewerVote>,
    /// Canonical service link.
    pub url: String,
}

/// Lifecycle state of a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildStatus {
    /// No status reported.
    None,
    /// The build is running.
    InProgress,
    /// The build has finished.
    Completed,
    /// The build is being cancelled.
    Cancelling,
    /// The build was postponed.
    Postponed,
    /// The build is queued but not started.
    NotStarted,
    /// Any value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Outcome of a completed build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BuildResult {
    /// No result reported.
    None,
    /// All steps succeeded.
    Succeeded,
    /// Some steps failed but the build continued.
    PartiallySucceeded,
    /// The build failed.
    Failed,
    /// The build was cancelled.
    Canceled,
    /// Any value this client does not recognise.
    #[serde(other)]
    Unknown,
}

/// Build run as listed by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawBuild {
    /// Build id.
    pub id: u64,
    /// Human readable build number.
    pub build_number: Option<String>,
    /// Lifecycle state.
    pub status: Option<BuildStatus>,
    /// Outcome when completed.
    pub result: Option<BuildResult>,
    /// Trigger metadata describing what queued the build.
    pub trigger_info: HashMap<String, String>,
}

impl RawBuild {
    /// Pull request number recorded in the trigger metadata, if any.
    #[must_use]
    pub fn pull_request_number(&self) -> Option<&str> {
        self.trigger_info
            .get(PULL_REQUEST_NUMBER_TRIGGER_KEY)
            .map(String::as_str)
    }
}

/// Status of a review thread.
///
/// `Unknown` is the service's zero value and counts as "no status". Any
/// other string the client does not recognise still counts as set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ThreadStatus {
    /// Zero value.
    Unknown,
    /// Open discussion.
    Active,
    /// Resolved as fixed.
    Fixed,
    /// Resolved as won't fix.
    WontFix,
    /// Closed.
    Closed,
    /// Resolved as by design.
    ByDesign,
    /// Pending.
    Pending,
    /// A non-empty status this client does not recognise.
    #[serde(other)]
    Unrecognised,
}

impl ThreadStatus {
    /// Returns true for every status except the zero value.
    #[must_use]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// Review thread attached to a pull request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentThread {
    /// Thread id.
    pub id: u64,
    /// Whether the thread was deleted.
    pub is_deleted: bool,
    /// Thread status; system threads carry none.
    pub status: Option<ThreadStatus>,
}

impl CommentThread {
    /// A thread is open when it is not deleted and carries a status.
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.is_deleted && self.status.is_some_and(ThreadStatus::is_set)
    }
}

/// Git repository in the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitRepository {
    /// Repository id.
    pub id: String,
    /// Repository name.
    pub name: String,
    /// Browsable URL when reported.
    pub web_url: Option<String>,
}

/// Identity the token authenticates as.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentUser {
    /// Identity id compared against reviewer and author ids.
    pub id: String,
    /// Display name.
    pub display_name: String,
}

/// Collection envelope used by list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiList<T> {
    pub(crate) value: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiIdentity {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRepositoryRef {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) web_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiReviewer {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) display_name: Option<String>,
    #[serde(default)]
    pub(crate) vote: i32,
    #[serde(default)]
    pub(crate) is_required: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiPullRequest {
    pub(crate) pull_request_id: u32,
    pub(crate) created_by: ApiIdentity,
    pub(crate) creation_date: DateTime<Utc>,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) is_draft: bool,
    pub(crate) source_ref_name: String,
    pub(crate) target_ref_name: String,
    pub(crate) repository: ApiRepositoryRef,
    #[serde(default)]
    pub(crate) reviewers: Vec<ApiReviewer>,
    #[serde(default)]
    pub(crate) url: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiBuild {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) build_number: Option<String>,
    #[serde(default)]
    pub(crate) status: Option<BuildStatus>,
    #[serde(default)]
    pub(crate) result: Option<BuildResult>,
    #[serde(default)]
    pub(crate) trigger_info: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiCommentThread {
    pub(crate) id: u64,
    #[serde(default)]
    pub(crate) is_deleted: bool,
    #[serde(default)]
    pub(crate) status: Option<ThreadStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiConnectionData {
    pub(crate) authenticated_user: ApiAuthenticatedUser,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiAuthenticatedUser {
    pub(crate) id: String,
    #[serde(default)]
    pub(crate) provider_display_name: Option<String>,
    #[serde(default)]
    pub(crate) custom_display_name: Option<String>,
}

impl From<ApiIdentity> for IdentityRef {
    fn from(value: ApiIdentity) -> Self {
        Self {
            id: value.id,
            display_name: value.display_name.unwrap_or_default(),
        }
    }
}

impl From<ApiRepositoryRef> for RepositoryRef {
    fn from(value: ApiRepositoryRef) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

impl From<ApiRepositoryRef> for GitRepository {
    fn from(value: ApiRepositoryRef) -> Self {
        Self {
            id: value.id,
            name: value.name,
            web_url: value.web_url,
        }
    }
}

impl From<ApiReviewer> for ReviewerVote {
    fn from(value: ApiReviewer) -> Self {
        Self {
            identity: IdentityRef {
                id: value.id,
                display_name: value.display_name.unwrap_or_default(),
            },
            vote: value.vote,
            is_required: value.is_required,
        }
    }
}

impl From<ApiPullRequest> for RawPullRequest {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            id: value.pull_request_id,
            author: value.created_by.into(),
            creation_date: value.creation_date,
            title: value.title,
            is_draft: value.is_draft,
            source_ref_name: value.source_ref_name,
            target_ref_name: value.target_ref_name,
            repository: value.repository.into(),
            reviewers: value.reviewers.into_iter().map(ReviewerVote::from).collect(),
            url: value.url,
        }
    }
}

impl From<ApiBuild> for RawBuild {
    fn from(value: ApiBuild) -> Self {
        Self {
            id: value.id,
            build_number: value.build_number,
            status: value.status,
            result: value.result,
            trigger_info: value.trigger_info,
        }
    }
}

impl From<ApiCommentThread> for CommentThread {
    fn from(value: ApiCommentThread) -> Self {
        Self {
            id: value.id,
            is_deleted: value.is_deleted,
            status: value.status,
        }
    }
}

impl From<ApiConnectionData> for CurrentUser {
    fn from(value: ApiConnectionData) -> Self {
        let user = value.authenticated_user;
        let display_name = user
            .custom_display_name
            .or(user.provider_display_name)
            .unwrap_or_default();
        Self {
            id: user.id,
            display_name,
        }
    }
}
