//! Builders for raw model fixtures shared by unit and integration tests.
//!
//! The helpers keep fixture construction terse: a pull request needs only an
//! id and an author, everything else takes a stable default that tests can
//! override with the `with_*` methods.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};

use super::{
    BuildResult, BuildStatus, CommentThread, IdentityRef, PULL_REQUEST_NUMBER_TRIGGER_KEY,
    RawBuild, RawPullRequest, RepositoryRef, ReviewerVote, ThreadStatus,
};

/// Fixed timestamp used as the default creation date.
#[must_use]
pub fn fixed_timestamp(offset_minutes: i64) -> DateTime<Utc> {
    let base = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    base + chrono::Duration::minutes(offset_minutes)
}

/// Builds an identity whose display name equals its id.
#[must_use]
pub fn identity(id: &str) -> IdentityRef {
    IdentityRef {
        id: id.to_owned(),
        display_name: id.to_owned(),
    }
}

/// Builder for [`RawPullRequest`] fixtures.
#[derive(Debug, Clone)]
pub struct PullRequestBuilder {
    pull_request: RawPullRequest,
}

impl PullRequestBuilder {
    /// Starts a non-draft pull request in repository `core`.
    #[must_use]
    pub fn new(id: u32, author_id: &str) -> Self {
        Self {
            pull_request: RawPullRequest {
                id,
                author: identity(author_id),
                creation_date: fixed_timestamp(i64::from(id)),
                title: format!("Pull request {id}"),
                is_draft: false,
                source_ref_name: format!("refs/heads/feature/{id}"),
                target_ref_name: "refs/heads/main".to_owned(),
                repository: RepositoryRef {
                    id: "repo-core".to_owned(),
                    name: "core".to_owned(),
                },
                reviewers: Vec::new(),
                url: format!("https://example.invalid/pullRequests/{id}"),
            },
        }
    }

    /// Marks the pull request as a draft.
    #[must_use]
    pub const fn draft(mut self) -> Self {
        self.pull_request.is_draft = true;
        self
    }

    /// Overrides the title.
    #[must_use]
    pub fn with_title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.pull_request.title);
        self
    }

    /// Overrides the author display name.
    #[must_use]
    pub fn with_author_name(mut self, display_name: &str) -> Self {
        display_name.clone_into(&mut self.pull_request.author.display_name);
        self
    }

    /// Overrides the owning repository.
    #[must_use]
    pub fn in_repository(mut self, id: &str, name: &str) -> Self {
        self.pull_request.repository = RepositoryRef {
            id: id.to_owned(),
            name: name.to_owned(),
        };
        self
    }

    /// Overrides the source and target refs.
    #[must_use]
    pub fn with_refs(mut self, source: &str, target: &str) -> Self {
        source.clone_into(&mut self.pull_request.source_ref_name);
        target.clone_into(&mut self.pull_request.target_ref_name);
        self
    }

    /// Overrides the creation date.
    #[must_use]
    pub const fn created_at(mut self, creation_date: DateTime<Utc>) -> Self {
        self.pull_request.creation_date = creation_date;
        self
    }

    /// Adds a reviewer with the given vote code.
    #[must_use]
    pub fn with_reviewer(mut self, reviewer_id: &str, vote: i32) -> Self {
        self.pull_request.reviewers.push(ReviewerVote {
            identity: identity(reviewer_id),
            vote,
            is_required: false,
        });
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> RawPullRequest {
        self.pull_request
    }
}

/// Completed, successful build triggered by pull request `pr_number`.
#[must_use]
pub fn build_for_pull_request(id: u64, pr_number: &str) -> RawBuild {
    RawBuild {
        id,
        build_number: Some(format!("build-{id}")),
        status: Some(BuildStatus::Completed),
        result: Some(BuildResult::Succeeded),
        trigger_info: HashMap::from([(
            PULL_REQUEST_NUMBER_TRIGGER_KEY.to_owned(),
            pr_number.to_owned(),
        )]),
    }
}

/// Review thread with the given deletion flag and status.
#[must_use]
pub const fn thread(id: u64, is_deleted: bool, status: Option<ThreadStatus>) -> CommentThread {
    CommentThread {
        id,
        is_deleted,
        status,
    }
}

/// Active, non-deleted review thread.
#[must_use]
pub const fn open_thread(id: u64) -> CommentThread {
    thread(id, false, Some(ThreadStatus::Active))
}
