//! Projection of raw service records into dashboard rows.

use chrono::{DateTime, Utc};
use url::Url;

use crate::devops::models::{
    CommentThread, CurrentUser, IdentityRef, RawBuild, RawPullRequest, RepositoryRef, ReviewerVote,
};

use super::build_status::BuildStatusView;
use super::vote::{NO_VOTE_CODE, VoteStatus};

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// One row of the dashboard. Never mutated after projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRecord {
    /// Pull request id.
    pub id: u32,
    /// Whether the pull request is a draft.
    pub is_draft: bool,
    /// Author identity.
    pub author: IdentityRef,
    /// Creation timestamp.
    pub creation_date: DateTime<Utc>,
    /// Title.
    pub title: String,
    /// Repository the pull request targets.
    pub repository: RepositoryRef,
    /// Source branch without the `refs/heads/` prefix.
    pub base_branch: String,
    /// Target branch without the `refs/heads/` prefix.
    pub target_branch: String,
    /// Current user's vote.
    pub vote: VoteStatus,
    /// Latest matching build state.
    pub build_status: BuildStatusView,
    /// Id of the matched build, if any.
    pub build_id: Option<u64>,
    /// Every reviewer with their vote.
    pub reviewers: Vec<ReviewerVote>,
    /// Open review threads.
    pub open_threads: Vec<CommentThread>,
    /// REST URL of the pull request.
    pub link: String,
    /// Browsable URL of the pull request.
    pub web_url: String,
}

impl DisplayRecord {
    /// Number of open review threads.
    #[must_use]
    pub const fn open_thread_count(&self) -> usize {
        self.open_threads.len()
    }
}

/// Everything [`project_record`] needs for one pull request.
#[derive(Debug, Clone)]
pub struct ProjectionInput<'a> {
    /// The pull request as listed.
    pub pull_request: RawPullRequest,
    /// Build correlated with the pull request.
    pub build: Option<&'a RawBuild>,
    /// Open review threads.
    pub open_threads: Vec<CommentThread>,
    /// Identity whose vote is shown.
    pub current_user: &'a CurrentUser,
    /// Project web base used for browsable links.
    pub web_base: &'a Url,
}

/// Builds a dashboard row. Pure: depends only on its input.
#[must_use]
pub fn project_record(input: ProjectionInput<'_>) -> DisplayRecord {
    let ProjectionInput {
        pull_request,
        build,
        open_threads,
        current_user,
        web_base,
    } = input;

    let vote_code = pull_request
        .reviewers
        .iter()
        .find(|reviewer| reviewer.identity.id == current_user.id)
        .map_or(NO_VOTE_CODE, |reviewer| reviewer.vote);
    let web_url = pull_request_web_url(web_base, &pull_request.repository.name, pull_request.id);

    DisplayRecord {
        id: pull_request.id,
        is_draft: pull_request.is_draft,
        creation_date: pull_request.creation_date,
        base_branch: strip_ref_prefix(&pull_request.source_ref_name).to_owned(),
        target_branch: strip_ref_prefix(&pull_request.target_ref_name).to_owned(),
        vote: VoteStatus::from_code(vote_code),
        build_status: BuildStatusView::from_build(build),
        build_id: build.map(|matched| matched.id),
        open_threads,
        web_url,
        author: pull_request.author,
        title: pull_request.title,
        repository: pull_request.repository,
        reviewers: pull_request.reviewers,
        link: pull_request.url,
    }
}

/// Removes one leading `refs/heads/`; other names pass through.
///
/// # Example
///
/// ```
/// use prboard::dashboard::strip_ref_prefix;
///
/// assert_eq!(strip_ref_prefix("refs/heads/main"), "main");
/// assert_eq!(strip_ref_prefix("refs/heads/refs/heads/x"), "refs/heads/x");
/// assert_eq!(strip_ref_prefix("refs/tags/v1"), "refs/tags/v1");
/// ```
#[must_use]
pub fn strip_ref_prefix(ref_name: &str) -> &str {
    ref_name
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(ref_name)
}

/// `{web_base}/_git/{repository}/pullrequest/{id}`.
#[must_use]
pub fn pull_request_web_url(web_base: &Url, repository: &str, id: u32) -> String {
    let mut url = web_base.clone();
    let id_segment = id.to_string();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty()
            .extend(["_git", repository, "pullrequest", id_segment.as_str()]);
    }
    url.to_string()
}
