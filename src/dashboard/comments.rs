//! Attaching open review threads to each pull request.

use futures::future::try_join_all;
use tracing::debug;

use crate::devops::error::IntakeError;
use crate::devops::gateway::PullRequestGateway;
use crate::devops::locator::ProjectLocator;
use crate::devops::models::{CommentThread, RawPullRequest};

/// A pull request together with its open review threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedPullRequest {
    /// The pull request as listed.
    pub pull_request: RawPullRequest,
    /// Threads that are neither deleted nor without status.
    pub open_threads: Vec<CommentThread>,
}

/// Fetches review threads for a batch of pull requests concurrently.
pub struct CommentEnricher<'a> {
    gateway: &'a dyn PullRequestGateway,
}

impl<'a> CommentEnricher<'a> {
    /// Creates an enricher over the given gateway.
    #[must_use]
    pub const fn new(gateway: &'a dyn PullRequestGateway) -> Self {
        Self { gateway }
    }

    /// Issues one thread query per pull request, all in flight at once.
    ///
    /// Output order matches input order regardless of completion order.
    ///
    /// # Errors
    ///
    /// Any single failed query fails the whole batch.
    pub async fn enrich(
        &self,
        locator: &ProjectLocator,
        pull_requests: Vec<RawPullRequest>,
    ) -> Result<Vec<EnrichedPullRequest>, IntakeError> {
        let gateway = self.gateway;
        debug!(count = pull_requests.len(), "fetching comment threads");

        try_join_all(pull_requests.into_iter().map(|pull_request| async move {
            let threads = gateway
                .comment_threads(locator, &pull_request.repository.id, pull_request.id)
                .await?;
            let open_threads = threads
                .into_iter()
                .filter(CommentThread::is_open)
                .collect();
            Ok::<_, IntakeError>(EnrichedPullRequest {
                pull_request,
                open_threads,
            })
        }))
        .await
    }
}
