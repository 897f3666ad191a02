//! Draining the paginated pull request listing.

use tracing::debug;

use crate::devops::error::IntakeError;
use crate::devops::gateway::{PullRequestGateway, PullRequestQuery};
use crate::devops::locator::ProjectLocator;
use crate::devops::models::RawPullRequest;
use crate::devops::pagination::{PAGE_SIZE, PageCursor, PageOutcome};

/// Every active pull request in listing order, plus how many pages it took.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedPullRequests {
    /// Pull requests in the service's original order.
    pub items: Vec<RawPullRequest>,
    /// Page requests issued, including a final empty page if one was needed.
    pub page_requests: u32,
}

/// Sequentially fetches pages of active pull requests until exhausted.
pub struct PullRequestAggregator<'a> {
    gateway: &'a dyn PullRequestGateway,
}

impl<'a> PullRequestAggregator<'a> {
    /// Creates an aggregator over the given gateway.
    #[must_use]
    pub const fn new(gateway: &'a dyn PullRequestGateway) -> Self {
        Self { gateway }
    }

    /// Collects every active pull request in the project.
    ///
    /// Pages of [`PAGE_SIZE`] are requested one after another. A page error
    /// aborts the collection; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns the first gateway error encountered.
    pub async fn collect_all(
        &self,
        locator: &ProjectLocator,
    ) -> Result<AggregatedPullRequests, IntakeError> {
        let mut cursor = PageCursor::new(PAGE_SIZE);
        let mut items = Vec::new();

        loop {
            let query = PullRequestQuery::active_page(cursor.skip());
            let page = self.gateway.list_pull_requests(locator, &query).await?;
            let outcome = cursor.record_page(page.len());
            debug!(
                skip = query.skip,
                returned = page.len(),
                total = cursor.total(),
                "fetched pull request page"
            );
            items.extend(page);

            if outcome == PageOutcome::Exhausted {
                break;
            }
        }

        Ok(AggregatedPullRequests {
            items,
            page_requests: cursor.requests(),
        })
    }
}
