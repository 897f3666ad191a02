//! Orchestration of one dashboard load.

use tracing::{debug, info};

use crate::devops::error::IntakeError;
use crate::devops::gateway::{
    BuildGateway, BuildReason, IdentityGateway, PullRequestGateway, RepositoryGateway,
};
use crate::devops::locator::ProjectLocator;
use crate::devops::models::CurrentUser;
use crate::settings::{SettingsService, SettingsStore};
use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::aggregator::PullRequestAggregator;
use super::comments::CommentEnricher;
use super::correlator::BuildIndex;
use super::record::{DisplayRecord, ProjectionInput, project_record};
use super::snapshot::{DashboardSnapshot, SnapshotParts};
use super::sort::locale_compare;

/// Remote collaborators a load reads from.
#[derive(Clone, Copy)]
pub struct DashboardSources<'a> {
    /// Pull request listing and comment threads.
    pub pull_requests: &'a dyn PullRequestGateway,
    /// Pull request builds.
    pub builds: &'a dyn BuildGateway,
    /// Project repositories.
    pub repositories: &'a dyn RepositoryGateway,
    /// Per-user settings blobs.
    pub settings: &'a dyn SettingsStore,
}

/// Runs the full pipeline and produces a fresh [`DashboardSnapshot`].
pub struct DashboardLoader<'a> {
    sources: DashboardSources<'a>,
    telemetry: &'a dyn TelemetrySink,
}

impl<'a> DashboardLoader<'a> {
    /// Creates a loader over the given sources.
    #[must_use]
    pub const fn new(sources: DashboardSources<'a>, telemetry: &'a dyn TelemetrySink) -> Self {
        Self { sources, telemetry }
    }

    /// Loads settings, repositories, builds and every active pull request,
    /// then projects them into records in the default order.
    ///
    /// Stages run in sequence; comment threads for all pull requests are
    /// fetched concurrently once the listing is complete.
    ///
    /// # Errors
    ///
    /// Any stage failure aborts the load and is returned unchanged.
    pub async fn load(
        &self,
        locator: &ProjectLocator,
        current_user: &CurrentUser,
    ) -> Result<DashboardSnapshot, IntakeError> {
        let settings = SettingsService::new(self.sources.settings)
            .load(current_user, locator.project())
            .await?;

        let mut repositories = self.sources.repositories.list_repositories(locator).await?;
        repositories.sort_by(|left, right| locale_compare(&left.name, &right.name));
        debug!(count = repositories.len(), "listed repositories");

        let builds = self
            .sources
            .builds
            .list_builds(locator, BuildReason::PullRequest)
            .await?;
        let build_count = builds.len();
        let index = BuildIndex::new(builds);
        debug!(builds = build_count, indexed = index.len(), "indexed builds");

        let aggregated = PullRequestAggregator::new(self.sources.pull_requests)
            .collect_all(locator)
            .await?;
        let page_requests = aggregated.page_requests;

        let enriched = CommentEnricher::new(self.sources.pull_requests)
            .enrich(locator, aggregated.items)
            .await?;

        let web_base = locator.web_base_url();
        let records: Vec<DisplayRecord> = enriched
            .into_iter()
            .map(|item| {
                let build = index.lookup(item.pull_request.id);
                project_record(ProjectionInput {
                    pull_request: item.pull_request,
                    build,
                    open_threads: item.open_threads,
                    current_user,
                    web_base: &web_base,
                })
            })
            .collect();

        let matched_builds = records
            .iter()
            .filter(|record| record.build_id.is_some())
            .count();
        info!(
            pull_requests = records.len(),
            page_requests, matched_builds, "dashboard loaded"
        );
        self.telemetry.record(TelemetryEvent::DashboardLoaded {
            pull_requests: records.len(),
            page_requests,
            builds: build_count,
            matched_builds,
        });

        Ok(DashboardSnapshot::new(SnapshotParts {
            records,
            settings,
            repositories,
            current_user: current_user.clone(),
            web_base,
            page_requests,
        }))
    }
}

/// Uses the configured identity when present, otherwise asks the service.
///
/// # Errors
///
/// Returns the gateway error when the identity must be looked up and the
/// lookup fails.
pub async fn resolve_current_user(
    configured: Option<CurrentUser>,
    gateway: &dyn IdentityGateway,
    locator: &ProjectLocator,
) -> Result<CurrentUser, IntakeError> {
    if let Some(user) = configured.filter(|user| !user.id.trim().is_empty()) {
        debug!(user_id = %user.id, "using configured identity");
        return Ok(user);
    }
    gateway.current_user(locator).await
}
