//! Scenario state for the pagination BDD tests.

use std::time::Duration;

use prboard::dashboard::{AggregatedPullRequests, PullRequestAggregator};
use prboard::{AzureDevOpsGateway, IntakeError, PersonalAccessToken};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use wiremock::MockServer;

use super::azure_double::locator_for;
use super::runtime::{SharedRuntime, with_server};

#[derive(ScenarioState, Default)]
pub(crate) struct PaginationState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) result: Slot<AggregatedPullRequests>,
    pub(crate) error: Slot<IntakeError>,
}

/// Drains the listing served by the double and records the outcome.
pub(crate) fn collect_listing(pagination_state: &PaginationState) {
    let token = PersonalAccessToken::new("bdd-token")
        .unwrap_or_else(|error| panic!("token should be valid: {error}"));
    let gateway = AzureDevOpsGateway::for_token(&token, Duration::from_secs(5))
        .unwrap_or_else(|error| panic!("gateway should build: {error}"));

    let outcome = with_server(
        &pagination_state.runtime,
        &pagination_state.server,
        |runtime, server| {
            let locator = locator_for(server);
            runtime.block_on(PullRequestAggregator::new(&gateway).collect_all(&locator))
        },
    );

    match outcome {
        Ok(aggregated) => {
            let _had_previous_error = pagination_state.error.take().is_some();
            pagination_state.result.set(aggregated);
        }
        Err(error) => {
            let _had_previous_result = pagination_state.result.take().is_some();
            pagination_state.error.set(error);
        }
    }
}
