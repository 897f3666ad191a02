//! Tests for the reqwest-backed Azure DevOps gateway.

type FixtureResult<T> = Result<T, Box<dyn std::error::Error>>;

use std::time::Duration;

use rstest::{fixture, rstest};
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{
    AzureDevOpsGateway, BuildGateway, BuildReason, IdentityGateway, PullRequestGateway,
    PullRequestQuery, RepositoryGateway,
};
use crate::devops::error::IntakeError;
use crate::devops::locator::{PersonalAccessToken, ProjectLocator};
use crate::devops::models::{BuildResult, BuildStatus};

/// `base64(":valid-token")`.
const BASIC_AUTH_HEADER: &str = "Basic OnZhbGlkLXRva2Vu";

struct GatewayFixture {
    runtime: Runtime,
    server: MockServer,
    locator: ProjectLocator,
    gateway: AzureDevOpsGateway,
}

impl GatewayFixture {
    fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn mount(&self, mock: Mock) {
        self.block_on(mock.mount(&self.server));
    }
}

#[fixture]
fn gateway_fixture() -> FixtureResult<GatewayFixture> {
    let token = PersonalAccessToken::new("valid-token")?;
    let runtime = Runtime::new()?;
    let server = runtime.block_on(MockServer::start());
    let locator = ProjectLocator::new(&format!("{}/contoso", server.uri()), "Fabrikam")?;
    let gateway = AzureDevOpsGateway::for_token(&token, Duration::from_secs(5))?;
    Ok(GatewayFixture {
        runtime,
        server,
        locator,
        gateway,
    })
}

fn pull_request_json(id: u32) -> serde_json::Value {
    json!({
        "pullRequestId": id,
        "createdBy": { "id": "user-1", "displayName": "Ada" },
        "creationDate": "2025-01-01T00:00:00Z",
        "title": format!("Change {id}"),
        "isDraft": false,
        "sourceRefName": "refs/heads/feature",
        "targetRefName": "refs/heads/main",
        "repository": { "id": "repo-1", "name": "core" },
        "reviewers": [],
        "url": format!("https://dev.azure.com/contoso/_apis/git/pullRequests/{id}")
    })
}

#[rstest]
fn list_pull_requests_sends_paging_parameters(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/git/pullrequests"))
            .and(query_param("searchCriteria.status", "active"))
            .and(query_param("$skip", "99"))
            .and(query_param("$top", "99"))
            .and(query_param("api-version", "7.1"))
            .and(header("authorization", BASIC_AUTH_HEADER))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [pull_request_json(7), pull_request_json(8)],
                "count": 2
            }))),
    );

    let page = fixture
        .block_on(
            fixture
                .gateway
                .list_pull_requests(&fixture.locator, &PullRequestQuery::active_page(99)),
        )
        .expect("request should succeed");

    let ids: Vec<u32> = page.iter().map(|pr| pr.id).collect();
    assert_eq!(ids, vec![7, 8]);
    assert_eq!(
        page.first().map(|pr| pr.repository.name.as_str()),
        Some("core")
    );
}

#[rstest]
fn comment_threads_are_addressed_by_repository_and_pull_request(
    gateway_fixture: FixtureResult<GatewayFixture>,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path(
                "/contoso/Fabrikam/_apis/git/repositories/repo-1/pullRequests/42/threads",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    { "id": 1, "isDeleted": false, "status": "active" },
                    { "id": 2, "isDeleted": true, "status": "active" },
                    { "id": 3, "isDeleted": false }
                ],
                "count": 3
            }))),
    );

    let threads = fixture
        .block_on(
            fixture
                .gateway
                .comment_threads(&fixture.locator, "repo-1", 42),
        )
        .expect("request should succeed");

    let open = threads.iter().filter(|thread| thread.is_open()).count();
    assert_eq!(threads.len(), 3);
    assert_eq!(open, 1);
}

#[rstest]
fn list_builds_filters_by_reason(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/build/builds"))
            .and(query_param("reasonFilter", "pullRequest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [{
                    "id": 900,
                    "buildNumber": "20250101.1",
                    "status": "completed",
                    "result": "partiallySucceeded",
                    "triggerInfo": { "pr.number": "42", "pr.sourceBranch": "refs/heads/f" }
                }],
                "count": 1
            }))),
    );

    let builds = fixture
        .block_on(
            fixture
                .gateway
                .list_builds(&fixture.locator, BuildReason::PullRequest),
        )
        .expect("request should succeed");

    let build = builds.first().expect("one build");
    assert_eq!(build.pull_request_number(), Some("42"));
    assert_eq!(build.status, Some(BuildStatus::Completed));
    assert_eq!(build.result, Some(BuildResult::PartiallySucceeded));
}

#[rstest]
fn list_repositories_returns_names(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/git/repositories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    { "id": "r2", "name": "web" },
                    { "id": "r1", "name": "api", "webUrl": "https://example.test/api" }
                ],
                "count": 2
            }))),
    );

    let repositories = fixture
        .block_on(fixture.gateway.list_repositories(&fixture.locator))
        .expect("request should succeed");

    let names: Vec<&str> = repositories.iter().map(|repo| repo.name.as_str()).collect();
    assert_eq!(names, vec!["web", "api"]);
}

#[rstest]
fn current_user_uses_organisation_connection_data(
    gateway_fixture: FixtureResult<GatewayFixture>,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/_apis/connectionData"))
            .and(query_param("api-version", "7.1-preview"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "authenticatedUser": {
                    "id": "user-1",
                    "providerDisplayName": "Ada Lovelace"
                }
            }))),
    );

    let user = fixture
        .block_on(fixture.gateway.current_user(&fixture.locator))
        .expect("request should succeed");

    assert_eq!(user.id, "user-1");
    assert_eq!(user.display_name, "Ada Lovelace");
}

#[rstest]
fn current_user_without_identity_is_reported(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/_apis/connectionData"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "instanceId": "x" }))),
    );

    let result = fixture.block_on(fixture.gateway.current_user(&fixture.locator));

    assert!(
        matches!(result, Err(IntakeError::MissingIdentity { .. })),
        "expected MissingIdentity, got {result:?}"
    );
}

#[rstest]
#[case::unauthorised(401)]
#[case::forbidden(403)]
fn rejected_token_maps_to_authentication(
    gateway_fixture: FixtureResult<GatewayFixture>,
    #[case] status: u16,
) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/build/builds"))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "message": "TF400813: not authorized"
            }))),
    );

    let result = fixture.block_on(
        fixture
            .gateway
            .list_builds(&fixture.locator, BuildReason::PullRequest),
    );

    assert!(
        matches!(&result, Err(IntakeError::Authentication { message }) if message.contains("TF400813")),
        "expected Authentication, got {result:?}"
    );
}

#[rstest]
fn server_error_keeps_status_and_message(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/git/repositories"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({
                "message": "service unavailable"
            }))),
    );

    let result = fixture.block_on(fixture.gateway.list_repositories(&fixture.locator));

    assert!(
        matches!(&result, Err(IntakeError::Api { status: 503, message }) if message.contains("service unavailable")),
        "expected Api error, got {result:?}"
    );
}

#[rstest]
fn malformed_body_maps_to_decode(gateway_fixture: FixtureResult<GatewayFixture>) {
    let fixture = gateway_fixture.expect("fixture should succeed");
    fixture.mount(
        Mock::given(method("GET"))
            .and(path("/contoso/Fabrikam/_apis/git/pullrequests"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
    );

    let result = fixture.block_on(
        fixture
            .gateway
            .list_pull_requests(&fixture.locator, &PullRequestQuery::default()),
    );

    assert!(
        matches!(result, Err(IntakeError::Decode { .. })),
        "expected Decode, got {result:?}"
    );
}

#[rstest]
fn unreachable_server_maps_to_network() {
    let runtime = Runtime::new().expect("runtime");
    let token = PersonalAccessToken::new("valid-token").expect("token");
    let gateway =
        AzureDevOpsGateway::for_token(&token, Duration::from_secs(2)).expect("gateway");
    let locator =
        ProjectLocator::new("http://127.0.0.1:9/contoso", "Fabrikam").expect("locator");

    let result = runtime.block_on(gateway.list_repositories(&locator));

    assert!(
        matches!(result, Err(IntakeError::Network { .. })),
        "expected Network, got {result:?}"
    );
}
