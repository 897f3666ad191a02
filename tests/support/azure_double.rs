//! Wiremock double of the Azure DevOps REST surface used by dashboard loads.

use prboard::ProjectLocator;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Organisation segment of the double's URLs.
pub const ORGANIZATION: &str = "contoso";
/// Project served by the double.
pub const PROJECT: &str = "Fabrikam";
/// Page size the client is expected to request.
pub const PAGE_SIZE: usize = 99;

/// Locator pointing at the double.
pub fn locator_for(server: &MockServer) -> ProjectLocator {
    ProjectLocator::new(&format!("{}/{ORGANIZATION}", server.uri()), PROJECT)
        .unwrap_or_else(|error| panic!("locator should build: {error}"))
}

/// Listing entry for one pull request in repository `web`.
pub fn pull_request_json(id: u32, draft: bool, author_id: &str) -> Value {
    json!({
        "pullRequestId": id,
        "isDraft": draft,
        "title": format!("Pull request {id}"),
        "createdBy": {"id": author_id, "displayName": format!("User {author_id}")},
        "creationDate": "2025-03-14T09:26:00Z",
        "repository": {"id": "repo-web", "name": "web"},
        "sourceRefName": format!("refs/heads/feature/{id}"),
        "targetRefName": "refs/heads/main",
        "reviewers": [],
        "url": format!("https://dev.azure.com/{ORGANIZATION}/_apis/git/pullRequests/{id}")
    })
}

/// Completed, successful build triggered by `pull_request`.
pub fn build_json(id: u64, pull_request: u32) -> Value {
    json!({
        "id": id,
        "buildNumber": format!("2025.{id}"),
        "status": "completed",
        "result": "succeeded",
        "triggerInfo": {"pr.number": pull_request.to_string()}
    })
}

/// Mounts one listing page starting at `skip`, expected exactly once.
pub async fn mount_page(server: &MockServer, skip: usize, page: &[Value]) {
    Mock::given(method("GET"))
        .and(path(format!("/{ORGANIZATION}/{PROJECT}/_apis/git/pullrequests")))
        .and(query_param("searchCriteria.status", "active"))
        .and(query_param("$skip", skip.to_string()))
        .and(query_param("$top", PAGE_SIZE.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"count": page.len(), "value": page})),
        )
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the paginated listing, one mock per page.
///
/// Returns the number of page requests a complete drain should issue.
pub async fn mount_pull_request_pages(server: &MockServer, pull_requests: &[Value]) -> usize {
    let mut pages = 0;
    let mut skip = 0;
    loop {
        let page: Vec<Value> = pull_requests
            .iter()
            .skip(skip)
            .take(PAGE_SIZE)
            .cloned()
            .collect();
        mount_page(server, skip, &page).await;

        pages += 1;
        skip += PAGE_SIZE;
        if page.len() < PAGE_SIZE {
            return pages;
        }
    }
}

/// Mounts a failing response for the page starting at `skip`.
pub async fn mount_failing_page(server: &MockServer, skip: usize, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/{ORGANIZATION}/{PROJECT}/_apis/git/pullrequests")))
        .and(query_param("$skip", skip.to_string()))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": "TF400898: An internal error occurred."
        })))
        .mount(server)
        .await;
}

/// Mounts the pull request build listing.
pub async fn mount_builds(server: &MockServer, builds: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(format!("/{ORGANIZATION}/{PROJECT}/_apis/build/builds")))
        .and(query_param("reasonFilter", "pullRequest"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"count": builds.len(), "value": builds})),
        )
        .mount(server)
        .await;
}

/// Mounts the repository listing with `web` and `api`.
pub async fn mount_repositories(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/{ORGANIZATION}/{PROJECT}/_apis/git/repositories")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "value": [
                {"id": "repo-web", "name": "web"},
                {"id": "repo-api", "name": "api"}
            ]
        })))
        .mount(server)
        .await;
}

/// Open threads per pull request in [`mount_threads`].
pub const OPEN_THREADS_PER_PULL_REQUEST: usize = 2;

/// Mounts thread listings: every pull request has two threads with a status,
/// one deleted thread and one statusless system thread.
pub async fn mount_threads(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(format!(
            r"^/{ORGANIZATION}/{PROJECT}/_apis/git/repositories/[^/]+/pullRequests/\d+/threads$"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 4,
            "value": [
                {"id": 1, "isDeleted": false, "status": "active"},
                {"id": 2, "isDeleted": false, "status": "fixed"},
                {"id": 3, "isDeleted": true, "status": "active"},
                {"id": 4, "isDeleted": false}
            ]
        })))
        .mount(server)
        .await;
}

/// Number of listing requests the server has received.
pub async fn listing_requests(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().ends_with("/_apis/git/pullrequests"))
        .count()
}
