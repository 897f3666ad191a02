//! reqwest-backed implementation of every Azure DevOps gateway.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::devops::error::IntakeError;
use crate::devops::locator::{API_VERSION, PersonalAccessToken, ProjectLocator};
use crate::devops::models::{
    ApiBuild, ApiCommentThread, ApiConnectionData, ApiList, ApiPullRequest, ApiRepositoryRef,
    CommentThread, CurrentUser, GitRepository, RawBuild, RawPullRequest,
};

use super::client::build_http_client;
use super::error_mapping::{map_decode_error, map_http_error, map_transport_error};
use super::http_utils::extract_service_message;
use super::{
    BuildGateway, BuildReason, IdentityGateway, PullRequestGateway, PullRequestQuery,
    RepositoryGateway,
};

/// `connectionData` is only published as a preview resource.
const CONNECTION_DATA_API_VERSION: &str = "7.1-preview";

/// Azure DevOps REST gateway authenticated with a personal access token.
#[derive(Debug, Clone)]
pub struct AzureDevOpsGateway {
    client: reqwest::Client,
    token: PersonalAccessToken,
}

impl AzureDevOpsGateway {
    /// Creates a gateway from an existing HTTP client.
    #[must_use]
    pub const fn new(client: reqwest::Client, token: PersonalAccessToken) -> Self {
        Self { client, token }
    }

    /// Builds an HTTP client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::Configuration` when the client cannot be built.
    pub fn for_token(token: &PersonalAccessToken, timeout: Duration) -> Result<Self, IntakeError> {
        let client = build_http_client(timeout)?;
        Ok(Self::new(client, token.clone()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
        api_version: &str,
        query: &[(&str, String)],
    ) -> Result<T, IntakeError> {
        debug!(operation, url = %url, "requesting Azure DevOps resource");

        let response = self
            .client
            .get(url)
            .basic_auth("", Some(self.token.value()))
            .query(&[("api-version", api_version)])
            .query(query)
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_error(
                operation,
                status,
                extract_service_message(&body),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|error| map_decode_error(operation, &error))
    }
}

#[async_trait]
impl PullRequestGateway for AzureDevOpsGateway {
    async fn list_pull_requests(
        &self,
        locator: &ProjectLocator,
        query: &PullRequestQuery,
    ) -> Result<Vec<RawPullRequest>, IntakeError> {
        let url = locator.project_api_url(&["git", "pullrequests"]);
        let params = [
            ("searchCriteria.status", query.status.as_str().to_owned()),
            ("$skip", query.skip.to_string()),
            ("$top", query.top.to_string()),
        ];

        let page: ApiList<ApiPullRequest> = self
            .get_json("list pull requests", url, API_VERSION, &params)
            .await?;
        Ok(page.value.into_iter().map(RawPullRequest::from).collect())
    }

    async fn comment_threads(
        &self,
        locator: &ProjectLocator,
        repository_id: &str,
        pull_request_id: u32,
    ) -> Result<Vec<CommentThread>, IntakeError> {
        let pull_request = pull_request_id.to_string();
        let url = locator.project_api_url(&[
            "git",
            "repositories",
            repository_id,
            "pullRequests",
            pull_request.as_str(),
            "threads",
        ]);

        let threads: ApiList<ApiCommentThread> = self
            .get_json("list comment threads", url, API_VERSION, &[])
            .await?;
        Ok(threads.value.into_iter().map(CommentThread::from).collect())
    }
}

#[async_trait]
impl BuildGateway for AzureDevOpsGateway {
    async fn list_builds(
        &self,
        locator: &ProjectLocator,
        reason: BuildReason,
    ) -> Result<Vec<RawBuild>, IntakeError> {
        let url = locator.project_api_url(&["build", "builds"]);
        let params = [("reasonFilter", reason.as_str().to_owned())];

        let builds: ApiList<ApiBuild> = self
            .get_json("list builds", url, API_VERSION, &params)
            .await?;
        Ok(builds.value.into_iter().map(RawBuild::from).collect())
    }
}

#[async_trait]
impl RepositoryGateway for AzureDevOpsGateway {
    async fn list_repositories(
        &self,
        locator: &ProjectLocator,
    ) -> Result<Vec<GitRepository>, IntakeError> {
        let url = locator.project_api_url(&["git", "repositories"]);

        let repositories: ApiList<ApiRepositoryRef> = self
            .get_json("list repositories", url, API_VERSION, &[])
            .await?;
        Ok(repositories
            .value
            .into_iter()
            .map(GitRepository::from)
            .collect())
    }
}

#[async_trait]
impl IdentityGateway for AzureDevOpsGateway {
    async fn current_user(&self, locator: &ProjectLocator) -> Result<CurrentUser, IntakeError> {
        let url = locator.organization_api_url(&["connectionData"]);

        let data: ApiConnectionData = self
            .get_json("resolve current user", url, CONNECTION_DATA_API_VERSION, &[])
            .await
            .map_err(|error| match error {
                IntakeError::Decode { message } => IntakeError::MissingIdentity { message },
                other => other,
            })?;

        let user = CurrentUser::from(data);
        if user.id.trim().is_empty() {
            return Err(IntakeError::MissingIdentity {
                message: "authenticated user has no id".to_owned(),
            });
        }
        Ok(user)
    }
}
