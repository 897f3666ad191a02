//! Organisation/project addressing and identity wrappers for Azure DevOps.

use url::Url;

use super::error::IntakeError;

/// REST API version pinned for every request.
pub const API_VERSION: &str = "7.1";

/// Project name wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validates that the project name is non-blank and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingProject`] when the name is blank.
    pub fn new(value: &str) -> Result<Self, IntakeError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingProject);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the project name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Key under which per-user column settings are stored for this project.
    #[must_use]
    pub fn settings_key(&self) -> String {
        format!("{}-extension-settings", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, IntakeError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IntakeError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// Parsed organisation URL plus the project the dashboard is scoped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocator {
    organization: Url,
    project: ProjectName,
}

impl ProjectLocator {
    /// Builds a locator from an organisation (or collection) URL such as
    /// `https://dev.azure.com/contoso` and a project name.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::InvalidUrl` when the URL cannot be parsed or has
    /// no host, and `IntakeError::MissingProject` when the project is blank.
    pub fn new(organization_url: &str, project: &str) -> Result<Self, IntakeError> {
        let mut organization = Url::parse(organization_url.trim())
            .map_err(|error| IntakeError::InvalidUrl(error.to_string()))?;

        if organization.host_str().is_none() {
            return Err(IntakeError::InvalidUrl(
                "URL must include a host".to_owned(),
            ));
        }

        let trimmed_path = organization.path().trim_end_matches('/').to_owned();
        organization.set_path(&trimmed_path);
        organization.set_query(None);
        organization.set_fragment(None);

        Ok(Self {
            organization,
            project: ProjectName::new(project)?,
        })
    }

    /// Organisation URL with any trailing slash removed.
    #[must_use]
    pub const fn organization(&self) -> &Url {
        &self.organization
    }

    /// Project name.
    #[must_use]
    pub const fn project(&self) -> &ProjectName {
        &self.project
    }

    /// Project-scoped REST URL: `{organization}/{project}/_apis/{segments..}`.
    #[must_use]
    pub fn project_api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.organization.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push(self.project.as_str())
                .push("_apis")
                .extend(segments);
        }
        url
    }

    /// Organisation-scoped REST URL: `{organization}/_apis/{segments..}`.
    #[must_use]
    pub fn organization_api_url(&self, segments: &[&str]) -> Url {
        let mut url = self.organization.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().push("_apis").extend(segments);
        }
        url
    }

    /// Base URL for browsable project pages.
    ///
    /// On-premises servers keep the `tfs/<collection>` prefix, legacy
    /// `*.visualstudio.com` hosts address the project directly under the
    /// origin, and everything else nests the project under the collection
    /// (the first path segment, e.g. the organisation on `dev.azure.com`).
    #[must_use]
    pub fn web_base_url(&self) -> Url {
        let mut segments: Vec<&str> = self
            .organization
            .path_segments()
            .map(|parts| parts.filter(|part| !part.is_empty()).collect())
            .unwrap_or_default();

        let is_legacy_host = self
            .organization
            .host_str()
            .is_some_and(|host| host.ends_with("visualstudio.com"));

        let prefix: Vec<&str> = match segments.first().copied() {
            Some("tfs") => {
                segments.truncate(2);
                segments
            }
            _ if is_legacy_host => Vec::new(),
            Some(collection) => vec![collection],
            None => Vec::new(),
        };

        let mut url = self.organization.clone();
        url.set_path("");
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(prefix).push(self.project.as_str());
        }
        url
    }
}
