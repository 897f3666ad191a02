//! Unit tests for Azure DevOps addressing.

use rstest::rstest;

use super::{IntakeError, PersonalAccessToken, ProjectLocator, ProjectName};

#[rstest]
#[case::cloud("https://dev.azure.com/contoso", "https://dev.azure.com/contoso/Fabrikam")]
#[case::cloud_trailing_slash(
    "https://dev.azure.com/contoso/",
    "https://dev.azure.com/contoso/Fabrikam"
)]
#[case::legacy_host("https://contoso.visualstudio.com", "https://contoso.visualstudio.com/Fabrikam")]
#[case::legacy_host_with_collection(
    "https://contoso.visualstudio.com/DefaultCollection",
    "https://contoso.visualstudio.com/Fabrikam"
)]
#[case::on_premises(
    "https://tfs.example.com/tfs/DefaultCollection",
    "https://tfs.example.com/tfs/DefaultCollection/Fabrikam"
)]
#[case::on_premises_with_port(
    "http://build01:8080/tfs/Main/",
    "http://build01:8080/tfs/Main/Fabrikam"
)]
#[case::server_collection(
    "https://devops.example.com/Main",
    "https://devops.example.com/Main/Fabrikam"
)]
fn web_base_url_follows_host_conventions(#[case] organization: &str, #[case] expected: &str) {
    let locator = ProjectLocator::new(organization, "Fabrikam").expect("locator should parse");

    assert_eq!(locator.web_base_url().as_str(), expected);
}

#[rstest]
fn project_api_url_nests_under_project() {
    let locator =
        ProjectLocator::new("https://dev.azure.com/contoso/", "Fabrikam").expect("locator");

    let url = locator.project_api_url(&["git", "pullrequests"]);

    assert_eq!(
        url.as_str(),
        "https://dev.azure.com/contoso/Fabrikam/_apis/git/pullrequests"
    );
}

#[rstest]
fn organization_api_url_skips_project() {
    let locator = ProjectLocator::new("https://dev.azure.com/contoso", "Fabrikam").expect("locator");

    let url = locator.organization_api_url(&["connectionData"]);

    assert_eq!(
        url.as_str(),
        "https://dev.azure.com/contoso/_apis/connectionData"
    );
}

#[rstest]
fn project_names_with_spaces_are_percent_encoded() {
    let locator =
        ProjectLocator::new("https://dev.azure.com/contoso", "Team Alpha").expect("locator");

    assert_eq!(
        locator.project_api_url(&["git", "repositories"]).as_str(),
        "https://dev.azure.com/contoso/Team%20Alpha/_apis/git/repositories"
    );
}

#[rstest]
#[case::not_a_url("contoso")]
#[case::no_host("file:///tmp/contoso")]
fn rejects_unusable_organization_urls(#[case] input: &str) {
    let result = ProjectLocator::new(input, "Fabrikam");

    assert!(
        matches!(result, Err(IntakeError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
fn rejects_blank_project() {
    let result = ProjectLocator::new("https://dev.azure.com/contoso", "  ");

    assert_eq!(result, Err(IntakeError::MissingProject));
}

#[rstest]
fn settings_key_is_scoped_to_project() {
    let project = ProjectName::new(" Fabrikam ").expect("project");

    assert_eq!(project.settings_key(), "Fabrikam-extension-settings");
}

#[rstest]
fn rejects_blank_token() {
    assert_eq!(
        PersonalAccessToken::new("   "),
        Err(IntakeError::MissingToken)
    );
}
