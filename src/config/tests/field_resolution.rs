//! Tests for the accessors that validate configured values.

use rstest::rstest;

use crate::PrboardConfig;
use crate::config::{AZURE_DEVOPS_PAT_ENV, OutputFormat};
use crate::dashboard::{SortSpec, Tab};
use crate::devops::IntakeError;
use crate::devops::models::CurrentUser;
use crate::settings::SettingsColumn;

fn located(organization_url: Option<&str>, project: Option<&str>) -> PrboardConfig {
    PrboardConfig {
        organization_url: organization_url.map(ToOwned::to_owned),
        project: project.map(ToOwned::to_owned),
        ..Default::default()
    }
}

#[rstest]
fn require_locator_builds_project_locator() {
    let config = located(Some("https://dev.azure.com/contoso/"), Some("Fabrikam"));

    let locator = config.require_locator().expect("locator should build");

    assert_eq!(locator.project().as_str(), "Fabrikam");
    assert_eq!(
        locator.organization().as_str(),
        "https://dev.azure.com/contoso"
    );
}

#[rstest]
#[case::missing_url(None, Some("Fabrikam"), IntakeError::MissingOrganizationUrl)]
#[case::blank_url(Some("  "), Some("Fabrikam"), IntakeError::MissingOrganizationUrl)]
#[case::missing_project(Some("https://dev.azure.com/contoso"), None, IntakeError::MissingProject)]
#[case::blank_project(Some("https://dev.azure.com/contoso"), Some(" "), IntakeError::MissingProject)]
fn require_locator_reports_missing_values(
    #[case] organization_url: Option<&str>,
    #[case] project: Option<&str>,
    #[case] expected: IntakeError,
) {
    let config = located(organization_url, project);

    assert_eq!(config.require_locator(), Err(expected));
}

#[rstest]
fn require_locator_rejects_unparseable_url() {
    let config = located(Some("not a url"), Some("Fabrikam"));

    assert!(matches!(
        config.require_locator(),
        Err(IntakeError::InvalidUrl(_))
    ));
}

#[rstest]
fn resolve_token_prefers_configured_value() {
    let _guard = env_lock::lock_env([(AZURE_DEVOPS_PAT_ENV, Some("env-token"))]);
    let config = PrboardConfig {
        token: Some("my-token".to_owned()),
        ..Default::default()
    };

    let token = config.resolve_token().expect("token should resolve");
    assert_eq!(token.value(), "my-token");
}

#[rstest]
fn resolve_token_falls_back_to_azure_cli_variable() {
    let _guard = env_lock::lock_env([(AZURE_DEVOPS_PAT_ENV, Some("env-token"))]);

    let token = PrboardConfig::default()
        .resolve_token()
        .expect("token should resolve");
    assert_eq!(token.value(), "env-token");
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("   "))]
fn resolve_token_errors_without_a_usable_value(#[case] configured: Option<&str>) {
    let _guard = env_lock::lock_env([(AZURE_DEVOPS_PAT_ENV, None::<&str>)]);
    let config = PrboardConfig {
        token: configured.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert_eq!(config.resolve_token(), Err(IntakeError::MissingToken));
}

#[rstest]
#[case::id_and_name(Some("u-1"), Some("Ada"), Some(("u-1", "Ada")))]
#[case::name_falls_back_to_id(Some("u-1"), None, Some(("u-1", "u-1")))]
#[case::blank_id(Some(" "), Some("Ada"), None)]
#[case::no_id(None, Some("Ada"), None)]
fn configured_user_requires_an_id(
    #[case] user_id: Option<&str>,
    #[case] user_name: Option<&str>,
    #[case] expected: Option<(&str, &str)>,
) {
    let config = PrboardConfig {
        user_id: user_id.map(ToOwned::to_owned),
        user_name: user_name.map(ToOwned::to_owned),
        ..Default::default()
    };

    let expected = expected.map(|(id, display_name)| CurrentUser {
        id: id.to_owned(),
        display_name: display_name.to_owned(),
    });
    assert_eq!(config.configured_user(), expected);
}

#[rstest]
#[case::default(None, Tab::Active)]
#[case::drafts(Some("Drafts"), Tab::Drafts)]
#[case::active(Some("active"), Tab::Active)]
fn tab_parses_names(#[case] value: Option<&str>, #[case] expected: Tab) {
    let config = PrboardConfig {
        tab: value.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert_eq!(config.tab(), Ok(expected));
}

#[rstest]
fn tab_rejects_unknown_names() {
    let config = PrboardConfig {
        tab: Some("archived".to_owned()),
        ..Default::default()
    };

    assert!(matches!(config.tab(), Err(IntakeError::Configuration { .. })));
}

#[rstest]
#[case::none(None, false, None)]
#[case::ascending(Some("created"), false, Some(SortSpec::ascending(SettingsColumn::Created)))]
#[case::descending(
    Some("build_status"),
    true,
    Some(SortSpec::descending(SettingsColumn::BuildStatus))
)]
fn sort_spec_combines_column_and_direction(
    #[case] column: Option<&str>,
    #[case] descending: bool,
    #[case] expected: Option<SortSpec>,
) {
    let config = PrboardConfig {
        sort_column: column.map(ToOwned::to_owned),
        sort_descending: descending,
        ..Default::default()
    };

    assert_eq!(config.sort_spec(), Ok(expected));
}

#[rstest]
fn sort_spec_rejects_unknown_columns() {
    let config = PrboardConfig {
        sort_column: Some("priority".to_owned()),
        ..Default::default()
    };

    assert!(config.sort_spec().is_err());
}

#[rstest]
fn filter_splits_repository_list() {
    let config = PrboardConfig {
        keyword: Some("Login".to_owned()),
        repository: Some("web, api ,".to_owned()),
        ..Default::default()
    };

    let expected = crate::dashboard::RecordFilter::new()
        .with_keyword("Login")
        .with_repository("web")
        .with_repository("api");
    assert_eq!(config.filter(), expected);
}

#[rstest]
fn default_filter_is_empty() {
    assert!(PrboardConfig::default().filter().is_empty());
}

#[rstest]
#[case::default(None, Ok(OutputFormat::Table))]
#[case::table(Some("TABLE"), Ok(OutputFormat::Table))]
#[case::jsonl(Some("jsonl"), Ok(OutputFormat::JsonLines))]
fn output_format_parses_names(
    #[case] value: Option<&str>,
    #[case] expected: Result<OutputFormat, IntakeError>,
) {
    let config = PrboardConfig {
        format: value.map(ToOwned::to_owned),
        ..Default::default()
    };

    assert_eq!(config.output_format(), expected);
}

#[rstest]
fn output_format_rejects_unknown_names() {
    let config = PrboardConfig {
        format: Some("csv".to_owned()),
        ..Default::default()
    };

    assert!(config.output_format().is_err());
}

#[rstest]
fn column_changes_list_enables_before_disables() {
    let config = PrboardConfig {
        enable_column: Some("author,my_vote".to_owned()),
        disable_column: Some("author".to_owned()),
        ..Default::default()
    };

    assert_eq!(
        config.column_changes(),
        Ok(vec![
            (SettingsColumn::Author, true),
            (SettingsColumn::MyVote, true),
            (SettingsColumn::Author, false),
        ])
    );
}

#[rstest]
fn column_changes_reject_unknown_columns() {
    let config = PrboardConfig {
        disable_column: Some("author,labels".to_owned()),
        ..Default::default()
    };

    assert!(matches!(
        config.column_changes(),
        Err(IntakeError::Configuration { message }) if message.contains("labels")
    ));
}

#[rstest]
fn zero_request_timeout_is_rejected() {
    let config = PrboardConfig {
        request_timeout_seconds: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.request_timeout(),
        Err(IntakeError::Configuration { .. })
    ));
}

#[rstest]
fn positive_request_timeout_converts_to_duration() {
    let config = PrboardConfig {
        request_timeout_seconds: 12,
        ..Default::default()
    };

    assert_eq!(
        config.request_timeout().map(|timeout| timeout.as_secs()),
        Ok(12)
    );
}
