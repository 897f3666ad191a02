//! Dashboard load and print operation.

use std::io::{self, Write};

use prboard::dashboard::{Dashboard, resolve_current_user};
use prboard::devops::{BuildGateway, IdentityGateway, PullRequestGateway, RepositoryGateway};
use prboard::telemetry::NoopTelemetrySink;
use prboard::{
    DashboardLoader, DashboardSources, IntakeError, OutputFormat, PrboardConfig, SettingsStore,
};

use super::output::{write_json_lines, write_table};
use super::{build_gateway, open_settings_store};

/// Loads the dashboard and prints the selected tab to stdout.
///
/// # Errors
///
/// Returns configuration errors before any request is made, and the first
/// gateway or store failure of the load.
pub async fn run(config: &PrboardConfig) -> Result<(), IntakeError> {
    let gateway = build_gateway(config)?;
    let store = open_settings_store(config)?;
    let mut stdout = io::stdout().lock();
    run_with_gateway(config, &gateway, store.as_ref(), &mut stdout).await
}

/// Loads and prints the dashboard using the given collaborators.
///
/// This function is exposed for testing with mock gateways.
///
/// # Errors
///
/// See [`run`].
pub async fn run_with_gateway<G, W>(
    config: &PrboardConfig,
    gateway: &G,
    store: &dyn SettingsStore,
    writer: &mut W,
) -> Result<(), IntakeError>
where
    G: PullRequestGateway + BuildGateway + RepositoryGateway + IdentityGateway,
    W: Write,
{
    let locator = config.require_locator()?;
    let tab = config.tab()?;
    let sort = config.sort_spec()?;
    let format = config.output_format()?;
    let filter = config.filter();

    let user = resolve_current_user(config.configured_user(), gateway, &locator).await?;
    let telemetry = NoopTelemetrySink;
    let loader = DashboardLoader::new(
        DashboardSources {
            pull_requests: gateway,
            builds: gateway,
            repositories: gateway,
            settings: store,
        },
        &telemetry,
    );

    let mut dashboard = Dashboard::new();
    let mut snapshot = dashboard.commit(loader.load(&locator, &user).await)?;
    if let Some(spec) = sort {
        snapshot = dashboard
            .apply_sort(spec)
            .map_err(|error| IntakeError::Configuration {
                message: error.to_string(),
            })?;
    }

    let records = snapshot.view(tab, &filter);
    match format {
        OutputFormat::Table => write_table(
            writer,
            snapshot.settings(),
            tab,
            snapshot.badge_counts(),
            &records,
        ),
        OutputFormat::JsonLines => write_json_lines(writer, &records),
    }
}
