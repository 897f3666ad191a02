//! reqwest client construction helpers for gateway implementations.

use std::time::Duration;

use crate::devops::error::IntakeError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the shared HTTP client used by every gateway operation.
///
/// # Errors
///
/// Returns `IntakeError::Configuration` when the TLS backend or client
/// settings cannot be initialised.
pub(super) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, IntakeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|error| IntakeError::Configuration {
            message: format!("build HTTP client failed: {error}"),
        })
}
