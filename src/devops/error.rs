//! Error types exposed by the Azure DevOps intake layer.

use thiserror::Error;

/// Errors surfaced while resolving configuration or talking to Azure DevOps.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// No organisation URL was configured.
    #[error("organization URL is required (use --organization-url)")]
    MissingOrganizationUrl,

    /// No project name was configured.
    #[error("project name is required (use --project or -p)")]
    MissingProject,

    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// The organisation URL could not be parsed.
    #[error("organization URL is invalid: {0}")]
    InvalidUrl(String),

    /// The current user identity could not be resolved.
    #[error("current user could not be resolved: {message}")]
    MissingIdentity {
        /// Details about why the identity lookup failed.
        message: String,
    },

    /// The token was rejected by Azure DevOps.
    #[error("Azure DevOps rejected the token: {message}")]
    Authentication {
        /// Service message returned with the 401/403 response.
        message: String,
    },

    /// Azure DevOps returned a non-authentication error status.
    #[error("Azure DevOps API error ({status}): {message}")]
    Api {
        /// HTTP status code of the failed response.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Networking failed while calling Azure DevOps.
    #[error("network error talking to Azure DevOps: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("unexpected response from Azure DevOps: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Reading or writing the settings store failed.
    #[error("settings store error: {message}")]
    SettingsStore {
        /// Details about the store failure.
        message: String,
    },
}
