//! Error mapping helpers for the reqwest-backed Azure DevOps gateway.

use http::StatusCode;

use crate::devops::error::IntakeError;

/// Checks if a response status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Checks if a reqwest error represents a network/transport issue.
pub(super) fn is_network_error(error: &reqwest::Error) -> bool {
    error.is_connect() || error.is_timeout() || error.is_request()
}

pub(super) fn map_transport_error(operation: &str, error: &reqwest::Error) -> IntakeError {
    if error.is_decode() {
        return map_decode_error(operation, error);
    }

    if is_network_error(error) {
        return IntakeError::Network {
            message: format!("{operation} failed: {error}"),
        };
    }

    IntakeError::Network {
        message: format!("{operation} failed unexpectedly: {error}"),
    }
}

pub(super) fn map_decode_error(operation: &str, error: &reqwest::Error) -> IntakeError {
    IntakeError::Decode {
        message: format!("{operation} response could not be decoded: {error}"),
    }
}

pub(super) fn map_http_error(
    operation: &str,
    status: StatusCode,
    maybe_message: Option<String>,
) -> IntakeError {
    let message = maybe_message.unwrap_or_else(|| "unknown error".to_owned());
    if is_auth_failure(status) {
        IntakeError::Authentication {
            message: format!("{operation} failed: Azure DevOps returned {status} {message}"),
        }
    } else {
        IntakeError::Api {
            status: status.as_u16(),
            message: format!("{operation} failed: {message}"),
        }
    }
}
