//! Shared HTTP utilities for gateway implementations.

/// Extracts the human readable `message` from an Azure DevOps error body.
///
/// Error responses look like
/// `{"$id":"1","message":"TF401019: ...","typeKey":"...","errorCode":0}`.
pub(super) fn extract_service_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        let trimmed = body.trim();
        return (!trimmed.is_empty()).then(|| trimmed.to_owned());
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
