//! Helpers shared by scan providers.

use crate::transport::{HttpRequest, HttpTransport};
use lookout_analyzer::ScanError;
use lookout_core::{ApiKeys, IndicatorType};
use serde::de::DeserializeOwned;

/// Longest slice of an error body carried into a [`ScanError`].
const MAX_ERROR_BODY: usize = 200;

/// Reject types the scanner does not handle.
pub(crate) fn ensure_supported(
    scanner: &str,
    supported: &[IndicatorType],
    ty: IndicatorType,
) -> Result<(), ScanError> {
    if supported.contains(&ty) {
        Ok(())
    } else {
        Err(ScanError::UnsupportedType {
            scanner: scanner.to_string(),
            ty,
        })
    }
}

/// Fetch the scanner's API key or fail before any request is made.
pub(crate) fn require_key<'a>(scanner: &str, api_keys: &'a ApiKeys) -> Result<&'a str, ScanError> {
    api_keys.get(scanner).ok_or_else(|| ScanError::ApiKeyMissing {
        scanner: scanner.to_string(),
    })
}

pub(crate) fn request_failed(scanner: &str, message: impl Into<String>) -> ScanError {
    ScanError::RequestFailed {
        scanner: scanner.to_string(),
        message: message.into(),
    }
}

/// POST `request` and decode a successful JSON response.
pub(crate) async fn post_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    scanner: &str,
    request: HttpRequest,
) -> Result<T, ScanError> {
    let response = transport
        .post(request)
        .await
        .map_err(|e| request_failed(scanner, e.to_string()))?;

    if !response.is_success() {
        let body: String = response.body.chars().take(MAX_ERROR_BODY).collect();
        return Err(request_failed(
            scanner,
            format!("HTTP {}: {}", response.status, body.trim()),
        ));
    }

    response
        .json()
        .map_err(|e| request_failed(scanner, format!("unexpected response: {e}")))
}
