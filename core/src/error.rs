//! Error types for the Ragnabot API client.
//!
//! # Design
//! Every failure surfaced by the client lands in [`ApiError`]. Transport
//! failures and non-2xx statuses are collapsed into `Backend` so command
//! handlers never see transport-specific error types. Configuration problems
//! are raised before any request leaves the process.

use thiserror::Error;

/// Errors returned by the dispatcher and the client façade.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required setting is missing or malformed, e.g. no API key for an
    /// authenticated call.
    #[error("Ragnabot configuration error: {0}")]
    Configuration(String),

    /// The backend could not be reached, answered with a non-2xx status, or
    /// sent a body that is not JSON.
    #[error("Ragnabot API error: {0}")]
    Backend(String),

    /// The key validation call returned an empty result.
    #[error("Ragnabot Error: Invalid API Key.")]
    InvalidApiKey,

    /// The response did not match the shape expected for the endpoint.
    #[error("unexpected payload from {endpoint}: {reason}")]
    UnexpectedPayload { endpoint: String, reason: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    pub(crate) fn missing_credential() -> Self {
        ApiError::Configuration("RAGNABOT key MISSING".to_string())
    }

    pub(crate) fn unexpected(endpoint: impl ToString, reason: impl ToString) -> Self {
        ApiError::UnexpectedPayload {
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_message_is_stable() {
        assert_eq!(
            ApiError::InvalidApiKey.to_string(),
            "Ragnabot Error: Invalid API Key."
        );
    }

    #[test]
    fn backend_message_wraps_cause() {
        let err = ApiError::Backend("HTTP 502: bad gateway".to_string());
        assert_eq!(err.to_string(), "Ragnabot API error: HTTP 502: bad gateway");
    }

    #[test]
    fn missing_credential_is_a_configuration_error() {
        let err = ApiError::missing_credential();
        assert!(matches!(err, ApiError::Configuration(_)));
        assert!(err.to_string().contains("key MISSING"));
    }
}
