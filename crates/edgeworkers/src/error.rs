//! Error types for the EdgeWorkers/EdgeKV client
//!
//! Three failure categories exist, and every one of them is wrapped with
//! the name of the operation that produced it:
//!
//! - local validation failures that never reach the network,
//! - transport failures raised before a response was obtained,
//! - remote API errors, decoded from the problem-details payload.

use crate::validation::ValidationErrors;
use edgegrid::SessionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure an API operation can produce.
#[derive(Error, Debug)]
pub enum Error {
    /// The request failed local validation; no HTTP call was made.
    #[error("{op}: struct validation: {source}")]
    Validation {
        /// Operation that rejected the request
        op: &'static str,
        /// Collected field failures
        #[source]
        source: ValidationErrors,
    },

    /// The HTTP exchange failed before a response was obtained.
    #[error("{op}: request failed: {source}")]
    Transport {
        /// Operation that issued the request
        op: &'static str,
        /// Underlying transport failure
        #[source]
        source: SessionError,
    },

    /// The remote API answered with an unexpected status code.
    #[error("{op}: {source}")]
    Api {
        /// Operation that issued the request
        op: &'static str,
        /// Decoded problem-details payload
        #[source]
        source: ApiError,
    },
}

impl Error {
    pub(crate) fn validation(op: &'static str, source: ValidationErrors) -> Self {
        Self::Validation { op, source }
    }

    pub(crate) fn transport(op: &'static str, source: SessionError) -> Self {
        Self::Transport { op, source }
    }

    pub(crate) fn api(op: &'static str, source: ApiError) -> Self {
        Self::Api { op, source }
    }

    /// Name of the operation this error came from.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Validation { op, .. } | Self::Transport { op, .. } | Self::Api { op, .. } => op,
        }
    }

    /// The decoded API payload, when the remote answered with an error.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Whether this is a remote API error matching the given sentinel
    /// condition. Validation and transport failures never match.
    #[must_use]
    pub fn matches(&self, condition: ErrorCondition) -> bool {
        self.as_api_error()
            .is_some_and(|api| api.matches(condition))
    }
}

/// Problem-details payload returned by the remote API on failure.
///
/// All fields default so partially populated payloads decode cleanly; the
/// HTTP status code is always stamped from the response, overriding
/// whatever the payload claimed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiError {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Short human-readable summary
    pub title: String,
    /// Detailed explanation of this occurrence
    pub detail: String,
    /// URI identifying this occurrence
    pub instance: String,
    /// HTTP status code of the response
    pub status: u16,
    /// Vendor error code (e.g. `EW2002`, `EKV_3000`)
    pub error_code: String,
    /// HTTP method of the failed request
    pub method: String,
    /// Server address that produced the error
    pub server_ip: String,
    /// Client address as seen by the server
    pub client_ip: String,
    /// Request identifier assigned by the server
    pub request_id: String,
    /// Time the request was received
    pub request_time: String,
    /// Extra diagnostic data some API families attach
    pub additional_detail: Option<AdditionalDetail>,
}

/// Nested diagnostic object carried by EdgeKV error payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdditionalDetail {
    /// Request identifier assigned by the server
    pub request_id: String,
}

impl ApiError {
    /// Decode an error payload from a non-success response.
    ///
    /// A body that is not valid JSON still yields a usable value: the raw
    /// content lands in `detail` and the status code is kept.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        let mut error: ApiError = serde_json::from_str(&body).unwrap_or_else(|_| ApiError {
            title: "Failed to parse error body".to_string(),
            detail: body.trim().to_string(),
            ..ApiError::default()
        });
        error.status = status;
        error
    }

    /// Whether this error matches a sentinel condition, keyed by HTTP
    /// status and vendor error code.
    #[must_use]
    pub fn matches(&self, condition: ErrorCondition) -> bool {
        self.status == condition.status && self.error_code == condition.error_code
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string_pretty(self) {
            Ok(json) => write!(f, "API error:\n{json}"),
            Err(err) => write!(f, "error rendering API error: {err}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// A sentinel API failure, identified by HTTP status plus vendor error
/// code. Compare with [`ApiError::matches`] or [`Error::matches`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCondition {
    /// Expected HTTP status code
    pub status: u16,
    /// Expected vendor error code
    pub error_code: &'static str,
}

/// The requested resource does not exist on the server.
pub const NOT_FOUND: ErrorCondition = ErrorCondition {
    status: 404,
    error_code: "EW2002",
};

/// The secret key for the requested EdgeWorker could not be found.
pub const SECRET_KEY_NOT_FOUND: ErrorCondition = ErrorCondition {
    status: 404,
    error_code: "EW2301",
};

/// The version is already deactivated on the target network.
pub const VERSION_ALREADY_DEACTIVATED: ErrorCondition = ErrorCondition {
    status: 409,
    error_code: "EW2303",
};

/// An EdgeKV access token with the same name already exists.
pub const TOKEN_ALREADY_EXISTS: ErrorCondition = ErrorCondition {
    status: 409,
    error_code: "EKV_3000",
};

/// The account has reached its EdgeKV namespace quota.
pub const NAMESPACE_LIMIT_REACHED: ErrorCondition = ErrorCondition {
    status: 413,
    error_code: "EKV_9000",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_problem_details() {
        let body = r#"{
            "type": "/edgeworkers/error-types/edgeworkers-server-error",
            "title": "An unexpected error has occurred.",
            "detail": "Error processing request",
            "instance": "/edgeworkers/error-instances/abc",
            "status": 500,
            "errorCode": "EW4303"
        }"#;

        let error: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(
            error.error_type,
            "/edgeworkers/error-types/edgeworkers-server-error"
        );
        assert_eq!(error.title, "An unexpected error has occurred.");
        assert_eq!(error.status, 500);
        assert_eq!(error.error_code, "EW4303");
        assert!(error.additional_detail.is_none());
    }

    #[test]
    fn test_decode_additional_detail() {
        let body = r#"{
            "detail": "Token with name devexp-token-1 is already stored.",
            "errorCode": "EKV_3000",
            "status": 409,
            "title": "Conflict",
            "type": "https://learn.akamai.com",
            "additionalDetail": {
                "requestId": "bc7561cda1f3021b"
            }
        }"#;

        let error: ApiError = serde_json::from_str(body).unwrap();
        assert_eq!(
            error.additional_detail,
            Some(AdditionalDetail {
                request_id: "bc7561cda1f3021b".to_string()
            })
        );
        assert!(error.matches(TOKEN_ALREADY_EXISTS));
        assert!(!error.matches(NOT_FOUND));
    }

    #[test]
    fn test_sentinel_requires_both_status_and_code() {
        let error = ApiError {
            status: 404,
            error_code: "EW9999".to_string(),
            ..ApiError::default()
        };
        assert!(!error.matches(NOT_FOUND));

        let error = ApiError {
            status: 404,
            error_code: "EW2002".to_string(),
            ..ApiError::default()
        };
        assert!(error.matches(NOT_FOUND));
    }

    #[test]
    fn test_display_renders_payload() {
        let error = ApiError {
            title: "Conflict".to_string(),
            status: 409,
            ..ApiError::default()
        };
        let rendered = error.to_string();
        assert!(rendered.starts_with("API error:"));
        assert!(rendered.contains("\"title\": \"Conflict\""));
    }

    #[test]
    fn test_error_matches_passthrough() {
        let err = Error::api(
            "canceling activation",
            ApiError {
                status: 404,
                error_code: "EW2002".to_string(),
                ..ApiError::default()
            },
        );
        assert!(err.matches(NOT_FOUND));
        assert_eq!(err.operation(), "canceling activation");
    }
}
