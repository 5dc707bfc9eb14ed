//! Secure trace tokens
//!
//! A secure token authorizes enhanced debug headers for a hostname; the
//! API has a single create operation.

use crate::client::Client;
use crate::endpoints::activations::ActivationNetwork;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_CREATE_SECURE_TOKEN: &str = "creating secure token";

/// Longest allowed token lifetime, in minutes.
const MAX_EXPIRY_MINUTES: i64 = 720;

/// Parameters for creating a secure token. Doubles as the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecureTokenRequest {
    /// Path prefix the token is valid for; mutually exclusive with `url`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acl: Option<String>,
    /// Token lifetime in minutes, up to 720; zero takes the server default
    #[serde(skip_serializing_if = "is_zero")]
    pub expiry: i64,
    /// Hostname the token is issued for
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    /// Network to issue the token on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<ActivationNetwork>,
    /// Property the hostname belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    /// Exact URL the token is valid for; mutually exclusive with `acl`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// Response of the secure token creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecureTokenResponse {
    /// Value for the `akamai-ew-trace` debug header
    #[serde(rename = "akamaiEwTrace")]
    pub akamai_ew_trace: String,
}

impl CreateSecureTokenRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("hostname", &self.hostname);
        if self.acl.is_some() && self.url.is_some() {
            errors.add("acl", "cannot be used together with url");
        }
        if self.expiry < 0 || self.expiry > MAX_EXPIRY_MINUTES {
            errors.add(
                "expiry",
                format!("must be between 1 and {MAX_EXPIRY_MINUTES} minutes"),
            );
        }
        if let Some(network) = &self.network {
            network.validate("network", &mut errors);
        }
        errors.finish()
    }
}

/// Secure tokens API.
#[derive(Clone)]
pub struct SecureTokensApi {
    client: Client,
}

impl SecureTokensApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a secure trace token.
    ///
    /// POST `/edgeworkers/v1/secure-token`, expects 201.
    pub async fn create(
        &self,
        params: CreateSecureTokenRequest,
    ) -> Result<CreateSecureTokenResponse> {
        debug!("create secure token");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CREATE_SECURE_TOKEN, errors))?;

        self.client
            .send_json(
                OP_CREATE_SECURE_TOKEN,
                Method::POST,
                "/edgeworkers/v1/secure-token",
                &params,
                StatusCode::CREATED,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_invalid() {
        let errors = CreateSecureTokenRequest::default().validate().unwrap_err();
        assert_eq!(errors.field("hostname"), Some("cannot be blank"));
    }

    #[test]
    fn test_acl_and_url_mutually_exclusive() {
        let request = CreateSecureTokenRequest {
            acl: Some("/*".to_string()),
            expiry: 15,
            hostname: "test.devexp.akamai.com".to_string(),
            url: Some("/".to_string()),
            ..CreateSecureTokenRequest::default()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field("acl"), Some("cannot be used together with url"));
    }

    #[test]
    fn test_expiry_range() {
        let request = CreateSecureTokenRequest {
            acl: Some("/*".to_string()),
            expiry: 1440,
            hostname: "test.devexp.akamai.com".to_string(),
            ..CreateSecureTokenRequest::default()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field("expiry"),
            Some("must be between 1 and 720 minutes")
        );
    }

    #[test]
    fn test_body_omits_unset_fields() {
        let request = CreateSecureTokenRequest {
            hostname: "test.devexp.akamai.com".to_string(),
            property_id: Some("200153206".to_string()),
            ..CreateSecureTokenRequest::default()
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"hostname":"test.devexp.akamai.com","propertyId":"200153206"}"#
        );
    }
}
