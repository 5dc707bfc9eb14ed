//! EdgeKV access tokens
//!
//! Access tokens are what EdgeWorkers code presents to EdgeKV at runtime.
//! Tokens are created with a namespace permission map and retrieved,
//! listed and revoked by name.

use crate::client::Client;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

const OP_CREATE_TOKEN: &str = "creating EdgeKV access token";
const OP_GET_TOKEN: &str = "getting EdgeKV access token";
const OP_LIST_TOKENS: &str = "listing EdgeKV access tokens";
const OP_DELETE_TOKEN: &str = "deleting EdgeKV access token";

const MAX_NAME_LEN: usize = 32;

/// A single namespace permission: read, write or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    /// Read access
    pub const READ: Self = Self(Cow::Borrowed("r"));
    /// Write access
    pub const WRITE: Self = Self(Cow::Borrowed("w"));
    /// Delete access
    pub const DELETE: Self = Self(Cow::Borrowed("d"));

    /// Wrap an arbitrary value; anything outside the allowed set fails
    /// request validation.
    pub fn new(value: impl Into<String>) -> Self {
        Self(Cow::Owned(value.into()))
    }

    /// The wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_valid(&self) -> bool {
        matches!(self.as_str(), "r" | "w" | "d")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Namespace name to granted permissions.
pub type NamespacePermissions = BTreeMap<String, Vec<Permission>>;

/// Parameters for creating an access token. Doubles as the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccessTokenRequest {
    /// Whether the token is valid on the production network
    pub allow_on_production: bool,
    /// Whether the token is valid on the staging network
    pub allow_on_staging: bool,
    /// Friendly token name, 1 to 32 characters; tokens are retrieved by it
    pub name: String,
    /// Namespaces the token can reach, with per-namespace permissions
    pub namespace_permissions: NamespacePermissions,
    /// EdgeWorker IDs allowed to use the token; empty authorizes all
    #[serde(rename = "restrictToEdgeWorkerIds", skip_serializing_if = "Vec::is_empty")]
    pub restrict_to_edgeworker_ids: Vec<String>,
}

/// An access token as it appears in listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessToken {
    /// Expiry date, ISO-8601
    pub expiry: String,
    /// Token name
    pub name: String,
    /// Server-assigned token identifier
    pub uuid: String,
    /// `IN_PROGRESS`, `COMPLETE` or `ERROR`
    pub token_activation_status: Option<String>,
    /// Initial creation date, ISO-8601
    pub issue_date: Option<String>,
    /// Most recent refresh date; null when never refreshed
    pub latest_refresh_date: Option<String>,
    /// Next scheduled refresh date
    pub next_scheduled_refresh_date: Option<String>,
}

/// Full token representation returned by create and get.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessTokenDetails {
    /// Whether the token is valid on the production network
    pub allow_on_production: bool,
    /// Whether the token is valid on the staging network
    pub allow_on_staging: bool,
    /// CP code the token's traffic is billed under
    pub cpcode: String,
    /// Expiry date, ISO-8601
    pub expiry: String,
    /// Initial creation date, ISO-8601
    pub issue_date: String,
    /// Most recent refresh date; null when never refreshed
    pub latest_refresh_date: Option<String>,
    /// Token name
    pub name: String,
    /// Namespaces the token can reach
    pub namespace_permissions: NamespacePermissions,
    /// Next scheduled refresh date
    pub next_scheduled_refresh_date: String,
    /// EdgeWorker IDs allowed to use the token
    #[serde(rename = "restrictToEdgeWorkerIds")]
    pub restrict_to_edgeworker_ids: Option<Vec<String>>,
    /// `IN_PROGRESS`, `COMPLETE` or `ERROR`
    pub token_activation_status: String,
    /// Server-assigned token identifier
    pub uuid: String,
}

/// Parameters for fetching a token by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetAccessTokenRequest {
    /// Token name
    pub token_name: String,
}

/// Parameters for listing tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAccessTokensRequest {
    /// Include tokens that are already expired
    pub include_expired: bool,
}

/// Response of the token listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAccessTokensResponse {
    /// Known tokens
    pub tokens: Vec<AccessToken>,
}

/// Parameters for revoking a token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteAccessTokenRequest {
    /// Token name
    pub token_name: String,
}

/// Response of the token revocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAccessTokenResponse {
    /// Revoked token name
    pub name: String,
    /// Revoked token identifier
    pub uuid: String,
}

impl CreateAccessTokenRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.name.is_empty() {
            errors.add("name", "cannot be blank");
        } else if self.name.len() > MAX_NAME_LEN {
            errors.add("name", format!("the length must be between 1 and {MAX_NAME_LEN}"));
        }
        if !self.allow_on_staging && !self.allow_on_production {
            errors.add(
                "allow_on_staging",
                "at least one of staging or production must be allowed",
            );
        }
        if self.namespace_permissions.is_empty() {
            errors.add("namespace_permissions", "cannot be blank");
        }
        for (namespace, permissions) in &self.namespace_permissions {
            if namespace.is_empty() {
                errors.add("namespace_permissions", "namespace name cannot be blank");
            }
            if permissions.is_empty() {
                errors.add("namespace_permissions", "permissions cannot be blank");
            }
            for permission in permissions {
                if !permission.is_valid() {
                    errors.add(
                        "namespace_permissions",
                        format!(
                            "value '{permission}' is invalid. Must be one of: 'r', 'w' or 'd'"
                        ),
                    );
                }
            }
        }
        errors.finish()
    }
}

impl GetAccessTokenRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("token_name", &self.token_name);
        errors.finish()
    }
}

impl DeleteAccessTokenRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("token_name", &self.token_name);
        errors.finish()
    }
}

/// EdgeKV access tokens API.
#[derive(Clone)]
pub struct AccessTokensApi {
    client: Client,
}

impl AccessTokensApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create an access token. The remote answers 200 for this create.
    ///
    /// POST `/edgekv/v1/tokens`
    pub async fn create(&self, params: CreateAccessTokenRequest) -> Result<AccessTokenDetails> {
        debug!("create EdgeKV access token");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CREATE_TOKEN, errors))?;

        self.client
            .send_json(
                OP_CREATE_TOKEN,
                Method::POST,
                "/edgekv/v1/tokens",
                &params,
                StatusCode::OK,
            )
            .await
    }

    /// Fetch a token by name.
    ///
    /// GET `/edgekv/v1/tokens/{name}`
    pub async fn get(&self, params: GetAccessTokenRequest) -> Result<AccessTokenDetails> {
        debug!("get EdgeKV access token");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_TOKEN, errors))?;

        let path = format!("/edgekv/v1/tokens/{}", params.token_name);
        self.client.get_json(OP_GET_TOKEN, &path, StatusCode::OK).await
    }

    /// List tokens, optionally including expired ones.
    ///
    /// GET `/edgekv/v1/tokens[?includeExpired=true]`
    pub async fn list(&self, params: ListAccessTokensRequest) -> Result<ListAccessTokensResponse> {
        debug!("list EdgeKV access tokens");

        let mut path = "/edgekv/v1/tokens".to_string();
        if params.include_expired {
            path.push('?');
            path.push_str(&query_string(&[("includeExpired", "true")]));
        }
        self.client
            .get_json(OP_LIST_TOKENS, &path, StatusCode::OK)
            .await
    }

    /// Revoke a token.
    ///
    /// DELETE `/edgekv/v1/tokens/{name}`
    pub async fn delete(&self, params: DeleteAccessTokenRequest) -> Result<DeleteAccessTokenResponse> {
        debug!("delete EdgeKV access token");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DELETE_TOKEN, errors))?;

        let path = format!("/edgekv/v1/tokens/{}", params.token_name);
        self.client
            .request_json(OP_DELETE_TOKEN, Method::DELETE, &path, StatusCode::OK)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateAccessTokenRequest {
        CreateAccessTokenRequest {
            allow_on_production: false,
            allow_on_staging: true,
            name: "devexp-token-1".to_string(),
            namespace_permissions: NamespacePermissions::from([(
                "default".to_string(),
                vec![Permission::READ, Permission::WRITE, Permission::DELETE],
            )]),
            restrict_to_edgeworker_ids: vec!["42".to_string()],
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_requires_some_network() {
        let request = CreateAccessTokenRequest {
            allow_on_staging: false,
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field("allow_on_staging"),
            Some("at least one of staging or production must be allowed")
        );
    }

    #[test]
    fn test_rejects_unknown_permission() {
        let request = CreateAccessTokenRequest {
            namespace_permissions: NamespacePermissions::from([(
                "default".to_string(),
                vec![Permission::new("x")],
            )]),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field("namespace_permissions"),
            Some("value 'x' is invalid. Must be one of: 'r', 'w' or 'd'")
        );
    }

    #[test]
    fn test_token_details_deserialize() {
        let json = r#"{
            "allowOnProduction": false,
            "allowOnStaging": true,
            "cpcode": "123456",
            "expiry": "2022-03-30",
            "issueDate": "2022-01-04",
            "latestRefreshDate": null,
            "name": "devexp-token-1",
            "namespacePermissions": {
                "default": ["r", "w", "d"]
            },
            "nextScheduledRefreshDate": "2022-02-04",
            "restrictToEdgeWorkerIds": null,
            "tokenActivationStatus": "IN_PROGRESS",
            "uuid": "12f4792a-a8b8-5c28-a0b6-cfd6a3a4a4ab"
        }"#;

        let details: AccessTokenDetails = serde_json::from_str(json).unwrap();
        assert!(details.allow_on_staging);
        assert_eq!(details.cpcode, "123456");
        assert_eq!(details.restrict_to_edgeworker_ids, None);
        assert_eq!(
            details.namespace_permissions["default"],
            vec![Permission::READ, Permission::WRITE, Permission::DELETE]
        );
    }
}
