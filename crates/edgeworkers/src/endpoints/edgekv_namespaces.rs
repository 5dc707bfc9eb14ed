//! EdgeKV namespaces
//!
//! Namespaces partition the EdgeKV database per network. The EdgeKV API
//! family uses lower-case network names, unlike activations.

use crate::client::Client;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

const OP_LIST_NAMESPACES: &str = "listing EdgeKV namespaces";
const OP_GET_NAMESPACE: &str = "getting EdgeKV namespace";
const OP_CREATE_NAMESPACE: &str = "creating EdgeKV namespace";
const OP_UPDATE_NAMESPACE: &str = "updating EdgeKV namespace";
const OP_DELETE_NAMESPACE: &str = "deleting EdgeKV namespace";

const MAX_NAME_LEN: usize = 32;
const MIN_RETENTION_SECS: i64 = 86_400;
const MAX_RETENTION_SECS: i64 = 315_360_000;

/// Network an EdgeKV resource lives on. Wire values are lower case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeKvNetwork(Cow<'static, str>);

impl EdgeKvNetwork {
    /// The staging network
    pub const STAGING: Self = Self(Cow::Borrowed("staging"));
    /// The production network
    pub const PRODUCTION: Self = Self(Cow::Borrowed("production"));

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

    pub(crate) fn validate(&self, field: &'static str, errors: &mut ValidationErrors) {
        errors.require_one_of(field, self.as_str(), ["staging", "production"]);
    }
}

impl fmt::Display for EdgeKvNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A namespace record; also the create request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespace {
    /// Namespace name, 1 to 32 characters
    #[serde(rename = "namespace")]
    pub name: String,
    /// Geographic location the data is pinned to
    #[serde(rename = "geoLocation", skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<String>,
    /// Item retention in seconds; zero means indefinite
    #[serde(rename = "retentionInSeconds", skip_serializing_if = "Option::is_none")]
    pub retention: Option<i64>,
    /// Access control group for the namespace
    #[serde(rename = "groupId", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

/// The update request body; retention and group are mandatory here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNamespace {
    /// Namespace name, must match the path parameter
    #[serde(rename = "namespace")]
    pub name: String,
    /// Item retention in seconds; zero means indefinite
    #[serde(rename = "retentionInSeconds")]
    pub retention: Option<i64>,
    /// Access control group for the namespace
    #[serde(rename = "groupId")]
    pub group_id: Option<i64>,
}

/// Parameters for listing namespaces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNamespacesRequest {
    /// Network to list on
    pub network: EdgeKvNetwork,
    /// Include retention and group details in the listing
    pub details: bool,
}

/// Response of the namespace listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNamespacesResponse {
    /// Namespaces on the network
    pub namespaces: Vec<Namespace>,
}

/// Parameters for fetching a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetNamespaceRequest {
    /// Network the namespace lives on
    pub network: EdgeKvNetwork,
    /// Namespace name
    pub name: String,
}

/// Parameters for creating a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateNamespaceRequest {
    /// Network to create on
    pub network: EdgeKvNetwork,
    /// Request body
    pub body: Namespace,
}

/// Parameters for updating a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateNamespaceRequest {
    /// Network the namespace lives on
    pub network: EdgeKvNetwork,
    /// Request body
    pub body: UpdateNamespace,
}

/// Parameters for deleting a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteNamespaceRequest {
    /// Network the namespace lives on
    pub network: EdgeKvNetwork,
    /// Namespace name
    pub name: String,
    /// Delete synchronously instead of scheduling the deletion
    pub sync: bool,
}

/// Response of the namespace deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeleteNamespaceResponse {
    /// When the namespace will be deleted; absent for synchronous deletes
    pub scheduled_delete_time: Option<String>,
}

fn validate_name(errors: &mut ValidationErrors, name: &str) {
    if name.is_empty() {
        errors.add("name", "cannot be blank");
    } else if name.len() > MAX_NAME_LEN {
        errors.add(
            "name",
            format!("the length must be between 1 and {MAX_NAME_LEN}"),
        );
    }
}

fn validate_retention(errors: &mut ValidationErrors, retention: Option<i64>) {
    let Some(retention) = retention else {
        errors.add("retention", "cannot be blank");
        return;
    };
    if (retention != 0 && retention < MIN_RETENTION_SECS) || retention > MAX_RETENTION_SECS {
        errors.add(
            "retention",
            format!(
                "a non zero value specified for retention period cannot be less than \
                 {MIN_RETENTION_SECS} or more than {MAX_RETENTION_SECS}"
            ),
        );
    }
}

fn validate_group_id(errors: &mut ValidationErrors, group_id: Option<i64>) {
    match group_id {
        None => errors.add("group_id", "cannot be blank"),
        Some(id) if id < 0 => errors.add("group_id", "cannot be less than 0"),
        Some(_) => {}
    }
}

impl ListNamespacesRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        errors.finish()
    }
}

impl GetNamespaceRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        validate_name(&mut errors, &self.name);
        errors.finish()
    }
}

impl CreateNamespaceRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        validate_name(&mut errors, &self.body.name);
        validate_retention(&mut errors, self.body.retention);
        validate_group_id(&mut errors, self.body.group_id);
        errors.finish()
    }
}

impl UpdateNamespaceRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        validate_name(&mut errors, &self.body.name);
        validate_retention(&mut errors, self.body.retention);
        validate_group_id(&mut errors, self.body.group_id);
        errors.finish()
    }
}

impl DeleteNamespaceRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.network.validate("network", &mut errors);
        validate_name(&mut errors, &self.name);
        errors.finish()
    }
}

/// EdgeKV namespaces API.
#[derive(Clone)]
pub struct NamespacesApi {
    client: Client,
}

impl NamespacesApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the namespaces on a network.
    ///
    /// GET `/edgekv/v1/networks/{network}/namespaces[?details=on]`
    pub async fn list(&self, params: ListNamespacesRequest) -> Result<ListNamespacesResponse> {
        debug!("list EdgeKV namespaces");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_NAMESPACES, errors))?;

        let mut path = format!("/edgekv/v1/networks/{}/namespaces", params.network);
        if params.details {
            path.push('?');
            path.push_str(&query_string(&[("details", "on")]));
        }
        self.client
            .get_json(OP_LIST_NAMESPACES, &path, StatusCode::OK)
            .await
    }

    /// Fetch a namespace by name.
    ///
    /// GET `/edgekv/v1/networks/{network}/namespaces/{name}`
    pub async fn get(&self, params: GetNamespaceRequest) -> Result<Namespace> {
        debug!("get EdgeKV namespace");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_NAMESPACE, errors))?;

        let path = format!(
            "/edgekv/v1/networks/{}/namespaces/{}",
            params.network, params.name
        );
        self.client
            .get_json(OP_GET_NAMESPACE, &path, StatusCode::OK)
            .await
    }

    /// Create a namespace. The remote answers 200, not 201, for this
    /// create.
    ///
    /// POST `/edgekv/v1/networks/{network}/namespaces`
    pub async fn create(&self, params: CreateNamespaceRequest) -> Result<Namespace> {
        debug!("create EdgeKV namespace");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CREATE_NAMESPACE, errors))?;

        let path = format!("/edgekv/v1/networks/{}/namespaces", params.network);
        self.client
            .send_json(
                OP_CREATE_NAMESPACE,
                Method::POST,
                &path,
                &params.body,
                StatusCode::OK,
            )
            .await
    }

    /// Update a namespace's retention and group.
    ///
    /// PUT `/edgekv/v1/networks/{network}/namespaces/{name}`
    pub async fn update(&self, params: UpdateNamespaceRequest) -> Result<Namespace> {
        debug!("update EdgeKV namespace");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_UPDATE_NAMESPACE, errors))?;

        let path = format!(
            "/edgekv/v1/networks/{}/namespaces/{}",
            params.network, params.body.name
        );
        self.client
            .send_json(
                OP_UPDATE_NAMESPACE,
                Method::PUT,
                &path,
                &params.body,
                StatusCode::OK,
            )
            .await
    }

    /// Delete a namespace and everything in it. Asynchronous deletes (the
    /// default) are acknowledged with 202 and a scheduled delete time;
    /// synchronous deletes answer 200.
    ///
    /// DELETE `/edgekv/v1/networks/{network}/namespaces/{name}[?sync=true]`
    pub async fn delete(&self, params: DeleteNamespaceRequest) -> Result<DeleteNamespaceResponse> {
        debug!("delete EdgeKV namespace");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DELETE_NAMESPACE, errors))?;

        let mut path = format!(
            "/edgekv/v1/networks/{}/namespaces/{}",
            params.network, params.name
        );
        let expected = if params.sync {
            path.push('?');
            path.push_str(&query_string(&[("sync", "true")]));
            StatusCode::OK
        } else {
            StatusCode::ACCEPTED
        };

        self.client
            .request_json(OP_DELETE_NAMESPACE, Method::DELETE, &path, expected)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_body() -> Namespace {
        Namespace {
            name: "marketing".to_string(),
            geo_location: Some("EU".to_string()),
            retention: Some(86_400),
            group_id: Some(123),
        }
    }

    #[test]
    fn test_network_must_be_lowercase_set() {
        let request = ListNamespacesRequest {
            network: EdgeKvNetwork::new("STAGING"),
            details: false,
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field("network"),
            Some("value 'STAGING' is invalid. Must be one of: 'staging' or 'production'")
        );
    }

    #[test]
    fn test_create_validates_retention_window() {
        for (retention, ok) in [(0, true), (86_400, true), (3_600, false), (315_360_001, false)] {
            let request = CreateNamespaceRequest {
                network: EdgeKvNetwork::STAGING,
                body: Namespace {
                    retention: Some(retention),
                    ..valid_body()
                },
            };
            assert_eq!(request.validate().is_ok(), ok, "retention {retention}");
        }
    }

    #[test]
    fn test_create_rejects_long_name() {
        let request = CreateNamespaceRequest {
            network: EdgeKvNetwork::STAGING,
            body: Namespace {
                name: "n".repeat(33),
                ..valid_body()
            },
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field("name"),
            Some("the length must be between 1 and 32")
        );
    }

    #[test]
    fn test_create_rejects_negative_group() {
        let request = CreateNamespaceRequest {
            network: EdgeKvNetwork::PRODUCTION,
            body: Namespace {
                group_id: Some(-1),
                ..valid_body()
            },
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.field("group_id"), Some("cannot be less than 0"));
    }

    #[test]
    fn test_namespace_round_trips() {
        let json = r#"{
            "namespace": "marketing",
            "geoLocation": "EU",
            "retentionInSeconds": 86400,
            "groupId": 123
        }"#;
        let namespace: Namespace = serde_json::from_str(json).unwrap();
        assert_eq!(namespace, valid_body());
    }
}
