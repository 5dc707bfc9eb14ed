//! EdgeWorker activations
//!
//! An activation is a record of deploying a specific code version to a
//! network (staging or production). Activations are created, listed,
//! fetched by id, and canceled while still pending.

use crate::client::Client;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use tracing::debug;

const OP_LIST_ACTIVATIONS: &str = "listing activations";
const OP_GET_ACTIVATION: &str = "getting activation";
const OP_ACTIVATE_VERSION: &str = "activating version";
const OP_CANCEL_ACTIVATION: &str = "canceling activation";

/// Network an EdgeWorker version is activated on.
///
/// The wire values are upper case; [`ActivationNetwork::STAGING`] and
/// [`ActivationNetwork::PRODUCTION`] are the only values the API accepts,
/// which request validation enforces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationNetwork(Cow<'static, str>);

impl ActivationNetwork {
    /// The staging network
    pub const STAGING: Self = Self(Cow::Borrowed("STAGING"));
    /// The production network
    pub const PRODUCTION: Self = Self(Cow::Borrowed("PRODUCTION"));

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
        errors.require_one_of(field, self.as_str(), ["STAGING", "PRODUCTION"]);
    }
}

impl fmt::Display for ActivationNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An activation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Activation {
    /// Account the EdgeWorker belongs to
    pub account_id: String,
    /// Identifier of this activation
    pub activation_id: i64,
    /// User that requested the activation
    pub created_by: String,
    /// Creation time, ISO-8601
    pub created_time: String,
    /// EdgeWorker being activated
    pub edge_worker_id: i64,
    /// Last status change time, ISO-8601
    pub last_modified_time: String,
    /// Target network
    pub network: String,
    /// Current activation status (e.g. `PENDING`, `IN_PROGRESS`, `COMPLETE`)
    pub status: String,
    /// Version being activated
    pub version: String,
    /// Free-form note attached at activation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Parameters for listing activations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListActivationsRequest {
    /// EdgeWorker to list activations for
    pub edgeworker_id: i64,
    /// Restrict the listing to a single version
    pub version: Option<String>,
}

/// Response of the activation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListActivationsResponse {
    /// Activations, most recent first as returned by the service
    pub activations: Vec<Activation>,
}

/// Parameters for fetching a single activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetActivationRequest {
    /// EdgeWorker the activation belongs to
    pub edgeworker_id: i64,
    /// Activation to fetch
    pub activation_id: i64,
}

/// Parameters for activating a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivateVersionRequest {
    /// EdgeWorker to activate
    pub edgeworker_id: i64,
    /// Request body
    pub body: ActivateVersion,
}

/// Body of the activate-version call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateVersion {
    /// Target network
    pub network: ActivationNetwork,
    /// Version to activate
    pub version: String,
    /// Optional note recorded with the activation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Parameters for canceling a pending activation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelActivationRequest {
    /// EdgeWorker the activation belongs to
    pub edgeworker_id: i64,
    /// Activation to cancel
    pub activation_id: i64,
}

impl ListActivationsRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

impl GetActivationRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.require_id("activation_id", self.activation_id);
        errors.finish()
    }
}

impl ActivateVersionRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        self.body.network.validate("network", &mut errors);
        errors.require_str("version", &self.body.version);
        errors.finish()
    }
}

impl CancelActivationRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.require_id("activation_id", self.activation_id);
        errors.finish()
    }
}

/// Activations API.
#[derive(Clone)]
pub struct ActivationsApi {
    client: Client,
}

impl ActivationsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List activations for an EdgeWorker, optionally filtered by version.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/activations[?version=v]`
    pub async fn list(&self, params: ListActivationsRequest) -> Result<ListActivationsResponse> {
        debug!("list activations");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_ACTIVATIONS, errors))?;

        let mut path = format!("/edgeworkers/v1/ids/{}/activations", params.edgeworker_id);
        if let Some(version) = params.version.as_deref().filter(|v| !v.is_empty()) {
            path.push('?');
            path.push_str(&query_string(&[("version", version)]));
        }

        self.client
            .get_json(OP_LIST_ACTIVATIONS, &path, StatusCode::OK)
            .await
    }

    /// Fetch a single activation by id.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/activations/{activationId}`
    pub async fn get(&self, params: GetActivationRequest) -> Result<Activation> {
        debug!("get activation");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_ACTIVATION, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/activations/{}",
            params.edgeworker_id, params.activation_id
        );
        self.client
            .get_json(OP_GET_ACTIVATION, &path, StatusCode::OK)
            .await
    }

    /// Activate a version on a network.
    ///
    /// POST `/edgeworkers/v1/ids/{id}/activations`, expects 201.
    pub async fn activate_version(&self, params: ActivateVersionRequest) -> Result<Activation> {
        debug!("activate version");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_ACTIVATE_VERSION, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/activations", params.edgeworker_id);
        self.client
            .send_json(
                OP_ACTIVATE_VERSION,
                Method::POST,
                &path,
                &params.body,
                StatusCode::CREATED,
            )
            .await
    }

    /// Cancel an activation that is still pending.
    ///
    /// DELETE `/edgeworkers/v1/ids/{id}/activations/{activationId}`
    pub async fn cancel_pending(&self, params: CancelActivationRequest) -> Result<Activation> {
        debug!("cancel pending activation");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CANCEL_ACTIVATION, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/activations/{}",
            params.edgeworker_id, params.activation_id
        );
        self.client
            .request_json(OP_CANCEL_ACTIVATION, Method::DELETE, &path, StatusCode::OK)
            .await
    }
}
