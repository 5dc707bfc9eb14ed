//! EdgeWorker deactivations
//!
//! Mirror image of activations: a deactivation removes a version from a
//! network. Unlike activations there is no cancel; a pending deactivation
//! runs to completion.

use crate::client::Client;
use crate::endpoints::activations::ActivationNetwork;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_LIST_DEACTIVATIONS: &str = "listing deactivations";
const OP_GET_DEACTIVATION: &str = "getting deactivation";
const OP_DEACTIVATE_VERSION: &str = "deactivating version";

/// A deactivation record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Deactivation {
    /// EdgeWorker being deactivated
    pub edge_worker_id: i64,
    /// Version being deactivated
    pub version: String,
    /// Identifier of this deactivation
    pub deactivation_id: i64,
    /// Account the EdgeWorker belongs to
    pub account_id: String,
    /// Current deactivation status
    pub status: String,
    /// Target network
    pub network: ActivationNetwork,
    /// Free-form note attached at deactivation time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// User that requested the deactivation
    pub created_by: String,
    /// Creation time, ISO-8601
    pub created_time: String,
    /// Last status change time, ISO-8601
    pub last_modified_time: String,
}

/// Parameters for listing deactivations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDeactivationsRequest {
    /// EdgeWorker to list deactivations for
    pub edgeworker_id: i64,
    /// Restrict the listing to a single version
    pub version: Option<String>,
}

/// Response of the deactivation listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDeactivationsResponse {
    /// Deactivations as returned by the service
    pub deactivations: Vec<Deactivation>,
}

/// Parameters for fetching a single deactivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetDeactivationRequest {
    /// EdgeWorker the deactivation belongs to
    pub edgeworker_id: i64,
    /// Deactivation to fetch
    pub deactivation_id: i64,
}

/// Parameters for deactivating a version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeactivateVersionRequest {
    /// EdgeWorker to deactivate
    pub edgeworker_id: i64,
    /// Request body
    pub body: DeactivateVersion,
}

/// Body of the deactivate-version call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeactivateVersion {
    /// Target network
    pub network: ActivationNetwork,
    /// Optional note recorded with the deactivation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Version to deactivate
    pub version: String,
}

impl ListDeactivationsRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

impl GetDeactivationRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.require_id("deactivation_id", self.deactivation_id);
        errors.finish()
    }
}

impl DeactivateVersionRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        self.body.network.validate("network", &mut errors);
        errors.require_str("version", &self.body.version);
        errors.finish()
    }
}

/// Deactivations API.
#[derive(Clone)]
pub struct DeactivationsApi {
    client: Client,
}

impl DeactivationsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List deactivations for an EdgeWorker, optionally filtered by version.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/deactivations[?version=v]`
    pub async fn list(
        &self,
        params: ListDeactivationsRequest,
    ) -> Result<ListDeactivationsResponse> {
        debug!("list deactivations");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_DEACTIVATIONS, errors))?;

        let mut path = format!("/edgeworkers/v1/ids/{}/deactivations", params.edgeworker_id);
        if let Some(version) = params.version.as_deref().filter(|v| !v.is_empty()) {
            path.push('?');
            path.push_str(&query_string(&[("version", version)]));
        }

        self.client
            .get_json(OP_LIST_DEACTIVATIONS, &path, StatusCode::OK)
            .await
    }

    /// Fetch a single deactivation by id.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/deactivations/{deactivationId}`
    pub async fn get(&self, params: GetDeactivationRequest) -> Result<Deactivation> {
        debug!("get deactivation");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_DEACTIVATION, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/deactivations/{}",
            params.edgeworker_id, params.deactivation_id
        );
        self.client
            .get_json(OP_GET_DEACTIVATION, &path, StatusCode::OK)
            .await
    }

    /// Deactivate a version on a network.
    ///
    /// POST `/edgeworkers/v1/ids/{id}/deactivations`, expects 201.
    pub async fn deactivate_version(
        &self,
        params: DeactivateVersionRequest,
    ) -> Result<Deactivation> {
        debug!("deactivate version");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DEACTIVATE_VERSION, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/deactivations", params.edgeworker_id);
        self.client
            .send_json(
                OP_DEACTIVATE_VERSION,
                Method::POST,
                &path,
                &params.body,
                StatusCode::CREATED,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivate_requires_version_and_network() {
        let errors = DeactivateVersionRequest {
            edgeworker_id: 42,
            body: DeactivateVersion::default(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.field("network"), Some("cannot be blank"));
        assert_eq!(errors.field("version"), Some("cannot be blank"));
    }

    #[test]
    fn test_deactivation_round_trips() {
        let json = r#"{
            "edgeWorkerId": 42,
            "version": "1",
            "deactivationId": 3,
            "accountId": "B-M-1KQK3WU",
            "status": "PENDING",
            "network": "PRODUCTION",
            "note": "not used",
            "createdBy": "jdoe",
            "createdTime": "2021-04-09T09:03:28Z",
            "lastModifiedTime": "2021-04-09T09:04:42Z"
        }"#;

        let deactivation: Deactivation = serde_json::from_str(json).unwrap();
        assert_eq!(deactivation.deactivation_id, 3);
        assert_eq!(deactivation.network, ActivationNetwork::PRODUCTION);
        assert_eq!(deactivation.status, "PENDING");
    }
}
