//! EdgeWorker IDs
//!
//! An EdgeWorker ID is the registration a group owns: a name, the group it
//! lives in, and the resource tier it runs on. Versions and activations
//! hang off an ID.

use crate::client::Client;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_GET_ID: &str = "getting EdgeWorker ID";
const OP_LIST_IDS: &str = "listing EdgeWorker IDs";
const OP_CREATE_ID: &str = "creating EdgeWorker ID";
const OP_UPDATE_ID: &str = "updating EdgeWorker ID";
const OP_CLONE_ID: &str = "cloning EdgeWorker ID";
const OP_DELETE_ID: &str = "deleting EdgeWorker ID";

/// An EdgeWorker ID record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeWorkerId {
    /// The identifier itself
    pub edge_worker_id: i64,
    /// Display name
    pub name: String,
    /// Account the registration belongs to
    pub account_id: String,
    /// Group that owns the registration
    pub group_id: i64,
    /// Resource tier the EdgeWorker runs on
    pub resource_tier_id: i64,
    /// When cloned, the registration this one was cloned from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_edge_worker_id: Option<i64>,
    /// User that created the registration
    pub created_by: String,
    /// Creation time, ISO-8601
    pub created_time: String,
    /// User that last modified the registration
    pub last_modified_by: String,
    /// Last modification time, ISO-8601
    pub last_modified_time: String,
}

/// Parameters for fetching an EdgeWorker ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetIdRequest {
    /// Registration to fetch
    pub edgeworker_id: i64,
}

/// Parameters for listing EdgeWorker IDs. Both filters are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListIdsRequest {
    /// Restrict the listing to one group
    pub group_id: i64,
    /// Restrict the listing to one resource tier
    pub resource_tier_id: i64,
}

/// Response of the EdgeWorker ID listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListIdsResponse {
    /// Registrations visible under the filters
    #[serde(rename = "edgeWorkerIds")]
    pub edgeworker_ids: Vec<EdgeWorkerId>,
}

/// Body of the create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdRequest {
    /// Display name
    pub name: String,
    /// Group to own the registration
    pub group_id: i64,
    /// Resource tier to run on
    pub resource_tier_id: i64,
}

/// Body shared by update and clone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdBody {
    /// Display name
    pub name: String,
    /// Group to own the registration
    pub group_id: i64,
    /// Resource tier to run on
    pub resource_tier_id: i64,
}

/// Parameters for updating an EdgeWorker ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIdRequest {
    /// Registration to update
    pub edgeworker_id: i64,
    /// Request body
    pub body: IdBody,
}

/// Parameters for cloning an EdgeWorker ID onto another resource tier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneIdRequest {
    /// Registration to clone
    pub edgeworker_id: i64,
    /// Request body
    pub body: IdBody,
}

/// Parameters for deleting an EdgeWorker ID.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteIdRequest {
    /// Registration to delete
    pub edgeworker_id: i64,
}

impl GetIdRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

impl CreateIdRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("name", &self.name);
        errors.require_id("group_id", self.group_id);
        errors.require_id("resource_tier_id", self.resource_tier_id);
        errors.finish()
    }
}

fn validate_id_with_body(
    edgeworker_id: i64,
    body: &IdBody,
) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require_id("edgeworker_id", edgeworker_id);
    errors.require_str("name", &body.name);
    errors.require_id("group_id", body.group_id);
    errors.require_id("resource_tier_id", body.resource_tier_id);
    errors.finish()
}

impl UpdateIdRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_id_with_body(self.edgeworker_id, &self.body)
    }
}

impl CloneIdRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        validate_id_with_body(self.edgeworker_id, &self.body)
    }
}

impl DeleteIdRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

/// EdgeWorker IDs API.
#[derive(Clone)]
pub struct IdsApi {
    client: Client,
}

impl IdsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a registration by id.
    ///
    /// GET `/edgeworkers/v1/ids/{id}`
    pub async fn get(&self, params: GetIdRequest) -> Result<EdgeWorkerId> {
        debug!("get EdgeWorker ID");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_ID, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}", params.edgeworker_id);
        self.client.get_json(OP_GET_ID, &path, StatusCode::OK).await
    }

    /// List registrations, optionally filtered by group and resource tier.
    ///
    /// GET `/edgeworkers/v1/ids[?groupId=..&resourceTierId=..]`
    pub async fn list(&self, params: ListIdsRequest) -> Result<ListIdsResponse> {
        debug!("list EdgeWorker IDs");

        let mut path = "/edgeworkers/v1/ids".to_string();
        let group_id = params.group_id.to_string();
        let resource_tier_id = params.resource_tier_id.to_string();
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if params.group_id != 0 {
            pairs.push(("groupId", &group_id));
        }
        if params.resource_tier_id != 0 {
            pairs.push(("resourceTierId", &resource_tier_id));
        }
        if !pairs.is_empty() {
            path.push('?');
            path.push_str(&query_string(&pairs));
        }

        self.client.get_json(OP_LIST_IDS, &path, StatusCode::OK).await
    }

    /// Register a new EdgeWorker ID.
    ///
    /// POST `/edgeworkers/v1/ids`, expects 201.
    pub async fn create(&self, params: CreateIdRequest) -> Result<EdgeWorkerId> {
        debug!("create EdgeWorker ID");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CREATE_ID, errors))?;

        self.client
            .send_json(
                OP_CREATE_ID,
                Method::POST,
                "/edgeworkers/v1/ids",
                &params,
                StatusCode::CREATED,
            )
            .await
    }

    /// Update a registration.
    ///
    /// PUT `/edgeworkers/v1/ids/{id}`
    pub async fn update(&self, params: UpdateIdRequest) -> Result<EdgeWorkerId> {
        debug!("update EdgeWorker ID");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_UPDATE_ID, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}", params.edgeworker_id);
        self.client
            .send_json(OP_UPDATE_ID, Method::PUT, &path, &params.body, StatusCode::OK)
            .await
    }

    /// Clone a registration onto a different resource tier.
    ///
    /// POST `/edgeworkers/v1/ids/{id}/clone`
    pub async fn clone_id(&self, params: CloneIdRequest) -> Result<EdgeWorkerId> {
        debug!("clone EdgeWorker ID");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CLONE_ID, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/clone", params.edgeworker_id);
        self.client
            .send_json(OP_CLONE_ID, Method::POST, &path, &params.body, StatusCode::OK)
            .await
    }

    /// Delete a registration.
    ///
    /// DELETE `/edgeworkers/v1/ids/{id}`, expects 204.
    pub async fn delete(&self, params: DeleteIdRequest) -> Result<()> {
        debug!("delete EdgeWorker ID");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DELETE_ID, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}", params.edgeworker_id);
        self.client
            .send_no_content(OP_DELETE_ID, Method::DELETE, &path, StatusCode::NO_CONTENT)
            .await
    }
}
