//! Resource tiers
//!
//! A resource tier bounds what an EdgeWorker may consume. Tiers are listed
//! per contract; every EdgeWorker ID is pinned to one tier.

use crate::client::Client;
use crate::endpoints::query_string;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_LIST_RESOURCE_TIERS: &str = "listing resource tiers";
const OP_GET_RESOURCE_TIER: &str = "getting resource tier";

/// A single resource tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceTier {
    /// Tier identifier
    #[serde(rename = "resourceTierId")]
    pub id: i64,
    /// Human-readable tier name
    #[serde(rename = "resourceTierName")]
    pub name: String,
    /// Limits enforced for EdgeWorkers on this tier
    #[serde(rename = "edgeWorkerLimits")]
    pub edgeworker_limits: Vec<EdgeWorkerLimit>,
}

/// A single limit within a resource tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeWorkerLimit {
    /// Limit name
    pub limit_name: String,
    /// Limit value
    pub limit_value: i64,
    /// Unit the value is expressed in
    pub limit_unit: String,
}

/// Parameters for listing resource tiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListResourceTiersRequest {
    /// Contract to list tiers for
    pub contract_id: String,
}

/// Response of the resource tier listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResourceTiersResponse {
    /// Available tiers
    pub resource_tiers: Vec<ResourceTier>,
}

/// Parameters for fetching the tier of an EdgeWorker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetResourceTierRequest {
    /// EdgeWorker whose tier to fetch
    pub edgeworker_id: i64,
}

impl ListResourceTiersRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_str("contract_id", &self.contract_id);
        errors.finish()
    }
}

impl GetResourceTierRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

/// Resource tiers API.
#[derive(Clone)]
pub struct ResourceTiersApi {
    client: Client,
}

impl ResourceTiersApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the resource tiers available under a contract.
    ///
    /// GET `/edgeworkers/v1/resource-tiers?contractId=X`
    pub async fn list(
        &self,
        params: ListResourceTiersRequest,
    ) -> Result<ListResourceTiersResponse> {
        debug!("list resource tiers");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_RESOURCE_TIERS, errors))?;

        let path = format!(
            "/edgeworkers/v1/resource-tiers?{}",
            query_string(&[("contractId", &params.contract_id)])
        );
        self.client
            .get_json(OP_LIST_RESOURCE_TIERS, &path, StatusCode::OK)
            .await
    }

    /// Fetch the resource tier an EdgeWorker runs on.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/resource-tier`
    pub async fn get(&self, params: GetResourceTierRequest) -> Result<ResourceTier> {
        debug!("get resource tier");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_RESOURCE_TIER, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/resource-tier", params.edgeworker_id);
        self.client
            .get_json(OP_GET_RESOURCE_TIER, &path, StatusCode::OK)
            .await
    }
}
