//! Contract listing
//!
//! Contract identifiers are needed to list resource tiers; this is the one
//! operation in the API with no parameters at all.

use crate::client::Client;
use crate::error::Result;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_LIST_CONTRACTS: &str = "listing contracts";

/// Response of the contract listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListContractsResponse {
    /// Contract identifiers usable with the resource tier listing
    pub contract_ids: Vec<String>,
}

/// Contracts API.
#[derive(Clone)]
pub struct ContractsApi {
    client: Client,
}

impl ContractsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// List the contract identifiers visible to the credential.
    ///
    /// GET `/edgeworkers/v1/contracts`
    pub async fn list(&self) -> Result<ListContractsResponse> {
        debug!("list contracts");
        self.client
            .get_json(OP_LIST_CONTRACTS, "/edgeworkers/v1/contracts", StatusCode::OK)
            .await
    }
}
