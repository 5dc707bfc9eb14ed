//! EdgeKV database initialization
//!
//! A one-time, account-wide switch. Initialization is idempotent on the
//! server side; the status endpoint reports how far it has progressed on
//! each network.

use crate::client::Client;
use crate::error::Result;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_INITIALIZE: &str = "initializing EdgeKV";
const OP_GET_INITIALIZATION_STATUS: &str = "getting EdgeKV initialization status";

const INITIALIZE_PATH: &str = "/edgekv/v1/initialize";

/// Initialization state of the EdgeKV database.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InitializationStatus {
    /// Account-wide status (`UNINITIALIZED`, `PENDING`, `INITIALIZED`)
    pub account_status: String,
    /// CP code EdgeKV traffic is billed under
    pub cpcode: String,
    /// Status on the production network
    pub production_status: String,
    /// Status on the staging network
    pub staging_status: String,
}

/// EdgeKV initialization API.
#[derive(Clone)]
pub struct InitializeApi {
    client: Client,
}

impl InitializeApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Initialize the EdgeKV database for the account.
    ///
    /// PUT `/edgekv/v1/initialize`, expects 201.
    pub async fn initialize(&self) -> Result<InitializationStatus> {
        debug!("initialize EdgeKV");
        self.client
            .request_json(
                OP_INITIALIZE,
                Method::PUT,
                INITIALIZE_PATH,
                StatusCode::CREATED,
            )
            .await
    }

    /// Report the current initialization status.
    ///
    /// GET `/edgekv/v1/initialize`
    pub async fn status(&self) -> Result<InitializationStatus> {
        debug!("get EdgeKV initialization status");
        self.client
            .get_json(OP_GET_INITIALIZATION_STATUS, INITIALIZE_PATH, StatusCode::OK)
            .await
    }
}
