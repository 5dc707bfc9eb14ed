//! EdgeWorker versions
//!
//! A version is an immutable code bundle uploaded under an EdgeWorker ID.
//! The bundle travels as gzipped tar bytes; everything else is JSON.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::validation::ValidationErrors;
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

const OP_GET_VERSION: &str = "getting version";
const OP_LIST_VERSIONS: &str = "listing versions";
const OP_GET_VERSION_CONTENT: &str = "getting version content";
const OP_CREATE_VERSION: &str = "creating version";
const OP_DELETE_VERSION: &str = "deleting version";

const BUNDLE_CONTENT_TYPE: &str = "application/gzip";

/// A version record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeWorkerVersion {
    /// EdgeWorker the version belongs to
    pub edge_worker_id: i64,
    /// Version string
    pub version: String,
    /// Account the EdgeWorker belongs to
    pub account_id: String,
    /// Bundle checksum
    pub checksum: String,
    /// Upload sequence number
    pub sequence_number: i64,
    /// User that uploaded the version
    pub created_by: String,
    /// Upload time, ISO-8601
    pub created_time: String,
}

/// Code bundle bytes (a gzipped tar archive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bundle(pub Vec<u8>);

impl Bundle {
    /// Bundle size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bundle holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bundle {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Parameters identifying one version of one EdgeWorker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequest {
    /// EdgeWorker the version belongs to
    pub edgeworker_id: i64,
    /// Version string
    pub version: String,
}

/// Parameters for listing versions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListVersionsRequest {
    /// EdgeWorker to list versions for
    pub edgeworker_id: i64,
}

/// Response of the version listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListVersionsResponse {
    /// Uploaded versions
    pub versions: Vec<EdgeWorkerVersion>,
}

/// Parameters for uploading a new version bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateVersionRequest {
    /// EdgeWorker to upload under
    pub edgeworker_id: i64,
    /// Gzipped tar bundle
    pub content_bundle: Bundle,
}

impl VersionRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.require_str("version", &self.version);
        errors.finish()
    }
}

impl ListVersionsRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        errors.finish()
    }
}

impl CreateVersionRequest {
    /// Validate the request.
    pub fn validate(&self) -> std::result::Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_id("edgeworker_id", self.edgeworker_id);
        if self.content_bundle.is_empty() {
            errors.add("content_bundle", "cannot be blank");
        }
        errors.finish()
    }
}

/// Versions API.
#[derive(Clone)]
pub struct VersionsApi {
    client: Client,
}

impl VersionsApi {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Fetch a version record.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/versions/{version}`
    pub async fn get(&self, params: VersionRequest) -> Result<EdgeWorkerVersion> {
        debug!("get version");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_VERSION, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/versions/{}",
            params.edgeworker_id, params.version
        );
        self.client
            .get_json(OP_GET_VERSION, &path, StatusCode::OK)
            .await
    }

    /// List the versions uploaded under an EdgeWorker.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/versions`
    pub async fn list(&self, params: ListVersionsRequest) -> Result<ListVersionsResponse> {
        debug!("list versions");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_LIST_VERSIONS, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/versions", params.edgeworker_id);
        self.client
            .get_json(OP_LIST_VERSIONS, &path, StatusCode::OK)
            .await
    }

    /// Download the code bundle of a version.
    ///
    /// GET `/edgeworkers/v1/ids/{id}/versions/{version}/content`
    pub async fn get_content(&self, params: VersionRequest) -> Result<Bundle> {
        debug!("get version content");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_GET_VERSION_CONTENT, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/versions/{}/content",
            params.edgeworker_id, params.version
        );
        self.client
            .get_bytes(OP_GET_VERSION_CONTENT, &path, StatusCode::OK)
            .await
            .map(Bundle)
    }

    /// Upload a new version bundle.
    ///
    /// POST `/edgeworkers/v1/ids/{id}/versions` with an `application/gzip`
    /// body, expects 201.
    pub async fn create(&self, params: CreateVersionRequest) -> Result<EdgeWorkerVersion> {
        debug!("create version");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_CREATE_VERSION, errors))?;

        let path = format!("/edgeworkers/v1/ids/{}/versions", params.edgeworker_id);
        self.client
            .send_raw_json(
                OP_CREATE_VERSION,
                Method::POST,
                &path,
                params.content_bundle.0,
                BUNDLE_CONTENT_TYPE,
                StatusCode::CREATED,
            )
            .await
    }

    /// Delete a version.
    ///
    /// DELETE `/edgeworkers/v1/ids/{id}/versions/{version}`, expects 204.
    pub async fn delete(&self, params: VersionRequest) -> Result<()> {
        debug!("delete version");
        params
            .validate()
            .map_err(|errors| Error::validation(OP_DELETE_VERSION, errors))?;

        let path = format!(
            "/edgeworkers/v1/ids/{}/versions/{}",
            params.edgeworker_id, params.version
        );
        self.client
            .send_no_content(OP_DELETE_VERSION, Method::DELETE, &path, StatusCode::NO_CONTENT)
            .await
    }
}
