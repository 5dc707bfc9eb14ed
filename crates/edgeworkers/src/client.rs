//! Main API client
//!
//! [`Client`] hands out one lightweight API value per resource family and
//! hosts the shared request executors every operation funnels through:
//! issue one signed call, compare the status against exactly one expected
//! code, decode the body on success, decode the problem-details payload
//! otherwise.

use crate::endpoints::activations::ActivationsApi;
use crate::endpoints::contracts::ContractsApi;
use crate::endpoints::deactivations::DeactivationsApi;
use crate::endpoints::edgekv_access_tokens::AccessTokensApi;
use crate::endpoints::edgekv_initialize::InitializeApi;
use crate::endpoints::edgekv_items::ItemsApi;
use crate::endpoints::edgekv_namespaces::NamespacesApi;
use crate::endpoints::ids::IdsApi;
use crate::endpoints::resource_tiers::ResourceTiersApi;
use crate::endpoints::secure_tokens::SecureTokensApi;
use crate::endpoints::versions::VersionsApi;
use crate::error::{ApiError, Error, Result};
use edgegrid::{Session, SessionError};
use reqwest::{Method, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// EdgeWorkers/EdgeKV API client.
///
/// Stateless apart from the signed session it wraps; cloning is cheap and
/// clones share the same underlying HTTP client.
#[derive(Clone)]
pub struct Client {
    session: Session,
}

impl Client {
    /// Create a client over a signed session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// The underlying signed session.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    // -------------------------------------------------------------------------
    // Resource API accessors
    // -------------------------------------------------------------------------

    /// Access EdgeWorker activation operations
    #[must_use]
    pub fn activations(&self) -> ActivationsApi {
        ActivationsApi::new(self.clone())
    }

    /// Access EdgeWorker deactivation operations
    #[must_use]
    pub fn deactivations(&self) -> DeactivationsApi {
        DeactivationsApi::new(self.clone())
    }

    /// Access contract listing
    #[must_use]
    pub fn contracts(&self) -> ContractsApi {
        ContractsApi::new(self.clone())
    }

    /// Access resource tier operations
    #[must_use]
    pub fn resource_tiers(&self) -> ResourceTiersApi {
        ResourceTiersApi::new(self.clone())
    }

    /// Access EdgeWorker ID operations
    #[must_use]
    pub fn ids(&self) -> IdsApi {
        IdsApi::new(self.clone())
    }

    /// Access EdgeWorker version operations
    #[must_use]
    pub fn versions(&self) -> VersionsApi {
        VersionsApi::new(self.clone())
    }

    /// Access secure token creation
    #[must_use]
    pub fn secure_tokens(&self) -> SecureTokensApi {
        SecureTokensApi::new(self.clone())
    }

    /// Access EdgeKV namespace operations
    #[must_use]
    pub fn edgekv_namespaces(&self) -> NamespacesApi {
        NamespacesApi::new(self.clone())
    }

    /// Access EdgeKV access token operations
    #[must_use]
    pub fn edgekv_access_tokens(&self) -> AccessTokensApi {
        AccessTokensApi::new(self.clone())
    }

    /// Access EdgeKV item operations
    #[must_use]
    pub fn edgekv_items(&self) -> ItemsApi {
        ItemsApi::new(self.clone())
    }

    /// Access EdgeKV database initialization
    #[must_use]
    pub fn edgekv_initialize(&self) -> InitializeApi {
        InitializeApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // Shared executors
    // -------------------------------------------------------------------------

    /// GET expecting a JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        path: &str,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self
            .session
            .get(path)
            .await
            .map_err(|err| Error::transport(op, err))?;
        self.decode_json(op, response, expected).await
    }

    /// Bodyless request expecting a JSON response.
    pub(crate) async fn request_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self
            .session
            .send(method, path)
            .await
            .map_err(|err| Error::transport(op, err))?;
        self.decode_json(op, response, expected).await
    }

    /// JSON-bodied request expecting a JSON response.
    pub(crate) async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        body: &B,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self
            .session
            .send_json(method, path, body)
            .await
            .map_err(|err| Error::transport(op, err))?;
        self.decode_json(op, response, expected).await
    }

    /// Bodyless request where success carries no payload (204 deletes).
    pub(crate) async fn send_no_content(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        expected: StatusCode,
    ) -> Result<()> {
        let response = self
            .session
            .send(method, path)
            .await
            .map_err(|err| Error::transport(op, err))?;
        self.check_status(op, response, expected).await?;
        Ok(())
    }

    /// Request whose successful response body is raw text (EdgeKV items).
    pub(crate) async fn send_text(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        body: Option<(Vec<u8>, &str)>,
        expected: StatusCode,
    ) -> Result<String> {
        let result = match body {
            Some((bytes, content_type)) => {
                self.session.send_raw(method, path, bytes, content_type).await
            }
            None => self.session.send(method, path).await,
        };
        let response = result.map_err(|err| Error::transport(op, err))?;
        let response = self.check_status(op, response, expected).await?;
        response
            .text()
            .await
            .map_err(|err| Error::transport(op, SessionError::Request(err)))
    }

    /// GET whose successful response body is raw bytes (version bundles).
    pub(crate) async fn get_bytes(
        &self,
        op: &'static str,
        path: &str,
        expected: StatusCode,
    ) -> Result<Vec<u8>> {
        let response = self
            .session
            .get(path)
            .await
            .map_err(|err| Error::transport(op, err))?;
        let response = self.check_status(op, response, expected).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|err| Error::transport(op, SessionError::Request(err)))
    }

    /// Raw-bodied request expecting a JSON response (version uploads).
    pub(crate) async fn send_raw_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self
            .session
            .send_raw(method, path, body, content_type)
            .await
            .map_err(|err| Error::transport(op, err))?;
        self.decode_json(op, response, expected).await
    }

    async fn decode_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        response: Response,
        expected: StatusCode,
    ) -> Result<T> {
        let response = self.check_status(op, response, expected).await?;
        response
            .json()
            .await
            .map_err(|err| Error::transport(op, SessionError::Request(err)))
    }

    async fn check_status(
        &self,
        op: &'static str,
        response: Response,
        expected: StatusCode,
    ) -> Result<Response> {
        if response.status() == expected {
            Ok(response)
        } else {
            Err(Error::api(op, ApiError::from_response(response).await))
        }
    }
}
