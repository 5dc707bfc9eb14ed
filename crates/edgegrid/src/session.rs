//! Signed-request session
//!
//! [`Session`] owns the `reqwest` client and the credential set, signs every
//! outgoing request, and returns the raw response. It keeps no state across
//! calls and is cheap to clone.

use crate::config::Config;
use crate::error::SessionError;
use crate::signer;
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

const DEFAULT_USER_AGENT: &str = concat!("edgegrid-rust/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Signed HTTP session shared by the API crates.
///
/// Each call issues exactly one request. There is no retry, no caching and
/// no shared mutable state; concurrent use is as safe as the underlying
/// `reqwest` client.
#[derive(Clone)]
pub struct Session {
    client: Client,
    config: Arc<Config>,
    base_url: String,
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: Config,
    base_url: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl Session {
    /// Start building a session from a credential set.
    pub fn builder(config: Config) -> SessionBuilder {
        SessionBuilder {
            config,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// The credential set this session signs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a signed GET request.
    pub async fn get(&self, path: &str) -> Result<Response, SessionError> {
        self.execute(Method::GET, path, None).await
    }

    /// Issue a signed DELETE request.
    pub async fn delete(&self, path: &str) -> Result<Response, SessionError> {
        self.execute(Method::DELETE, path, None).await
    }

    /// Issue a signed request without a body.
    pub async fn send(&self, method: Method, path: &str) -> Result<Response, SessionError> {
        self.execute(method, path, None).await
    }

    /// Issue a signed request carrying a JSON body.
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, SessionError> {
        let bytes = serde_json::to_vec(body)?;
        self.execute(method, path, Some((bytes, "application/json")))
            .await
    }

    /// Issue a signed request carrying a raw body with an explicit
    /// content type (EdgeKV items, version bundles).
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<Response, SessionError> {
        self.execute(method, path, Some((body, content_type))).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<(Vec<u8>, &str)>,
    ) -> Result<Response, SessionError> {
        let mut url = Url::parse(&format!("{}{path}", self.base_url))
            .map_err(|err| SessionError::InvalidUrl(format!("{path}: {err}")))?;

        if let Some(account_key) = &self.config.account_key {
            url.query_pairs_mut()
                .append_pair("accountSwitchKey", account_key);
        }

        let mut headers = HeaderMap::new();
        if let Some((_, content_type)) = &body {
            let value = HeaderValue::from_str(content_type)
                .map_err(|_| SessionError::config(format!("invalid content type: {content_type}")))?;
            headers.insert(CONTENT_TYPE, value);
        }

        let timestamp = Utc::now().format(signer::TIMESTAMP_FORMAT).to_string();
        let nonce = Uuid::new_v4().to_string();
        let body_bytes = body.as_ref().map_or(&[][..], |(bytes, _)| bytes.as_slice());
        let auth = signer::authorization(
            &self.config,
            &method,
            &url,
            &headers,
            body_bytes,
            &timestamp,
            &nonce,
        );

        debug!(method = %method, url = %url, "executing signed request");

        let mut request = self
            .client
            .request(method, url)
            .headers(headers)
            .header(AUTHORIZATION, auth);
        if let Some((bytes, _)) = body {
            request = request.body(bytes);
        }

        Ok(request.send().await?)
    }
}

impl SessionBuilder {
    /// Override the base URL (plain-http endpoints are accepted, which is
    /// what test servers use). Defaults to `https://{config.host}`.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the user agent header.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration and build the session.
    pub fn build(self) -> Result<Session, SessionError> {
        self.config.validate()?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.user_agent)
                .map_err(|_| SessionError::config("invalid user agent"))?,
        );

        let client = Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(SessionError::Request)?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| format!("https://{}", self.config.host))
            .trim_end_matches('/')
            .to_string();

        Ok(Session {
            client,
            config: Arc::new(self.config),
            base_url,
        })
    }
}
