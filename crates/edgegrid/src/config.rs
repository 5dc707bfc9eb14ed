//! EdgeGrid credential configuration
//!
//! Credentials come from the environment (`AKAMAI_*` variables) or are
//! assembled programmatically through the builder-style `with_*` methods.

use crate::error::SessionError;
use serde::{Deserialize, Serialize};
use std::env;

/// Max request body size, in bytes, covered by the content signature.
pub const DEFAULT_MAX_BODY: usize = 131_072;

/// EdgeGrid credential set.
///
/// All four of `host`, `client_token`, `client_secret` and `access_token`
/// are required to produce a valid authorization header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API host, without scheme (e.g. `akab-xxxx.luna.akamaiapis.net`)
    pub host: String,
    /// Client token from the API credential
    pub client_token: String,
    /// Client secret from the API credential
    pub client_secret: String,
    /// Access token from the API credential
    pub access_token: String,
    /// Account switch key, for credentials that manage multiple accounts
    pub account_key: Option<String>,
    /// Extra header names included in the request signature
    pub headers_to_sign: Vec<String>,
    /// Max number of request body bytes covered by the content signature
    pub max_body: usize,
}

impl Config {
    /// Create a configuration from explicit credentials.
    pub fn new(
        host: impl Into<String>,
        client_token: impl Into<String>,
        client_secret: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_token: client_token.into(),
            client_secret: client_secret.into(),
            access_token: access_token.into(),
            account_key: None,
            headers_to_sign: Vec::new(),
            max_body: DEFAULT_MAX_BODY,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `AKAMAI_HOST`: API host
    /// - `AKAMAI_CLIENT_TOKEN`: client token
    /// - `AKAMAI_CLIENT_SECRET`: client secret
    /// - `AKAMAI_ACCESS_TOKEN`: access token
    /// - `AKAMAI_ACCOUNT_KEY`: account switch key (optional)
    /// - `AKAMAI_MAX_BODY`: content signature cap in bytes (optional)
    pub fn from_env() -> Result<Self, SessionError> {
        let require = |var: &str| env::var(var).map_err(|_| SessionError::missing_env(var));

        let max_body = env::var("AKAMAI_MAX_BODY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_BODY);

        let config = Self {
            host: require("AKAMAI_HOST")?,
            client_token: require("AKAMAI_CLIENT_TOKEN")?,
            client_secret: require("AKAMAI_CLIENT_SECRET")?,
            access_token: require("AKAMAI_ACCESS_TOKEN")?,
            account_key: env::var("AKAMAI_ACCOUNT_KEY").ok(),
            headers_to_sign: Vec::new(),
            max_body,
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder-style method to set the account switch key
    #[must_use]
    pub fn with_account_key(mut self, key: impl Into<String>) -> Self {
        self.account_key = Some(key.into());
        self
    }

    /// Builder-style method to set the headers included in the signature
    #[must_use]
    pub fn with_headers_to_sign(mut self, headers: Vec<String>) -> Self {
        self.headers_to_sign = headers;
        self
    }

    /// Builder-style method to set the content signature cap
    #[must_use]
    pub fn with_max_body(mut self, max_body: usize) -> Self {
        self.max_body = max_body;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SessionError> {
        for (field, value) in [
            ("host", &self.host),
            ("client_token", &self.client_token),
            ("client_secret", &self.client_secret),
            ("access_token", &self.access_token),
        ] {
            if value.is_empty() {
                return Err(SessionError::config(format!("{field} cannot be empty")));
            }
        }

        if self.host.contains("://") {
            return Err(SessionError::config("host must not contain a scheme"));
        }

        if self.max_body == 0 {
            return Err(SessionError::config("max_body cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config::new("akab-host.luna.akamaiapis.net", "token", "secret", "access")
    }

    #[test]
    fn test_valid_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let mut config = sample();
        config.client_secret = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client_secret"));
    }

    #[test]
    fn test_host_with_scheme_rejected() {
        let mut config = sample();
        config.host = "https://akab-host.luna.akamaiapis.net".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder() {
        let config = sample().with_account_key("1-ABCDE").with_max_body(2048);
        assert_eq!(config.account_key.as_deref(), Some("1-ABCDE"));
        assert_eq!(config.max_body, 2048);
    }

    #[test]
    fn test_from_env_missing_vars() {
        // Guarded by a variable name no other test sets.
        let err = Config::from_env();
        if env::var("AKAMAI_HOST").is_err() {
            assert!(matches!(err, Err(SessionError::MissingEnvVar(_))));
        }
    }
}
