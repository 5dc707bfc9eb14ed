//! EG1-HMAC-SHA256 request signing
//!
//! The authorization header has the shape
//!
//! ```text
//! EG1-HMAC-SHA256 client_token=..;access_token=..;timestamp=..;nonce=..;signature=..
//! ```
//!
//! where the signature is an HMAC-SHA256 over the tab-joined request tuple
//! (method, scheme, host, path+query, signed headers, content hash, header
//! prefix), keyed by an HMAC of the timestamp under the client secret.

use crate::config::Config;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};
use url::Url;

type HmacSha256 = Hmac<Sha256>;

/// Timestamp format required by the signing scheme, e.g. `20140321T19:34:21+0000`.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y%m%dT%H:%M:%S+0000";

fn base64_hmac_sha256(key: &[u8], data: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any size");
    mac.update(data);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Hash of the request body, covered by the signature for POST requests only.
/// Bodies longer than `max_body` are hashed up to that cap.
fn content_hash(method: &Method, body: &[u8], max_body: usize) -> String {
    if *method != Method::POST || body.is_empty() {
        return String::new();
    }
    let capped = &body[..body.len().min(max_body)];
    BASE64.encode(Sha256::digest(capped))
}

/// Headers named in `headers_to_sign`, canonicalized as
/// `lowercase-name:value` with runs of whitespace collapsed.
fn canonicalize_headers(config: &Config, headers: &reqwest::header::HeaderMap) -> String {
    let mut canonical = String::new();
    for name in &config.headers_to_sign {
        let Some(value) = headers.get(name.as_str()) else {
            continue;
        };
        let Ok(value) = value.to_str() else { continue };
        let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
        canonical.push_str(&name.to_lowercase());
        canonical.push(':');
        canonical.push_str(&collapsed);
        canonical.push('\t');
    }
    canonical
}

/// Produce the complete authorization header for a request.
///
/// Deterministic for a fixed `(timestamp, nonce)` pair, which is what makes
/// the scheme unit-testable against fixed vectors.
pub(crate) fn authorization(
    config: &Config,
    method: &Method,
    url: &Url,
    headers: &reqwest::header::HeaderMap,
    body: &[u8],
    timestamp: &str,
    nonce: &str,
) -> String {
    let prefix = format!(
        "EG1-HMAC-SHA256 client_token={};access_token={};timestamp={};nonce={};",
        config.client_token, config.access_token, timestamp, nonce,
    );

    let signing_key = base64_hmac_sha256(config.client_secret.as_bytes(), timestamp.as_bytes());

    let mut path_and_query = url.path().to_string();
    if let Some(query) = url.query() {
        path_and_query.push('?');
        path_and_query.push_str(query);
    }

    let host = match url.port() {
        Some(port) => format!("{}:{port}", url.host_str().unwrap_or_default()),
        None => url.host_str().unwrap_or_default().to_string(),
    };

    let canonical_headers = canonicalize_headers(config, headers);
    let body_hash = content_hash(method, body, config.max_body);
    let data_to_sign = [
        method.as_str(),
        url.scheme(),
        host.as_str(),
        path_and_query.as_str(),
        canonical_headers.as_str(),
        body_hash.as_str(),
        prefix.as_str(),
    ]
    .join("\t");

    let signature = base64_hmac_sha256(signing_key.as_bytes(), data_to_sign.as_bytes());
    format!("{prefix}signature={signature}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderMap;

    fn test_config() -> Config {
        Config::new(
            "akab-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net",
            "akab-client-token-xxx-xxxxxxxxxxxxxxxx",
            "SOMESECRET",
            "akab-access-token-xxx-xxxxxxxxxxxxxxxx",
        )
    }

    const TIMESTAMP: &str = "20140321T19:34:21+0000";
    const NONCE: &str = "nonce-xx-xxxx";

    #[test]
    fn test_get_request_signature() {
        let config = test_config();
        let url = Url::parse(
            "https://akab-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net/testapi/v1/t1",
        )
        .unwrap();

        let header = authorization(
            &config,
            &Method::GET,
            &url,
            &HeaderMap::new(),
            b"",
            TIMESTAMP,
            NONCE,
        );
        assert_eq!(
            header,
            "EG1-HMAC-SHA256 client_token=akab-client-token-xxx-xxxxxxxxxxxxxxxx;\
             access_token=akab-access-token-xxx-xxxxxxxxxxxxxxxx;\
             timestamp=20140321T19:34:21+0000;nonce=nonce-xx-xxxx;\
             signature=nNcJpnyMi8iRK5WoKwTLULTOQYHc5SECnXzr9xbW5gw="
        );
    }

    #[test]
    fn test_post_body_is_hashed() {
        let config = test_config();
        let url = Url::parse(
            "https://akab-baseurl-xxxxxxxxxxx-xxxxxxxxxxxxx.luna.akamaiapis.net/testapi/v1/t3",
        )
        .unwrap();

        let header = authorization(
            &config,
            &Method::POST,
            &url,
            &HeaderMap::new(),
            br#"{"key":"value"}"#,
            TIMESTAMP,
            NONCE,
        );
        assert!(header.ends_with("signature=yJSfcMbpiLkHZG0EF6xdlZv1Q8OqLVxoKujcMbJ3OhE="));
    }

    #[test]
    fn test_get_body_not_hashed() {
        assert_eq!(content_hash(&Method::GET, b"ignored", 1024), "");
        assert_eq!(
            content_hash(&Method::POST, br#"{"key":"value"}"#, 1024),
            "5Dq88zdSRIOcAS+WM/lYYtIyqVsA1bxzSLMJi5/tfzI="
        );
    }

    #[test]
    fn test_signature_changes_with_nonce() {
        let config = test_config();
        let url = Url::parse("https://host.example.net/a").unwrap();
        let headers = HeaderMap::new();
        let first = authorization(&config, &Method::GET, &url, &headers, b"", TIMESTAMP, "n1");
        let second = authorization(&config, &Method::GET, &url, &headers, b"", TIMESTAMP, "n2");
        assert_ne!(first, second);
    }
}
