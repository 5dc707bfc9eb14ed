//! Secure trace token creation.

mod common;

use common::test_client;
use edgeworkers::Error;
use edgeworkers::endpoints::secure_tokens::CreateSecureTokenRequest;
use edgeworkers::error::SECRET_KEY_NOT_FOUND;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn create_secure_token_posts_body_and_expects_201() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/edgeworkers/v1/secure-token")
                .json_body(json!({
                    "acl": "/*",
                    "expiry": 15,
                    "hostname": "test.devexp.akamai.com"
                }));
            then.status(201)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "akamaiEwTrace": "st=1641295764~exp=1641296664~acl=/*~hmac=f6d18857a6c738664b65a59036ac6f8348abe6b34a9503ec1262f18f114ed43f"
                    }"#,
                );
        })
        .await;

    let client = test_client(&server);
    let response = client
        .secure_tokens()
        .create(CreateSecureTokenRequest {
            acl: Some("/*".to_string()),
            expiry: 15,
            hostname: "test.devexp.akamai.com".to_string(),
            ..CreateSecureTokenRequest::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(response.akamai_ew_trace.starts_with("st=1641295764"));
}

#[tokio::test]
async fn create_secure_token_validates_locally() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(201).body("{}");
        })
        .await;

    let client = test_client(&server);
    let err = client
        .secure_tokens()
        .create(CreateSecureTokenRequest {
            acl: Some("/*".to_string()),
            expiry: 15,
            hostname: "test.devexp.akamai.com".to_string(),
            url: Some("/".to_string()),
            ..CreateSecureTokenRequest::default()
        })
        .await
        .unwrap_err();

    assert_eq!(mock.hits_async().await, 0);
    assert!(matches!(err, Error::Validation { .. }));
    assert!(err.to_string().contains("acl: cannot be used together with url"));
}

#[tokio::test]
async fn missing_secret_key_matches_sentinel() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/edgeworkers/v1/secure-token");
            then.status(404)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "type": "/edgeworkers/error-types/secret-key-not-found",
                        "title": "Rest API Error",
                        "instance": "eb764a5e-f375-4959-9e4d-b3a70d28721d",
                        "status": 404,
                        "detail": "Secret key could not be found.",
                        "errorCode": "EW2301"
                    }"#,
                );
        })
        .await;

    let client = test_client(&server);
    let err = client
        .secure_tokens()
        .create(CreateSecureTokenRequest {
            hostname: "test.devexp.akamai.com".to_string(),
            ..CreateSecureTokenRequest::default()
        })
        .await
        .unwrap_err();

    assert!(err.matches(SECRET_KEY_NOT_FOUND));
}
