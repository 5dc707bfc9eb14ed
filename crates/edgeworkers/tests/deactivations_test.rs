//! Deactivation lifecycle: list, get, deactivate.

mod common;

use common::test_client;
use edgeworkers::Error;
use edgeworkers::endpoints::activations::ActivationNetwork;
use edgeworkers::endpoints::deactivations::{
    DeactivateVersion, DeactivateVersionRequest, GetDeactivationRequest, ListDeactivationsRequest,
};
use edgeworkers::error::NOT_FOUND;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn list_deactivations_decodes_fixture() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/edgeworkers/v1/ids/42/deactivations")
                .query_param("version", "2");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "deactivations": [
                            {
                                "edgeWorkerId": 42,
                                "version": "2",
                                "deactivationId": 1,
                                "accountId": "1-AB2CD",
                                "status": "PENDING",
                                "network": "PRODUCTION",
                                "note": "rolling back",
                                "createdBy": "jdoe",
                                "createdTime": "2021-04-09T09:03:28Z",
                                "lastModifiedTime": "2021-04-09T09:04:42Z"
                            }
                        ]
                    }"#,
                );
        })
        .await;

    let client = test_client(&server);
    let response = client
        .deactivations()
        .list(ListDeactivationsRequest {
            edgeworker_id: 42,
            version: Some("2".to_string()),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.deactivations.len(), 1);
    let deactivation = &response.deactivations[0];
    assert_eq!(deactivation.deactivation_id, 1);
    assert_eq!(deactivation.network, ActivationNetwork::PRODUCTION);
    assert_eq!(deactivation.note.as_deref(), Some("rolling back"));
}

#[tokio::test]
async fn deactivate_version_posts_body_and_expects_201() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/edgeworkers/v1/ids/42/deactivations")
                .json_body(json!({
                    "network": "STAGING",
                    "note": "no longer needed",
                    "version": "2"
                }));
            then.status(201)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "edgeWorkerId": 42,
                        "version": "2",
                        "deactivationId": 3,
                        "accountId": "1-AB2CD",
                        "status": "PRESUBMIT",
                        "network": "STAGING",
                        "note": "no longer needed",
                        "createdBy": "jdoe",
                        "createdTime": "2021-04-09T09:03:28Z",
                        "lastModifiedTime": "2021-04-09T09:03:28Z"
                    }"#,
                );
        })
        .await;

    let client = test_client(&server);
    let deactivation = client
        .deactivations()
        .deactivate_version(DeactivateVersionRequest {
            edgeworker_id: 42,
            body: DeactivateVersion {
                network: ActivationNetwork::STAGING,
                note: Some("no longer needed".to_string()),
                version: "2".to_string(),
            },
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(deactivation.deactivation_id, 3);
}

#[tokio::test]
async fn deactivate_version_requires_network_and_version() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.path_contains("/");
            then.status(200).body("{}");
        })
        .await;

    let client = test_client(&server);
    let err = client
        .deactivations()
        .deactivate_version(DeactivateVersionRequest {
            edgeworker_id: 42,
            body: DeactivateVersion::default(),
        })
        .await
        .unwrap_err();

    assert_eq!(mock.hits_async().await, 0);
    assert!(matches!(err, Error::Validation { .. }));
    assert_eq!(
        err.to_string(),
        "deactivating version: struct validation: \
         network: cannot be blank; version: cannot be blank"
    );
}

#[tokio::test]
async fn get_deactivation_missing_edgeworker_maps_to_sentinel() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/edgeworkers/v1/ids/9999/deactivations/1");
            then.status(404)
                .header("content-type", "application/json")
                .body(
                    r#"{
                        "detail": "Unable to find the requested EdgeWorker ID",
                        "errorCode": "EW2002",
                        "instance": "/edgeworkers/error-instances/xyz",
                        "status": 404,
                        "title": "Invalid Request",
                        "type": "/edgeworkers/error-types/edgeworkers-bad-request"
                    }"#,
                );
        })
        .await;

    let client = test_client(&server);
    let err = client
        .deactivations()
        .get(GetDeactivationRequest {
            edgeworker_id: 9999,
            deactivation_id: 1,
        })
        .await
        .unwrap_err();

    assert!(err.matches(NOT_FOUND));
    assert_eq!(err.as_api_error().unwrap().status, 404);
}
