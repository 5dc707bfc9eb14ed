//! Shared helpers for the endpoint integration tests.

use edgegrid::{Config, Session};
use edgeworkers::Client;
use httpmock::MockServer;

/// Client wired to a mock server.
pub fn test_client(server: &MockServer) -> Client {
    let config = Config::new(
        "test.luna.akamaiapis.net",
        "test-client-token",
        "test-client-secret",
        "test-access-token",
    );
    let session = Session::builder(config)
        .base_url(server.base_url())
        .build()
        .expect("session builds");
    Client::new(session)
}
