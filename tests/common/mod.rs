use std::time::Duration;

use jiminny_mcp::api::ApiClient;
use jiminny_mcp::tools::{default_registry, ToolRegistry};
use wiremock::MockServer;

#[allow(dead_code)]
pub const TOKEN: &str = "test-token";

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_timeout(
        &format!("{}/api/v1", server.uri()),
        Some(TOKEN.to_string()),
        Duration::from_secs(5),
    )
    .expect("failed to build api client")
}

#[allow(dead_code)]
pub fn registry_for(server: &MockServer) -> ToolRegistry {
    default_registry(client_for(server), 25_000)
}

#[allow(dead_code)]
pub fn tokenless_registry(server: &MockServer) -> ToolRegistry {
    let client = ApiClient::with_timeout(
        &format!("{}/api/v1", server.uri()),
        None,
        Duration::from_secs(5),
    )
    .expect("failed to build api client");
    default_registry(client, 25_000)
}
