//! wiremock-based mock of the GitHub contents API.
//!
//! Serves one data file at `/repos/owner/nav/contents/data/navigation.json`
//! so the storage adapter and the CLI can be tested fully offline.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use birdnav::core::config::GitHubConfig;
use birdnav::core::types::Collection;

pub const OWNER: &str = "owner";
pub const REPO: &str = "nav";
pub const TOKEN: &str = "mock-test-token";
pub const CONTENTS_PATH: &str = "/repos/owner/nav/contents/data/navigation.json";

/// Start a mock server and a config pointed at it, with a token.
pub async fn setup_github_mock() -> (MockServer, GitHubConfig) {
    let server = MockServer::start().await;
    let config = github_config(&server, Some(TOKEN));
    (server, config)
}

/// Config for the mock repository file.
pub fn github_config(server: &MockServer, token: Option<&str>) -> GitHubConfig {
    let mut config = GitHubConfig::new(OWNER, REPO);
    config.api_url = Some(server.uri());
    config.token = token.map(str::to_string);
    config
}

/// Body of a contents API file response. GitHub wraps base64 at 60 columns.
pub fn contents_json(raw: &str, sha: &str) -> Value {
    let encoded = STANDARD.encode(raw.as_bytes());
    let wrapped: Vec<String> = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect();
    json!({
        "type": "file",
        "encoding": "base64",
        "name": "navigation.json",
        "path": "data/navigation.json",
        "sha": sha,
        "content": wrapped.join("\n"),
    })
}

/// GET returns the given collection.
pub async fn mock_get_file(server: &MockServer, categories: &Collection, sha: &str) {
    let raw = serde_json::to_string_pretty(categories).unwrap();
    mock_get_raw(server, &raw, sha).await;
}

/// GET returns arbitrary file text.
pub async fn mock_get_raw(server: &MockServer, raw: &str, sha: &str) {
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(contents_json(raw, sha)))
        .mount(server)
        .await;
}

/// GET returns 404.
pub async fn mock_not_found(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })),
        )
        .mount(server)
        .await;
}

/// Any request with `method` fails with `status`.
pub async fn mock_error(server: &MockServer, http_method: &str, status: u16, message: &str) {
    Mock::given(method(http_method))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({ "message": message })))
        .mount(server)
        .await;
}

/// GET fails with an exhausted rate limit.
pub async fn mock_rate_limited(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(CONTENTS_PATH))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "0")
                .insert_header("x-ratelimit-reset", "1700000000")
                .set_body_json(json!({ "message": "API rate limit exceeded" })),
        )
        .mount(server)
        .await;
}

/// PUT succeeds when it carries the token and `sha`.
pub async fn mock_put_with_sha(server: &MockServer, sha: &str) {
    Mock::given(method("PUT"))
        .and(path(CONTENTS_PATH))
        .and(header("authorization", format!("token {}", TOKEN).as_str()))
        .and(body_partial_json(json!({ "sha": sha, "branch": "main" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": { "sha": "new-sha" },
            "commit": { "sha": "commit-sha" },
        })))
        .mount(server)
        .await;
}

/// PUT succeeds for any body (used for file creation).
pub async fn mock_put_any(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path(CONTENTS_PATH))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "sha": "created-sha" },
        })))
        .mount(server)
        .await;
}

/// All PUT requests received so far.
pub async fn put_requests(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "PUT")
        .collect()
}

/// Decode the JSON body of a PUT request.
pub fn put_body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}

/// Decode the collection carried by a PUT request.
pub fn put_collection(request: &Request) -> Collection {
    let body = put_body(request);
    let content = body["content"].as_str().unwrap();
    let bytes = STANDARD.decode(content).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
