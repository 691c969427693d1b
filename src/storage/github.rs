//! GitHub contents API storage adapter
//!
//! Keeps the collection as one pretty-printed JSON file in a repository.
//! Overwriting an existing file requires its current blob SHA, so every write
//! first fetches the revision and then issues the PUT.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::rate_limit::{warn_if_limited, RateLimitInfo};
use super::traits::{RemoteStore, StorageError};
use crate::core::config::GitHubConfig;
use crate::core::types::Collection;

#[cfg(feature = "telemetry")]
use crate::telemetry::metrics::GLOBAL_METRICS;
#[cfg(feature = "telemetry")]
use std::time::Instant;
#[cfg(feature = "telemetry")]
use tracing::debug;

/// User agent sent with every request
const USER_AGENT: &str = "bird-nav-app";
/// Media type for the v3 REST API
const ACCEPT: &str = "application/vnd.github.v3+json";

/// File metadata returned by `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Deserialize)]
struct ContentsFile {
    sha: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    encoding: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Serialize)]
struct PutContents<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

/// Remote storage backed by a file in a GitHub repository
pub struct GitHubStorage {
    config: GitHubConfig,
    token: Option<String>,
    base_url: String,
    http_client: Client,
}

impl GitHubStorage {
    /// Create an adapter for the given repository file
    pub fn new(config: GitHubConfig) -> Self {
        let token = config.resolve_token();
        let base_url = config.api_url();
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            config,
            token,
            base_url,
            http_client,
        }
    }

    /// The repository file this adapter addresses
    pub fn config(&self) -> &GitHubConfig {
        &self.config
    }

    fn contents_url(&self) -> String {
        let path = self
            .config
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.base_url,
            urlencoding::encode(&self.config.owner),
            urlencoding::encode(&self.config.repo),
            path
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .http_client
            .request(method, url)
            .header("Accept", ACCEPT);

        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        request
    }

    /// Fetch file metadata and content; `None` when the file does not exist
    async fn fetch_file(&self) -> Result<Option<ContentsFile>, StorageError> {
        let url = format!(
            "{}?ref={}",
            self.contents_url(),
            urlencoding::encode(&self.config.branch)
        );

        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = check_status(response).await?;

        response
            .json::<ContentsFile>()
            .await
            .map(Some)
            .map_err(|e| StorageError::DecodeError(e.to_string()))
    }

    /// Current blob SHA of the data file, fetched fresh for every write.
    ///
    /// Any failure is treated as "file does not exist"; the following PUT
    /// then reports the real problem.
    pub async fn revision(&self) -> Option<String> {
        #[cfg(feature = "telemetry")]
        let start = Instant::now();

        let result = self.fetch_file().await;

        #[cfg(feature = "telemetry")]
        GLOBAL_METRICS.record_remote("github", "revision", start.elapsed(), result.is_ok());

        match result {
            Ok(file) => file.map(|f| f.sha),
            Err(e) => {
                tracing::debug!(error = %e, "Could not fetch current revision");
                None
            }
        }
    }

    async fn read_inner(&self) -> Result<Collection, StorageError> {
        let Some(file) = self.fetch_file().await? else {
            tracing::info!(
                owner = %self.config.owner,
                repo = %self.config.repo,
                path = %self.config.path,
                "Remote data file does not exist yet"
            );
            return Ok(Vec::new());
        };
        decode_file(file)
    }

    async fn write_inner(&self, categories: &Collection, message: &str) -> Result<(), StorageError> {
        let sha = self.revision().await;
        let json = serde_json::to_string_pretty(categories)
            .map_err(|e| StorageError::DecodeError(e.to_string()))?;

        let body = PutContents {
            message,
            content: STANDARD.encode(json.as_bytes()),
            branch: &self.config.branch,
            sha,
        };

        let response = self
            .request(reqwest::Method::PUT, &self.contents_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| StorageError::NetworkError(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for GitHubStorage {
    fn name(&self) -> &'static str {
        "github"
    }

    fn is_configured(&self) -> bool {
        !self.config.owner.is_empty()
            && !self.config.repo.is_empty()
            && !self.config.branch.is_empty()
            && !self.config.path.is_empty()
    }

    fn can_write(&self) -> bool {
        self.token.is_some() && self.is_configured()
    }

    async fn try_read(&self) -> Result<Collection, StorageError> {
        if !self.is_configured() {
            return Err(StorageError::NotConfigured);
        }

        #[cfg(feature = "telemetry")]
        let start = Instant::now();

        let result = self.read_inner().await;

        #[cfg(feature = "telemetry")]
        {
            let duration = start.elapsed();
            let success = result.is_ok();
            GLOBAL_METRICS.record_remote("github", "read", duration, success);
            debug!(
                owner = %self.config.owner,
                repo = %self.config.repo,
                success,
                duration_ms = duration.as_millis() as u64,
                "GitHub read complete"
            );
        }

        result
    }

    async fn try_write(&self, categories: &Collection, message: &str) -> Result<(), StorageError> {
        if !self.is_configured() {
            return Err(StorageError::NotConfigured);
        }
        if self.token.is_none() {
            return Err(StorageError::AuthError(
                "No GitHub token configured. Set github.token or GITHUB_TOKEN".to_string(),
            ));
        }

        #[cfg(feature = "telemetry")]
        let start = Instant::now();

        let result = self.write_inner(categories, message).await;

        #[cfg(feature = "telemetry")]
        {
            let duration = start.elapsed();
            let success = result.is_ok();
            GLOBAL_METRICS.record_remote("github", "write", duration, success);
            debug!(
                owner = %self.config.owner,
                repo = %self.config.repo,
                message,
                success,
                duration_ms = duration.as_millis() as u64,
                "GitHub write complete"
            );
        }

        result
    }
}

/// Map a non-success response to an error, logging rate limit pressure
async fn check_status(response: Response) -> Result<Response, StorageError> {
    let limits = RateLimitInfo::from_headers(response.headers());
    warn_if_limited(&limits);

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or(text);

    Err(match status {
        StatusCode::UNAUTHORIZED => StorageError::AuthError(message),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS if limits.is_exhausted() => {
            StorageError::ApiError {
                status: status.as_u16(),
                message: limits.exhausted_message(),
            }
        }
        StatusCode::FORBIDDEN => StorageError::AuthError(message),
        StatusCode::NOT_FOUND => StorageError::NotFound(message),
        _ => StorageError::ApiError {
            status: status.as_u16(),
            message,
        },
    })
}

/// Decode the base64 payload of a contents response into a collection
fn decode_file(file: ContentsFile) -> Result<Collection, StorageError> {
    let encoding = file.encoding.as_deref().unwrap_or("base64");
    if encoding != "base64" {
        return Err(StorageError::DecodeError(format!(
            "unsupported content encoding '{}' (file too large for the contents API?)",
            encoding
        )));
    }

    let payload: String = file
        .content
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| StorageError::DecodeError(format!("invalid base64: {}", e)))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| StorageError::DecodeError(format!("invalid JSON: {}", e)))
}
