//! Favicon lookup for site URLs
//!
//! Derives a list of public icon services for a site's host and, on request,
//! probes them to find one that actually serves an image.

use futures::future::join_all;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Per-request timeout for probes
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

fn host_of(site_url: &str) -> Option<String> {
    let parsed = Url::parse(site_url).ok()?;
    parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .map(str::to_string)
}

/// Candidate icon URLs for a site, most reliable first.
/// Unparseable URLs yield nothing.
pub fn favicon_sources(site_url: &str) -> Vec<String> {
    let Some(host) = host_of(site_url) else {
        return Vec::new();
    };

    vec![
        format!("https://icon.horse/icon/{}", host),
        format!("https://www.google.com/s2/favicons?domain={}&sz=32", host),
        format!("https://favicons.githubusercontent.com/{}", host),
        format!("https://{}/favicon.ico", host),
    ]
}

/// The Google favicon service URL for a site, or an empty string
pub fn favicon_url(site_url: &str) -> String {
    host_of(site_url)
        .map(|host| format!("https://www.google.com/s2/favicons?domain={}&sz=32", host))
        .unwrap_or_default()
}

/// Concurrent prober for icon candidates
pub struct FaviconProbe {
    http_client: Client,
}

impl Default for FaviconProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl FaviconProbe {
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(PROBE_TIMEOUT)
            .user_agent("bird-nav-app")
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http_client }
    }

    /// First working icon for `site_url`, if any
    pub async fn resolve(&self, site_url: &str) -> Option<String> {
        self.probe(&favicon_sources(site_url)).await
    }

    /// Probe all candidates at once and return the earliest one in list order
    /// that served an image.
    pub async fn probe(&self, candidates: &[String]) -> Option<String> {
        let checks = candidates.iter().map(|candidate| self.serves_image(candidate));
        let results = join_all(checks).await;

        candidates
            .iter()
            .zip(results)
            .find_map(|(candidate, ok)| ok.then(|| candidate.clone()))
    }

    async fn serves_image(&self, candidate: &str) -> bool {
        let response = match self.http_client.get(candidate).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = candidate, error = %e, "Favicon probe failed");
                return false;
            }
        };

        if !response.status().is_success() {
            debug!(url = candidate, status = %response.status(), "Favicon probe rejected");
            return false;
        }

        match response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            Some(content_type) => content_type.starts_with("image/"),
            None => true,
        }
    }
}
