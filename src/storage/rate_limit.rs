//! GitHub rate limit headers on contents API responses

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;

/// Rate limit state reported by a response
#[derive(Debug, Clone, Default)]
pub struct RateLimitInfo {
    /// Remaining requests in current window
    pub remaining: Option<u32>,
    /// When the window resets
    pub reset_time: Option<DateTime<Utc>>,
    /// Requests allowed per window
    pub limit: Option<u32>,
}

impl RateLimitInfo {
    /// Parse `x-ratelimit-*` headers; absent or malformed values become `None`
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let number = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
        };

        Self {
            limit: number("x-ratelimit-limit").and_then(|n| u32::try_from(n).ok()),
            remaining: number("x-ratelimit-remaining").and_then(|n| u32::try_from(n).ok()),
            reset_time: number("x-ratelimit-reset")
                .and_then(|ts| DateTime::from_timestamp(ts as i64, 0)),
        }
    }

    /// No requests left in the current window
    pub fn is_exhausted(&self) -> bool {
        matches!(self.remaining, Some(0))
    }

    /// Less than 10% of the window left
    pub fn is_approaching_limit(&self) -> bool {
        match (self.remaining, self.limit) {
            (Some(remaining), Some(limit)) => remaining < limit / 10,
            _ => false,
        }
    }

    /// Seconds until the window resets, at least 1
    pub fn wait_seconds(&self) -> Option<u64> {
        self.reset_time.map(|reset| {
            let duration = reset.signed_duration_since(Utc::now());
            duration.num_seconds().max(1) as u64
        })
    }

    /// Human-readable note for an exhausted quota
    pub fn exhausted_message(&self) -> String {
        match self.reset_time {
            Some(reset) => format!("rate limit exceeded, resets at {}", reset.to_rfc3339()),
            None => "rate limit exceeded".to_string(),
        }
    }
}

/// Log when the quota is nearly or fully used
pub fn warn_if_limited(info: &RateLimitInfo) {
    if info.is_exhausted() {
        tracing::warn!(
            wait_seconds = info.wait_seconds().unwrap_or_default(),
            "GitHub API rate limit reached"
        );
    } else if info.is_approaching_limit() {
        if let (Some(remaining), Some(limit)) = (info.remaining, info.limit) {
            tracing::warn!(remaining, limit, "GitHub API rate limit nearly used up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(remaining: Option<u32>, limit: Option<u32>) -> RateLimitInfo {
        RateLimitInfo {
            remaining,
            limit,
            reset_time: None,
        }
    }

    #[test]
    fn test_exhausted_only_at_zero() {
        assert!(info(Some(0), Some(60)).is_exhausted());
        assert!(!info(Some(1), Some(60)).is_exhausted());
        assert!(!info(None, None).is_exhausted());
    }

    #[test]
    fn test_approaching_limit_boundary() {
        // 50 of 500 is exactly 10%
        assert!(!info(Some(50), Some(500)).is_approaching_limit());
        assert!(info(Some(49), Some(500)).is_approaching_limit());
        assert!(!info(None, Some(500)).is_approaching_limit());
    }

    #[test]
    fn test_wait_seconds_past_reset_clamps_to_1() {
        let mut info = info(Some(0), Some(60));
        info.reset_time = Some(Utc::now() - chrono::Duration::seconds(60));
        assert_eq!(info.wait_seconds(), Some(1));
    }

    #[test]
    fn test_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", "60".parse().unwrap());
        headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
        headers.insert("x-ratelimit-reset", "1700000000".parse().unwrap());

        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, Some(60));
        assert_eq!(info.remaining, Some(0));
        assert!(info.reset_time.is_some());
        assert!(info.exhausted_message().contains("resets at"));
    }

    #[test]
    fn test_from_headers_malformed() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ratelimit-limit", "lots".parse().unwrap());
        let info = RateLimitInfo::from_headers(&headers);
        assert_eq!(info.limit, None);
        assert_eq!(info.remaining, None);
        assert_eq!(info.exhausted_message(), "rate limit exceeded");
    }
}
