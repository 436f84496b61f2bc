//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building one pooled HTTP client with the configured user agent
//! - Passing every attempt through the shared rate limiter
//! - Retrying transient failures with exponential backoff
//! - Decoding HTML entities in detail-page bodies

use crate::config::FetcherConfig;
use crate::crawler::rate_limit::RateLimiter;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status (after retries, if retryable)
    HttpError {
        /// The last HTTP status code received
        status_code: u16,
    },

    /// No usable response (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true if the page body is available
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Human-readable reason for a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Retry schedule for transient failures
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles on each further attempt
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &FetcherConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    /// Delay to wait before attempt number `attempt` (1-based)
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 2).min(16);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Statuses worth another attempt: 429, 500, 502, 503, 504
    pub fn is_retryable_status(status: StatusCode) -> bool {
        matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS
                | StatusCode::INTERNAL_SERVER_ERROR
                | StatusCode::BAD_GATEWAY
                | StatusCode::SERVICE_UNAVAILABLE
                | StatusCode::GATEWAY_TIMEOUT
        )
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client owns the connection pool reused by every request of the run.
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Rate-limited, retrying GET client shared by all workers
pub struct Fetcher {
    client: Client,
    limiter: Arc<RateLimiter>,
    retry: RetryPolicy,
}

impl Fetcher {
    /// Creates a fetcher with its own pooled client
    pub fn new(config: &FetcherConfig, limiter: Arc<RateLimiter>) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(
            build_http_client(config)?,
            limiter,
            RetryPolicy::from_config(config),
        ))
    }

    pub fn with_client(client: Client, limiter: Arc<RateLimiter>, retry: RetryPolicy) -> Self {
        Self {
            client,
            limiter,
            retry,
        }
    }

    /// Fetches a URL with retry logic
    ///
    /// # Retry Logic
    ///
    /// | Condition | Action |
    /// |-----------|--------|
    /// | HTTP 2xx | Success |
    /// | HTTP 429, 500, 502, 503, 504 | Retry with backoff, up to `max_attempts` |
    /// | Timeout / connection error | Retry with backoff, up to `max_attempts` |
    /// | Other HTTP status | Immediate → HttpError |
    /// | Body read failure | Immediate → NetworkError |
    ///
    /// Every attempt waits on the shared rate limiter first.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let mut attempt = 1;
        loop {
            self.limiter.acquire().await;
            let (result, retryable) = self.send_once(url).await;

            if !retryable || attempt >= self.retry.max_attempts {
                if retryable {
                    tracing::warn!(
                        "Giving up on {} after {} attempts: {}",
                        url,
                        attempt,
                        result.failure_reason().unwrap_or_default()
                    );
                }
                return result;
            }

            attempt += 1;
            let delay = self.retry.delay_before(attempt);
            tracing::debug!(
                "Retrying {} in {:?} (attempt {}/{}): {}",
                url,
                delay,
                attempt,
                self.retry.max_attempts,
                result.failure_reason().unwrap_or_default()
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Fetches a URL and decodes HTML entities in the body
    pub async fn fetch_decoded(&self, url: &str) -> FetchResult {
        match self.fetch(url).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => FetchResult::Success {
                final_url,
                status_code,
                body: html_escape::decode_html_entities(&body).into_owned(),
            },
            other => other,
        }
    }

    /// Sends a single GET; the flag tells whether the failure is transient
    async fn send_once(&self, url: &str) -> (FetchResult, bool) {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                let transient = e.is_timeout() || e.is_connect();
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    e.to_string()
                };
                return (FetchResult::NetworkError { error }, transient);
            }
        };

        let status = response.status();
        if !status.is_success() {
            return (
                FetchResult::HttpError {
                    status_code: status.as_u16(),
                },
                RetryPolicy::is_retryable_status(status),
            );
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => (
                FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                false,
            ),
            Err(e) => (
                FetchResult::NetworkError {
                    error: e.to_string(),
                },
                false,
            ),
        }
    }
}
