use serde::Deserialize;

/// Listing page every scrape starts from
pub const DEFAULT_SEED_URL: &str = "https://www.nobelprize.org/prizes/lists/all-nobel-prizes/all/";

/// Anchors on the listing page that point at laureate detail pages
pub const DEFAULT_LINK_SELECTOR: &str = "a.card-prize--laureates--links--link";

/// Browser-like user agent sent with every detail-page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/129.0.0.0 Safari/537.36 Edg/129.0.0.0";

/// Main configuration structure for Nobel-Harvest
///
/// Every section is optional; a missing file or section yields the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub fetcher: FetcherConfig,
    #[serde(rename = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub server: ServerConfig,
}

/// Scrape orchestration configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Listing page the detail links are discovered from
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// CSS selector matching detail-page anchors on the seed page
    #[serde(rename = "link-selector")]
    pub link_selector: String,

    /// Maximum number of detail pages fetched and parsed concurrently
    #[serde(rename = "max-workers")]
    pub max_workers: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            seed_url: DEFAULT_SEED_URL.to_string(),
            link_selector: DEFAULT_LINK_SELECTOR.to_string(),
            max_workers: 32,
        }
    }
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Total attempts per URL, including the first one
    #[serde(rename = "max-attempts")]
    pub max_attempts: u32,

    /// Base delay of the exponential retry backoff (milliseconds)
    #[serde(rename = "retry-backoff-ms")]
    pub retry_backoff_ms: u64,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
            max_attempts: 5,
            retry_backoff_ms: 1000,
        }
    }
}

/// Global outbound request ceiling, shared by every worker
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per period
    #[serde(rename = "max-calls")]
    pub max_calls: u32,

    /// Length of the period (milliseconds)
    #[serde(rename = "period-ms")]
    pub period_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: 50,
            period_ms: 2000,
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    #[serde(rename = "bind-address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}
