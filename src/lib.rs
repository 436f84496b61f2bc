//! Nobel-Harvest: a laureate page scraper with a query API
//!
//! This crate fetches the Nobel Prize listing page, follows every laureate
//! link through a rate-limited, retrying fetcher, parses each detail page
//! into a [`PrizeRecord`], and serves the collected records through a
//! filterable, paginated HTTP API.

pub mod config;
pub mod crawler;
pub mod query;
pub mod server;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Nobel-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch main page {url}: {message}")]
    SeedFetch { url: String, message: String },

    #[error("Store error: {0}")]
    Store(#[from] storage::StoreError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid link selector: {0}")]
    InvalidSelector(String),
}

/// Errors surfaced by the query layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Data scraping is not complete. Please try again later.")]
    NotReady,

    #[error("Invalid regex pattern for {field} filter")]
    InvalidPattern { field: &'static str },

    #[error("{0}")]
    InvalidParameter(String),
}

/// Result type alias for Nobel-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for query operations
pub type QueryResult<T> = std::result::Result<T, QueryError>;

// Re-export commonly used types
pub use config::Config;
pub use query::{query_prizes, PrizeQuery, PrizeResponse};
pub use state::{ScrapePhase, ScrapeStatus};
pub use storage::{PrizeRecord, PrizeStore};
