//! Configuration module for Nobel-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Without a file, [`Config::default`] carries the
//! built-in tunables (32 workers, 50 calls per 2 seconds, 5 attempts, 30s
//! timeout).
//!
//! # Example
//!
//! ```no_run
//! use nobel_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Workers: {}", config.scraper.max_workers);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, RateLimitConfig, ScraperConfig, ServerConfig, DEFAULT_LINK_SELECTOR,
    DEFAULT_SEED_URL, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_optional_config};
pub use validation::validate;
