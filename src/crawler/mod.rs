//! Crawler module for laureate page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - A global rate limiter shared by every request
//! - HTTP fetching with retry logic
//! - Detail-link discovery on the listing page
//! - Laureate page parsing
//! - Overall scrape coordination

mod coordinator;
mod fetcher;
mod links;
mod parser;
mod rate_limit;

pub use coordinator::{process_link, run_scrape, spawn_scrape, Coordinator};
pub use fetcher::{build_http_client, FetchResult, Fetcher, RetryPolicy};
pub use links::discover_links;
pub use parser::parse_prize_page;
pub use rate_limit::RateLimiter;
