//! State module for tracking scrape progress
//!
//! # Components
//!
//! - `ScrapePhase`: lifecycle of the one-shot scrape run (not started, in progress, completed, error)
//! - `ScrapeStatus`: snapshot of the phase and link counters served to clients

mod scrape_status;

// Re-export main types
pub use scrape_status::{ScrapePhase, ScrapeStatus};
