//! Storage module for scraped records
//!
//! Records live only in memory for the lifetime of the process:
//! - `PrizeRecord` is one parsed laureate page
//! - `PrizeStore` accumulates records during the scrape and publishes them
//!   read-only once the run completes

mod memory;
mod record;

pub use memory::PrizeStore;
pub use record::PrizeRecord;

use crate::state::ScrapePhase;
use thiserror::Error;

/// Errors that can occur while mutating the store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition { from: ScrapePhase, to: ScrapePhase },

    #[error("Store does not accept records while {0}")]
    NotAccepting(ScrapePhase),

    #[error("Records have already been published")]
    AlreadyPublished,
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
