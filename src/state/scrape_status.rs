/// Scrape phase definitions for tracking run progress
///
/// This module defines the lifecycle of the single scrape run and the
/// snapshot served by the status endpoint.
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Represents the current phase of the scrape run
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ScrapePhase {
    /// Process started, scrape not yet launched
    #[default]
    NotStarted,

    /// Seed page fetched, detail pages being processed
    InProgress,

    // ===== Terminal States =====
    /// Every discovered link has been processed; records are queryable
    Completed,

    /// Seed page could not be fetched; the run is over and the store is empty
    Error(String),
}

impl ScrapePhase {
    /// Returns true if no further transition can happen
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Error(_))
    }

    /// Returns true if the store may be queried
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Checks whether a transition from this phase to `next` is allowed
    ///
    /// NotStarted -> InProgress | Error, InProgress -> Completed.
    pub fn can_transition_to(&self, next: &ScrapePhase) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::InProgress)
                | (Self::NotStarted, Self::Error(_))
                | (Self::InProgress, Self::Completed)
        )
    }
}

impl fmt::Display for ScrapePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "Not started"),
            Self::InProgress => write!(f, "In progress"),
            Self::Completed => write!(f, "Completed"),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl Serialize for ScrapePhase {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Point-in-time view of the scrape run
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ScrapeStatus {
    pub status: ScrapePhase,
    pub total_links: usize,
    pub processed_links: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}
