//! In-memory record store shared by the scrape workers and the query layer

use crate::state::{ScrapePhase, ScrapeStatus};
use crate::storage::{PrizeRecord, StoreError, StoreResult};
use crate::QueryError;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Everything the scrape run mutates, guarded by one lock
#[derive(Debug, Default)]
struct Progress {
    status: ScrapeStatus,
    records: Vec<PrizeRecord>,
}

/// Append-only store of parsed records plus the run status
///
/// While the run is in progress, records and counters live behind a single
/// mutex so that `processed_links` always equals the number of appended
/// records. Completing the run moves the records into a write-once cell;
/// from then on [`PrizeStore::records`] hands out a shared slice without
/// taking the lock.
#[derive(Debug, Default)]
pub struct PrizeStore {
    progress: Mutex<Progress>,
    published: OnceLock<Vec<PrizeRecord>>,
}

impl PrizeStore {
    /// Creates an empty store in the `NotStarted` phase
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an already completed store holding `records`
    pub fn completed(records: Vec<PrizeRecord>) -> Self {
        let store = Self::new();
        let now = Utc::now();
        {
            let mut progress = store.lock();
            progress.status = ScrapeStatus {
                status: ScrapePhase::Completed,
                total_links: records.len(),
                processed_links: records.len(),
                started_at: Some(now),
                finished_at: Some(now),
            };
        }
        // Fresh cell, cannot already be set.
        let _ = store.published.set(records);
        store
    }

    fn lock(&self) -> MutexGuard<'_, Progress> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn transition(progress: &mut Progress, next: ScrapePhase) -> StoreResult<()> {
        let current = &progress.status.status;
        if !current.can_transition_to(&next) {
            return Err(StoreError::InvalidTransition {
                from: current.clone(),
                to: next,
            });
        }
        progress.status.status = next;
        Ok(())
    }

    /// Moves the run to `InProgress` with the number of discovered links
    pub fn begin(&self, total_links: usize) -> StoreResult<()> {
        let mut progress = self.lock();
        Self::transition(&mut progress, ScrapePhase::InProgress)?;
        progress.status.total_links = total_links;
        progress.status.started_at = Some(Utc::now());
        progress.records.reserve(total_links);
        Ok(())
    }

    /// Appends one record and bumps `processed_links` under the same lock
    ///
    /// Returns the updated processed count.
    pub fn push(&self, record: PrizeRecord) -> StoreResult<usize> {
        let mut progress = self.lock();
        if progress.status.status != ScrapePhase::InProgress {
            return Err(StoreError::NotAccepting(progress.status.status.clone()));
        }
        progress.records.push(record);
        progress.status.processed_links += 1;
        Ok(progress.status.processed_links)
    }

    /// Marks the run `Completed` and publishes the records for querying
    pub fn complete(&self) -> StoreResult<()> {
        let mut progress = self.lock();
        Self::transition(&mut progress, ScrapePhase::Completed)?;
        progress.status.finished_at = Some(Utc::now());
        let records = std::mem::take(&mut progress.records);
        self.published
            .set(records)
            .map_err(|_| StoreError::AlreadyPublished)
    }

    /// Marks the run as failed before any record was collected
    pub fn fail(&self, message: impl Into<String>) -> StoreResult<()> {
        let mut progress = self.lock();
        Self::transition(&mut progress, ScrapePhase::Error(message.into()))?;
        let now = Utc::now();
        progress.status.started_at.get_or_insert(now);
        progress.status.finished_at = Some(now);
        Ok(())
    }

    /// Snapshot of the current run status
    pub fn status(&self) -> ScrapeStatus {
        self.lock().status.clone()
    }

    /// The collected records, available only once the run has completed
    pub fn records(&self) -> Result<&[PrizeRecord], QueryError> {
        self.published
            .get()
            .map(Vec::as_slice)
            .ok_or(QueryError::NotReady)
    }
}
