//! Scrape coordinator - one-shot scrape orchestration
//!
//! This module drives the single scrape run:
//! - Fetching the listing page and discovering detail links
//! - Dispatching one fetch-and-parse task per link onto a bounded worker pool
//! - Appending each finished record to the shared store
//! - Publishing the final status

use crate::config::Config;
use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::links::discover_links;
use crate::crawler::parser::parse_prize_page;
use crate::crawler::rate_limit::RateLimiter;
use crate::storage::{PrizeRecord, PrizeStore};
use crate::HarvestError;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use url::Url;

/// Log a progress line every this many processed links
const PROGRESS_INTERVAL: usize = 25;

/// Main scrape coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    fetcher: Arc<Fetcher>,
    store: Arc<PrizeStore>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Builds the shared rate limiter and the pooled HTTP client once; every
    /// worker of the run goes through them.
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `store` - The store that receives records and status
    pub fn new(config: Config, store: Arc<PrizeStore>) -> Result<Self, HarvestError> {
        let limiter = Arc::new(RateLimiter::new(&config.rate_limit)?);
        tracing::debug!("Requests spaced at least {:?} apart", limiter.interval());
        let fetcher = Fetcher::new(&config.fetcher, limiter)?;

        Ok(Self::with_fetcher(config, Arc::new(fetcher), store))
    }

    /// Creates a coordinator around an existing fetcher
    pub fn with_fetcher(config: Config, fetcher: Arc<Fetcher>, store: Arc<PrizeStore>) -> Self {
        Self {
            config: Arc::new(config),
            fetcher,
            store,
        }
    }

    /// Runs the scrape to completion
    ///
    /// 1. Fetches the listing page; failure ends the run in the Error phase
    /// 2. Discovers detail links and moves to InProgress
    /// 3. Processes every link on at most `max_workers` concurrent tasks
    /// 4. Moves to Completed once every task has finished
    ///
    /// A failed detail page never aborts the run; it contributes a record
    /// that carries only its link.
    pub async fn run(&self) -> Result<(), HarvestError> {
        let start_time = Instant::now();
        let seed_url = self.config.scraper.seed_url.clone();
        tracing::info!("Starting scrape from {}", seed_url);

        let links = match self.discover(&seed_url).await {
            Ok(links) => links,
            Err(e) => {
                tracing::error!("Scrape aborted: {}", e);
                self.store.fail(e.to_string())?;
                return Err(e);
            }
        };

        tracing::info!("Discovered {} detail links", links.len());
        self.store.begin(links.len())?;

        let total = links.len();
        let semaphore = Arc::new(Semaphore::new(self.config.scraper.max_workers as usize));
        let mut tasks = JoinSet::new();

        for link in links {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let fetcher = Arc::clone(&self.fetcher);
            let store = Arc::clone(&self.store);

            tasks.spawn(async move {
                let _permit = permit;
                let record = process_link(&fetcher, &link).await;

                match store.push(record) {
                    Ok(processed) if processed % PROGRESS_INTERVAL == 0 || processed == total => {
                        let elapsed = start_time.elapsed();
                        tracing::info!(
                            "Progress: {}/{} links processed, {:.2} links/sec",
                            processed,
                            total,
                            processed as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
                        );
                    }
                    Ok(_) => {}
                    Err(e) => tracing::error!("Failed to store record for {}: {}", link, e),
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Link task failed: {}", e);
            }
        }

        self.store.complete()?;

        let status = self.store.status();
        tracing::info!(
            "Scrape completed: {}/{} links processed in {:?}",
            status.processed_links,
            status.total_links,
            start_time.elapsed()
        );

        Ok(())
    }

    /// Fetches the listing page and extracts the detail links
    async fn discover(&self, seed_url: &str) -> Result<Vec<String>, HarvestError> {
        let base_url = Url::parse(seed_url)?;

        let body = match self.fetcher.fetch(seed_url).await {
            FetchResult::Success { body, .. } => body,
            failure => {
                return Err(HarvestError::SeedFetch {
                    url: seed_url.to_string(),
                    message: failure.failure_reason().unwrap_or_default(),
                })
            }
        };

        discover_links(&body, &base_url, &self.config.scraper.link_selector).map_err(|message| {
            HarvestError::SeedFetch {
                url: seed_url.to_string(),
                message,
            }
        })
    }
}

/// Fetches and parses one detail page
///
/// Fetch failures are logged and degrade to an empty record for the link.
pub async fn process_link(fetcher: &Fetcher, link: &str) -> PrizeRecord {
    match fetcher.fetch_decoded(link).await {
        FetchResult::Success { body, .. } => {
            let record = parse_prize_page(link, &body);
            tracing::debug!("Processed: {}", link);
            record
        }
        failure => {
            tracing::warn!(
                "Error fetching {}: {}",
                link,
                failure.failure_reason().unwrap_or_default()
            );
            PrizeRecord::empty(link)
        }
    }
}

/// Runs a complete scrape into `store`
///
/// # Example
///
/// ```no_run
/// use nobel_harvest::config::Config;
/// use nobel_harvest::crawler::run_scrape;
/// use nobel_harvest::storage::PrizeStore;
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(PrizeStore::new());
/// run_scrape(Config::default(), Arc::clone(&store)).await?;
/// println!("{} records", store.records()?.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: Config, store: Arc<PrizeStore>) -> Result<(), HarvestError> {
    let coordinator = Coordinator::new(config, Arc::clone(&store))?;
    coordinator.run().await
}

/// Launches the scrape as a background task
///
/// Setup failures (which happen before the seed fetch) are recorded in the
/// store as the Error phase so that status readers see them.
pub fn spawn_scrape(config: Config, store: Arc<PrizeStore>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let coordinator = match Coordinator::new(config, Arc::clone(&store)) {
            Ok(coordinator) => coordinator,
            Err(e) => {
                tracing::error!("Failed to initialize scraper: {}", e);
                if let Err(e) = store.fail(e.to_string()) {
                    tracing::error!("Failed to record scrape error: {}", e);
                }
                return;
            }
        };

        if let Err(e) = coordinator.run().await {
            tracing::error!("Scrape failed: {}", e);
        }
    })
}
