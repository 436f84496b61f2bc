//! HTTP API over the scraped records
//!
//! Exposes the scrape status and the prize query as JSON endpoints.

mod routes;

pub use routes::{health_check, nobel_prizes, routes, scraping_status, AppState, ErrorBody};

use crate::HarvestError;
use std::future::Future;
use tokio::net::TcpListener;

/// Serves the API on `bind_address` until `shutdown` resolves
pub async fn serve<F>(bind_address: &str, state: AppState, shutdown: F) -> Result<(), HarvestError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, routes(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
