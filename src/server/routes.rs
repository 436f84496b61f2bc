use crate::query::{query_prizes, PrizeQuery, PrizeResponse};
use crate::state::ScrapeStatus;
use crate::storage::PrizeStore;
use crate::QueryError;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Shared handler state: the store the background scrape fills
pub type AppState = Arc<PrizeStore>;

/// Body of every error response
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = match self {
            QueryError::NotReady => StatusCode::SERVICE_UNAVAILABLE,
            QueryError::InvalidPattern { .. } => StatusCode::BAD_REQUEST,
            QueryError::InvalidParameter(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application routes
///
/// - `GET /health`
/// - `GET /scraping-status`
/// - `GET /nobel-prizes`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/scraping-status", get(scraping_status))
        .route("/nobel-prizes", get(nobel_prizes))
        .with_state(state)
}

/// Liveness probe
pub async fn health_check() -> &'static str {
    "OK"
}

/// Current scrape phase and link counters
pub async fn scraping_status(State(store): State<AppState>) -> Json<ScrapeStatus> {
    Json(store.status())
}

/// Filtered, paginated prize records
pub async fn nobel_prizes(
    State(store): State<AppState>,
    Query(query): Query<PrizeQuery>,
) -> Result<Json<PrizeResponse>, QueryError> {
    query_prizes(&store, &query).map(Json).map_err(|e| {
        tracing::debug!("Rejected prize query: {}", e);
        e
    })
}
