//! Query module for reading scraped records
//!
//! Queries are answered only once the scrape has completed; an in-flight or
//! failed scrape yields [`QueryError::NotReady`] rather than partial data.
//! Filtering happens in a fixed order (name, category, country, motivation,
//! birth year, prize year) and the surviving records are paginated.

mod filters;
mod pagination;

pub use filters::{CompiledFilters, YearRange};
pub use pagination::{paginate, Pagination, MAX_PAGE_SIZE};

use crate::storage::{PrizeRecord, PrizeStore};
use crate::{QueryError, QueryResult};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the prize listing
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PrizeQuery {
    /// 1-based page number
    pub page: i64,
    /// Records per page, 1 to 100
    pub page_size: i64,
    /// Pattern matched against the laureate name
    pub name_filter: Option<String>,
    /// Comma-separated patterns matched against the category
    pub category_filter: Option<String>,
    /// Comma-separated patterns matched against the birth place
    pub country_filter: Option<String>,
    /// Pattern matched against the motivation
    pub motivation_filter: Option<String>,
    pub birth_year_start: Option<i32>,
    pub birth_year_end: Option<i32>,
    pub prize_year_start: Option<i32>,
    pub prize_year_end: Option<i32>,
}

impl Default for PrizeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            name_filter: None,
            category_filter: None,
            country_filter: None,
            motivation_filter: None,
            birth_year_start: None,
            birth_year_end: None,
            prize_year_start: None,
            prize_year_end: None,
        }
    }
}

impl PrizeQuery {
    /// Checks the paging parameters and returns them as `(page, page_size)`
    pub fn page_bounds(&self) -> QueryResult<(usize, usize)> {
        if self.page < 1 {
            return Err(QueryError::InvalidParameter(format!(
                "page must be >= 1, got {}",
                self.page
            )));
        }
        if self.page_size < 1 || self.page_size > MAX_PAGE_SIZE as i64 {
            return Err(QueryError::InvalidParameter(format!(
                "page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            )));
        }
        // Checked above: both are positive and page_size fits.
        let page = usize::try_from(self.page).unwrap_or(usize::MAX);
        Ok((page, self.page_size as usize))
    }
}

/// One page of matching records
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrizeResponse {
    pub data: Vec<PrizeRecord>,
    pub pagination: Pagination,
}

/// Filters and paginates the records of a completed scrape
///
/// # Returns
///
/// * `Ok(PrizeResponse)` - The requested page
/// * `Err(QueryError::InvalidParameter)` - `page` or `page_size` out of range
/// * `Err(QueryError::NotReady)` - The scrape has not completed
/// * `Err(QueryError::InvalidPattern)` - A filter is not a valid regex
pub fn query_prizes(store: &PrizeStore, query: &PrizeQuery) -> QueryResult<PrizeResponse> {
    let (page, page_size) = query.page_bounds()?;
    let records = store.records()?;
    let filters = CompiledFilters::compile(query)?;

    let matching: Vec<&PrizeRecord> = records
        .iter()
        .filter(|record| filters.matches(record))
        .collect();

    let (slice, pagination) = paginate(&matching, page, page_size);
    tracing::debug!(
        "Query matched {} of {} records, returning page {}/{}",
        pagination.total_records,
        records.len(),
        pagination.current_page,
        pagination.total_pages
    );

    Ok(PrizeResponse {
        data: slice.iter().map(|record| (*record).clone()).collect(),
        pagination,
    })
}
