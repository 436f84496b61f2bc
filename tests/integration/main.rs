//! Integration tests for the scraper and its HTTP API
//!
//! These tests use wiremock to stand in for the listing and laureate pages
//! and drive the full scrape, query and route stack end-to-end.

mod common;
mod fetch_tests;
mod scrape_tests;
