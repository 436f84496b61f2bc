//! Filter compilation and matching
//!
//! Text filters are user-supplied regular expressions, matched
//! case-insensitively anywhere in the field. Category and country accept a
//! comma-separated list; a record passes when any listed pattern matches.
//! All active filters must pass.

use crate::query::PrizeQuery;
use crate::storage::PrizeRecord;
use crate::{QueryError, QueryResult};
use regex::{Regex, RegexBuilder};

/// Upper bound on compiled pattern size for user input
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Inclusive year bounds; an unset bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start: Option<i32>,
    pub end: Option<i32>,
}

impl YearRange {
    pub fn new(start: Option<i32>, end: Option<i32>) -> Self {
        Self { start, end }
    }

    /// Returns true if at least one bound is set
    pub fn is_active(&self) -> bool {
        self.start.is_some() || self.end.is_some()
    }

    /// Checks a record year against the bounds
    ///
    /// An inactive range accepts everything. An active range rejects a
    /// missing year.
    pub fn contains(&self, year: Option<i32>) -> bool {
        if !self.is_active() {
            return true;
        }
        let Some(year) = year else {
            return false;
        };
        self.start.map_or(true, |start| year >= start) && self.end.map_or(true, |end| year <= end)
    }
}

/// Every filter of one query, compiled once
#[derive(Debug, Default)]
pub struct CompiledFilters {
    name: Option<Regex>,
    category: Option<Regex>,
    country: Option<Regex>,
    motivation: Option<Regex>,
    birth_years: YearRange,
    prize_years: YearRange,
}

impl CompiledFilters {
    /// Compiles the filters of `query`
    ///
    /// Patterns are checked in the order name, category, country,
    /// motivation; the first one that does not compile is reported.
    pub fn compile(query: &PrizeQuery) -> QueryResult<Self> {
        Ok(Self {
            name: compile_pattern("name", query.name_filter.as_deref())?,
            category: compile_any_of("category", query.category_filter.as_deref())?,
            country: compile_any_of("country", query.country_filter.as_deref())?,
            motivation: compile_pattern("motivation", query.motivation_filter.as_deref())?,
            birth_years: YearRange::new(query.birth_year_start, query.birth_year_end),
            prize_years: YearRange::new(query.prize_year_start, query.prize_year_end),
        })
    }

    /// Returns true if `record` passes every active filter
    pub fn matches(&self, record: &PrizeRecord) -> bool {
        is_match(&self.name, &record.name)
            && is_match(&self.category, &record.category)
            && is_match(&self.country, &record.born_place)
            && is_match(&self.motivation, &record.motivation)
            && (!self.birth_years.is_active() || self.birth_years.contains(record.birth_year()))
            && (!self.prize_years.is_active() || self.prize_years.contains(record.prize_year()))
    }
}

fn is_match(pattern: &Option<Regex>, value: &str) -> bool {
    pattern.as_ref().map_or(true, |regex| regex.is_match(value))
}

fn build(field: &'static str, pattern: &str) -> QueryResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| {
            tracing::debug!("Rejected {} filter {:?}: {}", field, pattern, e);
            QueryError::InvalidPattern { field }
        })
}

/// Compiles a single-pattern filter; empty input means no filter
fn compile_pattern(field: &'static str, pattern: Option<&str>) -> QueryResult<Option<Regex>> {
    match pattern {
        Some(pattern) if !pattern.is_empty() => build(field, pattern).map(Some),
        _ => Ok(None),
    }
}

/// Compiles a comma-separated list of patterns into one alternation
///
/// Each item is trimmed and wrapped in its own group; empty items are
/// skipped.
fn compile_any_of(field: &'static str, patterns: Option<&str>) -> QueryResult<Option<Regex>> {
    let Some(patterns) = patterns else {
        return Ok(None);
    };

    let mut alternatives = Vec::new();
    for item in patterns.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        // Each item must compile on its own, not only inside the alternation.
        build(field, item)?;
        alternatives.push(format!("(?:{})", item));
    }

    if alternatives.is_empty() {
        return Ok(None);
    }
    build(field, &alternatives.join("|")).map(Some)
}
