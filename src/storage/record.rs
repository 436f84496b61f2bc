use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FOUR_DIGIT_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("year pattern is valid"));

/// One parsed laureate detail page
///
/// Every field is a plain string and is empty when the page did not yield
/// it. A record built from a page that could not be fetched keeps only its
/// `link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeRecord {
    pub link: String,
    pub name: String,
    pub category: String,
    pub year: String,
    pub born_date: String,
    pub born_place: String,
    pub motivation: String,
    pub image: String,
}

impl PrizeRecord {
    /// Placeholder for a link whose page could not be fetched
    pub fn empty(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            ..Self::default()
        }
    }

    /// Returns true if nothing besides the link was extracted
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.category.is_empty()
            && self.year.is_empty()
            && self.born_date.is_empty()
            && self.born_place.is_empty()
            && self.motivation.is_empty()
            && self.image.is_empty()
    }

    /// First standalone four-digit number in `born_date`
    pub fn birth_year(&self) -> Option<i32> {
        FOUR_DIGIT_YEAR
            .captures(&self.born_date)
            .and_then(|caps| caps[1].parse().ok())
    }

    /// Prize year as a number; `None` when the year is empty or not numeric
    pub fn prize_year(&self) -> Option<i32> {
        self.year.trim().parse().ok()
    }
}
