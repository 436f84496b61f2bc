//! Laureate page parser
//!
//! Turns one (entity-decoded) laureate page into a [`PrizeRecord`]. Parsing
//! never fails: every field that cannot be located stays empty.
//!
//! The markup differs between persons and organizations and between older
//! and newer pages, so the prize line and the birth line are each matched
//! against an ordered chain of rules. The first rule that matches wins.

use crate::storage::PrizeRecord;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// A named pattern in a fallback chain
///
/// Values are read from named capture groups; a group the rule does not
/// define reads as empty.
struct Rule {
    name: &'static str,
    pattern: Regex,
}

impl Rule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("extraction rule pattern is valid"),
        }
    }
}

/// Outcome of running a rule chain
struct RuleMatch<'r, 'h> {
    rule: &'r Rule,
    captures: Captures<'h>,
}

impl RuleMatch<'_, '_> {
    fn group(&self, name: &str) -> String {
        self.captures
            .name(name)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default()
    }
}

/// Tries each rule in order and returns the first that matches
fn first_match<'r, 'h>(rules: &'r [Rule], haystack: &'h str) -> Option<RuleMatch<'r, 'h>> {
    rules.iter().find_map(|rule| {
        rule.pattern
            .captures(haystack)
            .map(|captures| RuleMatch { rule, captures })
    })
}

/// Returns capture group 1 of the first match of `pattern`
fn first_capture<'h>(pattern: &Regex, haystack: &'h str) -> Option<&'h str> {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

static CONTENT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<div class="content">(.+?)</div>"#).expect("valid pattern"));

static FIRST_PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>(.+?)</p>").expect("valid pattern"));

static NAME_AND_PRIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<name>.+?)<br>(?P<prize>.+)").expect("valid pattern"));

static BORN_FRAGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<p class="born-date">([^<]+)"#).expect("valid pattern"));

static MOTIVATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<p>Prize motivation: (.+?)</p>").expect("valid pattern"));

static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid pattern"));

static IMAGE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<div class="image">(.+?)</div>"#).expect("valid pattern"));

static NOSCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<noscript>(.+?)</noscript>").expect("valid pattern"));

static IMG_SRC: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src="([^"]+?)""#).expect("valid pattern"));

/// Prize line shapes, yielding `category` and `year`
static PRIZE_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(
            "nobel-prize-in",
            r"The Nobel Prize in (?P<category>[A-Za-z\s]+?) (?P<year>\d{4})",
        ),
        Rule::new(
            "economic-sciences",
            r"The Sveriges Riksbank Prize in (?P<category>[A-Za-z\s]+?) in Memory of Alfred Nobel (?P<year>\d{4})",
        ),
        Rule::new(
            "nobel-named-prize",
            r"The Nobel (?P<category>[A-Za-z]+?) Prize (?P<year>\d{4})",
        ),
    ]
});

/// Birth or founding line shapes, yielding `date` and `place`
static BORN_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new("born-with-place", r"Born: (?P<date>[^,]+?), (?P<place>.+)"),
        Rule::new("born-year", r"Born: (?P<date>\d{4})"),
        Rule::new(
            "founded-with-place",
            r"Founded: (?P<date>\d{4}), (?P<place>.+)",
        ),
        Rule::new("founded-year", r"Founded: (?P<date>\d{4})"),
        Rule::new(
            "residence",
            r"Residence at the time of the award:(?P<place>.+)",
        ),
    ]
});

/// Parses a laureate page into a record
///
/// # Extraction stages
///
/// 1. Content block (`<div class="content">`); without it only the image
///    can be found
/// 2. First paragraph, split at `<br>` into name and prize line
/// 3. Prize line → category and year (three shapes)
/// 4. `born-date` paragraph → born date and place (five shapes)
/// 5. `Prize motivation:` paragraph, reduced to words
/// 6. Image `src` inside `<div class="image">` → `<noscript>`
///
/// # Arguments
///
/// * `url` - The page URL, kept on the record
/// * `html` - The page markup with HTML entities already decoded
pub fn parse_prize_page(url: &str, html: &str) -> PrizeRecord {
    let mut record = PrizeRecord::empty(url);

    if let Some(content) = first_capture(&CONTENT_BLOCK, html) {
        let content = content.trim().replace(|c: char| c == '\n' || c == '\r', "");

        let (name, category, year) = extract_name_and_prize(&content);
        record.name = name;
        record.category = category;
        record.year = year;

        let (born_date, born_place) = extract_birth(&content);
        record.born_date = born_date;
        record.born_place = born_place;

        record.motivation = extract_motivation(&content);
    } else {
        tracing::debug!("No content block on {}", url);
    }

    record.image = extract_image(html);
    record
}

/// Name, category and year from the first paragraph of the content block
fn extract_name_and_prize(content: &str) -> (String, String, String) {
    let Some(paragraph) = first_capture(&FIRST_PARAGRAPH, content) else {
        return Default::default();
    };
    let paragraph = paragraph.trim();

    let Some(caps) = NAME_AND_PRIZE.captures(paragraph) else {
        return (paragraph.to_string(), String::new(), String::new());
    };
    let name = caps["name"].trim().to_string();

    match first_match(&PRIZE_RULES, &caps["prize"]) {
        Some(found) => {
            tracing::trace!("Prize line matched rule {}", found.rule.name);
            (name, found.group("category"), found.group("year"))
        }
        None => (name, String::new(), String::new()),
    }
}

/// Born date and place from the `born-date` paragraph
fn extract_birth(content: &str) -> (String, String) {
    let Some(fragment) = first_capture(&BORN_FRAGMENT, content) else {
        return Default::default();
    };

    match first_match(&BORN_RULES, fragment.trim()) {
        Some(found) => {
            tracing::trace!("Birth line matched rule {}", found.rule.name);
            (found.group("date"), found.group("place"))
        }
        None => Default::default(),
    }
}

/// Motivation text with every run of non-word characters collapsed to a space
fn extract_motivation(content: &str) -> String {
    first_capture(&MOTIVATION, content)
        .map(|text| {
            NON_WORD_RUN
                .replace_all(text.trim(), " ")
                .trim()
                .to_string()
        })
        .unwrap_or_default()
}

/// Portrait URL from the `<noscript>` fallback of the image block
fn extract_image(html: &str) -> String {
    first_capture(&IMAGE_BLOCK, html)
        .and_then(|block| first_capture(&NOSCRIPT, block))
        .and_then(|noscript| first_capture(&IMG_SRC, noscript))
        .map(|src| src.trim().to_string())
        .unwrap_or_default()
}
