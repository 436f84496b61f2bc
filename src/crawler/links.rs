//! Detail-link discovery on the listing page
//!
//! The listing page marks every laureate link with a dedicated anchor class.
//! Links are resolved against the listing URL, filtered to http(s) targets
//! and de-duplicated in first-seen order.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts detail-page links matching `selector` from the listing page
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `base_url` - The listing URL, used to resolve relative links
/// * `selector` - CSS selector identifying detail-page anchors
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Absolute, de-duplicated links in document order.
///   An anchor repeated on the listing yields one entry, so the scrape's
///   `total_links` counts unique links, not anchor matches.
/// * `Err(String)` - The selector could not be parsed
///
/// # Example
///
/// ```
/// use nobel_harvest::crawler::discover_links;
/// use url::Url;
///
/// let html = r#"<a class="laureate" href="/prizes/physics/1921/einstein/facts/">Einstein</a>"#;
/// let base = Url::parse("https://www.nobelprize.org/prizes/lists/all-nobel-prizes/all/").unwrap();
/// let links = discover_links(html, &base, "a.laureate").unwrap();
/// assert_eq!(links, vec!["https://www.nobelprize.org/prizes/physics/1921/einstein/facts/"]);
/// ```
pub fn discover_links(html: &str, base_url: &Url, selector: &str) -> Result<Vec<String>, String> {
    let selector = Selector::parse(selector).map_err(|e| format!("{:?}", e))?;
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(absolute_url) = resolve_link(href, base_url) {
            if seen.insert(absolute_url.clone()) {
                links.push(absolute_url);
            }
        }
    }

    Ok(links)
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.to_string()),
        _ => None,
    }
}
