use nobel_harvest::config::{Config, FetcherConfig, RateLimitConfig, ScraperConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at `seed_url` with fast retries
pub fn create_test_config(seed_url: String) -> Config {
    Config {
        scraper: ScraperConfig {
            seed_url,
            max_workers: 4,
            ..ScraperConfig::default()
        },
        fetcher: FetcherConfig {
            timeout_secs: 5,
            max_attempts: 5,
            retry_backoff_ms: 1, // Very short for testing
            ..FetcherConfig::default()
        },
        rate_limit: RateLimitConfig {
            max_calls: 1000,
            period_ms: 1000,
        },
        ..Config::default()
    }
}

/// Listing page linking to each of `paths` with the laureate anchor class
pub fn listing_page(base_url: &str, paths: &[&str]) -> String {
    let anchors: String = paths
        .iter()
        .map(|p| {
            format!(
                r#"<a class="card-prize--laureates--links--link" href="{}{}">Laureate</a>
"#,
                base_url, p
            )
        })
        .collect();

    format!(
        r#"<html><head><title>All Nobel Prizes</title></head><body>
<a href="{base_url}/about/">About</a>
{anchors}
</body></html>"#
    )
}

/// Laureate detail page
pub fn laureate_page(name: &str, prize_line: &str, born_line: &str, motivation: &str, image: &str) -> String {
    format!(
        r#"<html><body>
<div class="image">
<picture><img data-src="{image}"></picture>
<noscript><img src="{image}" alt="{name}"></noscript>
</div>
<div class="content">
<p>{name}<br>{prize_line}</p>
<p class="born-date">{born_line}</p>
<p>Prize motivation: {motivation}</p>
</div>
</body></html>"#
    )
}

/// Mounts a GET mock answering `path` with an HTML body
pub async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}
