use nobel_harvest::config::{FetcherConfig, RateLimitConfig, DEFAULT_USER_AGENT};
use nobel_harvest::crawler::{FetchResult, Fetcher, RateLimiter};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fast_fetcher(max_calls: u32, period_ms: u64) -> Fetcher {
    let config = FetcherConfig {
        timeout_secs: 5,
        retry_backoff_ms: 1,
        ..FetcherConfig::default()
    };
    let limiter = RateLimiter::new(&RateLimitConfig {
        max_calls,
        period_ms,
    })
    .expect("valid rate limit");
    Fetcher::new(&config, Arc::new(limiter)).expect("client builds")
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_string("recovered"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(1000, 1000);
    let result = fetcher.fetch(&format!("{}/flaky", mock_server.uri())).await;

    match result {
        FetchResult::Success {
            status_code, body, ..
        } => {
            assert_eq!(status_code, 200);
            assert_eq!(body, "recovered");
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(1000, 1000);
    let result = fetcher.fetch(&format!("{}/missing", mock_server.uri())).await;

    assert_eq!(result, FetchResult::HttpError { status_code: 404 });
    assert_eq!(result.failure_reason(), Some("HTTP 404".to_string()));
}

#[tokio::test]
async fn test_retries_stop_at_max_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/overloaded"))
        .respond_with(ResponseTemplate::new(429))
        .expect(5)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(1000, 1000);
    let result = fetcher
        .fetch(&format!("{}/overloaded", mock_server.uri()))
        .await;

    assert_eq!(result, FetchResult::HttpError { status_code: 429 });
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let fetcher = fast_fetcher(1000, 1000);
    let result = fetcher.fetch("http://127.0.0.1:9/unreachable").await;

    assert!(matches!(result, FetchResult::NetworkError { .. }));
    assert!(!result.is_success());
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(1000, 1000);
    let result = fetcher.fetch(&format!("{}/ua", mock_server.uri())).await;
    assert!(result.is_success());
}

#[tokio::test]
async fn test_fetch_decoded_unescapes_entities() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/entities"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<p>Marie Sk&#322;odowska-Curie &amp; Pierre Curie</p>"),
        )
        .expect(2)
        .mount(&mock_server)
        .await;

    let fetcher = fast_fetcher(1000, 1000);
    let url = format!("{}/entities", mock_server.uri());

    match fetcher.fetch_decoded(&url).await {
        FetchResult::Success { body, .. } => {
            assert_eq!(body, "<p>Marie Skłodowska-Curie & Pierre Curie</p>");
        }
        other => panic!("expected success, got {:?}", other),
    }

    // The plain fetch leaves the body untouched.
    match fetcher.fetch(&url).await {
        FetchResult::Success { body, .. } => assert!(body.contains("&amp;")),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rate_limit_spaces_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/limited"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(6)
        .mount(&mock_server)
        .await;

    // Two calls per 400ms: permits come 200ms apart.
    let fetcher = Arc::new(fast_fetcher(2, 400));
    let url = format!("{}/limited", mock_server.uri());

    let start = Instant::now();
    let mut handles = Vec::new();
    for _ in 0..6 {
        let fetcher = Arc::clone(&fetcher);
        let url = url.clone();
        handles.push(tokio::spawn(async move { fetcher.fetch(&url).await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_success());
    }

    assert!(
        start.elapsed() >= Duration::from_millis(900),
        "six requests finished in {:?}",
        start.elapsed()
    );
}
