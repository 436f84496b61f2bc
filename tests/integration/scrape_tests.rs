use crate::common::{create_test_config, laureate_page, listing_page, mount_html};
use nobel_harvest::crawler::run_scrape;
use nobel_harvest::query::{query_prizes, PrizeQuery};
use nobel_harvest::state::ScrapePhase;
use nobel_harvest::storage::{PrizeRecord, PrizeStore};
use nobel_harvest::{HarvestError, QueryError};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn find<'a>(records: &'a [PrizeRecord], link: &str) -> &'a PrizeRecord {
    records
        .iter()
        .find(|r| r.link == link)
        .unwrap_or_else(|| panic!("no record for {}", link))
}

#[tokio::test]
async fn test_full_scrape_with_failing_detail_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list/",
        listing_page(
            &base_url,
            &["/prizes/physics/1999/thooft/", "/prizes/peace/1917/icrc/", "/prizes/broken/"],
        ),
    )
    .await;

    mount_html(
        &mock_server,
        "/prizes/physics/1999/thooft/",
        laureate_page(
            "Gerardus &#39;t Hooft",
            "The Nobel Prize in Physics 1999",
            "Born: 5 July 1946, Den Helder, the Netherlands",
            "&ldquo;for elucidating the quantum structure of electroweak interactions in physics&rdquo;",
            "https://images.example.com/thooft.jpg",
        ),
    )
    .await;

    mount_html(
        &mock_server,
        "/prizes/peace/1917/icrc/",
        laureate_page(
            "International Committee of the Red Cross",
            "The Nobel Peace Prize 1917",
            "Founded: 1863, Geneva, Switzerland",
            "&ldquo;for the efforts to take care of wounded soldiers&rdquo;",
            "https://images.example.com/icrc.jpg",
        ),
    )
    .await;

    // Every attempt fails; the fetcher must try exactly five times.
    Mock::given(method("GET"))
        .and(path("/prizes/broken/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(5)
        .mount(&mock_server)
        .await;

    let store = Arc::new(PrizeStore::new());
    let config = create_test_config(format!("{}/list/", base_url));
    run_scrape(config, Arc::clone(&store))
        .await
        .expect("Scrape failed");

    let status = store.status();
    assert_eq!(status.status, ScrapePhase::Completed);
    assert_eq!(status.total_links, 3);
    assert_eq!(status.processed_links, 3);
    assert!(status.started_at.is_some());
    assert!(status.finished_at.is_some());

    let records = store.records().expect("records published");
    assert_eq!(records.len(), 3);

    let thooft = find(records, &format!("{}/prizes/physics/1999/thooft/", base_url));
    assert_eq!(thooft.name, "Gerardus 't Hooft");
    assert_eq!(thooft.category, "Physics");
    assert_eq!(thooft.year, "1999");
    assert_eq!(thooft.born_date, "5 July 1946");
    assert_eq!(thooft.born_place, "Den Helder, the Netherlands");
    assert_eq!(
        thooft.motivation,
        "for elucidating the quantum structure of electroweak interactions in physics"
    );
    assert_eq!(thooft.image, "https://images.example.com/thooft.jpg");

    let icrc = find(records, &format!("{}/prizes/peace/1917/icrc/", base_url));
    assert_eq!(icrc.category, "Peace");
    assert_eq!(icrc.year, "1917");
    assert_eq!(icrc.born_date, "1863");
    assert_eq!(icrc.born_place, "Geneva, Switzerland");

    let broken_link = format!("{}/prizes/broken/", base_url);
    let broken = find(records, &broken_link);
    assert_eq!(broken, &PrizeRecord::empty(broken_link.clone()));
}

#[tokio::test]
async fn test_seed_page_failure_is_terminal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list/"))
        .respond_with(ResponseTemplate::new(503))
        .expect(5)
        .mount(&mock_server)
        .await;

    let store = Arc::new(PrizeStore::new());
    let config = create_test_config(format!("{}/list/", mock_server.uri()));
    let result = run_scrape(config, Arc::clone(&store)).await;

    assert!(matches!(result, Err(HarvestError::SeedFetch { .. })));

    let status = store.status();
    match &status.status {
        ScrapePhase::Error(message) => assert!(message.contains("HTTP 503"), "{}", message),
        other => panic!("expected error phase, got {:?}", other),
    }
    assert_eq!(status.total_links, 0);
    assert_eq!(status.processed_links, 0);
    assert_eq!(
        query_prizes(&store, &PrizeQuery::default()),
        Err(QueryError::NotReady)
    );
}

#[tokio::test]
async fn test_seed_not_found_is_not_retried() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/list/"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = Arc::new(PrizeStore::new());
    let config = create_test_config(format!("{}/list/", mock_server.uri()));
    assert!(run_scrape(config, Arc::clone(&store)).await.is_err());
    assert!(matches!(store.status().status, ScrapePhase::Error(_)));
}

#[tokio::test]
async fn test_empty_listing_completes() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/list/", listing_page(&mock_server.uri(), &[])).await;

    let store = Arc::new(PrizeStore::new());
    let config = create_test_config(format!("{}/list/", mock_server.uri()));
    run_scrape(config, Arc::clone(&store))
        .await
        .expect("Scrape failed");

    let status = store.status();
    assert_eq!(status.status, ScrapePhase::Completed);
    assert_eq!(status.total_links, 0);
    assert!(store.records().unwrap().is_empty());
}

#[tokio::test]
async fn test_many_links_with_single_worker() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let paths: Vec<String> = (0..12).map(|i| format!("/laureate/{}/", i)).collect();
    let path_refs: Vec<&str> = paths.iter().map(String::as_str).collect();
    mount_html(&mock_server, "/list/", listing_page(&base_url, &path_refs)).await;

    for (i, p) in paths.iter().enumerate() {
        mount_html(
            &mock_server,
            p,
            laureate_page(
                &format!("Laureate {}", i),
                &format!("The Nobel Prize in Chemistry {}", 1950 + i),
                "Born: 1920",
                "for chemistry",
                "",
            ),
        )
        .await;
    }

    let store = Arc::new(PrizeStore::new());
    let mut config = create_test_config(format!("{}/list/", base_url));
    config.scraper.max_workers = 1;
    run_scrape(config, Arc::clone(&store))
        .await
        .expect("Scrape failed");

    let records = store.records().unwrap();
    assert_eq!(records.len(), 12);
    assert_eq!(store.status().processed_links, 12);

    let mut years: Vec<String> = records.iter().map(|r| r.year.clone()).collect();
    years.sort();
    let expected: Vec<String> = (0..12).map(|i| (1950 + i).to_string()).collect();
    assert_eq!(years, expected);
}

#[tokio::test]
async fn test_repeated_anchor_counts_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/list/",
        listing_page(
            &base_url,
            &["/laureate/curie/", "/laureate/curie/", "/laureate/planck/"],
        ),
    )
    .await;
    for (p, name, prize) in [
        ("/laureate/curie/", "Marie Curie", "The Nobel Prize in Chemistry 1911"),
        ("/laureate/planck/", "Max Planck", "The Nobel Prize in Physics 1918"),
    ] {
        mount_html(
            &mock_server,
            p,
            laureate_page(name, prize, "Born: 1867", "for discoveries", ""),
        )
        .await;
    }

    let store = Arc::new(PrizeStore::new());
    let config = create_test_config(format!("{}/list/", base_url));
    run_scrape(config, Arc::clone(&store))
        .await
        .expect("Scrape failed");

    let status = store.status();
    assert_eq!(status.total_links, 2);
    assert_eq!(status.processed_links, 2);
    assert_eq!(store.records().unwrap().len(), 2);
}
