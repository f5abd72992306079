//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from base URL to CSV report.

use site_ripple::config::{Config, CrawlerConfig};
use site_ripple::crawler::{crawl_site, Coordinator};
use site_ripple::output::write_csv_report;
use site_ripple::{normalize_url, RippleError, TaskState};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given limits
fn create_test_config(max_concurrency: usize, max_pages: usize) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrency,
            max_pages,
            workers: None,
        },
        ..Config::default()
    }
}

/// Mounts an HTML page at `route`
async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(body, "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

fn page(title: &str, paragraph: &str, hrefs: &[&str]) -> String {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><body><h1>{}</h1><p>{}</p>{}</body></html>",
        title, paragraph, anchors
    )
}

#[tokio::test]
async fn test_full_crawl_single_host() {
    let mock_server = MockServer::start().await;
    let base_url = format!("{}/", mock_server.uri());

    mount_html(
        &mock_server,
        "/",
        page("Home", "Welcome home.", &["/page1", "/page2"]),
    )
    .await;
    mount_html(&mock_server, "/page1", page("Page 1", "Content 1", &["/"])).await;
    mount_html(
        &mock_server,
        "/page2",
        page("Page 2", "Content 2", &["/page1"]),
    )
    .await;

    let outcome = crawl_site(&base_url, &create_test_config(3, 50))
        .await
        .expect("crawl should start");

    assert_eq!(outcome.pages.len(), 3);

    let home = &outcome.pages[&normalize_url(&base_url).unwrap()];
    assert_eq!(home.h1, "Home");
    assert_eq!(home.first_paragraph, "Welcome home.");
    assert_eq!(
        home.outgoing_links,
        vec![
            format!("{}/page1", mock_server.uri()),
            format!("{}/page2", mock_server.uri()),
        ]
    );

    let page1_key = normalize_url(&format!("{}/page1", mock_server.uri())).unwrap();
    assert_eq!(outcome.pages[&page1_key].h1, "Page 1");
    assert_eq!(outcome.statistics.pages_recorded(), 3);
}

#[tokio::test]
async fn test_budget_of_one_records_only_base() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        page("Home", "Root", &["/a", "/b", "/c"]),
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let outcome = crawl_site(&base_url, &create_test_config(2, 1))
        .await
        .expect("crawl should start");

    assert_eq!(outcome.pages.len(), 1);
    assert!(outcome
        .pages
        .contains_key(&normalize_url(&base_url).unwrap()));
}

#[tokio::test]
async fn test_cross_host_links_recorded_but_not_fetched() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let port = url::Url::parse(&base_url).unwrap().port().unwrap();

    // Same server, different host name: must not be fetched
    let foreign = format!("http://localhost:{}/elsewhere", port);
    mount_html(&mock_server, "/", page("Home", "Root", &[foreign.as_str()])).await;
    Mock::given(method("GET"))
        .and(path("/elsewhere"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let outcome = crawl_site(&base_url, &create_test_config(2, 10))
        .await
        .expect("crawl should start");

    assert_eq!(outcome.pages.len(), 1);
    let home = outcome.pages.values().next().unwrap();
    assert_eq!(home.outgoing_links, vec![foreign]);
    assert_eq!(outcome.statistics.count(TaskState::SkippedHost), 1);
}

#[tokio::test]
async fn test_failed_pages_are_omitted() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        page("Home", "Root", &["/missing", "/data.json", "/ok"]),
    )
    .await;
    mount_html(&mock_server, "/ok", page("Fine", "Still here", &[])).await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("{}", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let outcome = crawl_site(&base_url, &create_test_config(3, 10))
        .await
        .expect("crawl should start");

    let keys: Vec<String> = outcome
        .pages
        .keys()
        .map(|key| key.as_str().to_string())
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.iter().all(|key| !key.ends_with("/missing")));
    assert!(keys.iter().all(|key| !key.ends_with("/data.json")));

    let reasons = &outcome.statistics.no_content_reasons;
    assert_eq!(reasons.get("http_error"), Some(&1));
    assert_eq!(reasons.get("content_mismatch"), Some(&1));
}

#[tokio::test]
async fn test_url_variants_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        page(
            "Home",
            "Root",
            &["/about", "/About/", "/about?ref=nav", "/about#team"],
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path_regex("(?i)^/about/?$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(page("About", "Us", &[]), "text/html"),
        )
        .expect(1)
        .named("about variants")
        .mount(&mock_server)
        .await;

    let outcome = crawl_site(&base_url, &create_test_config(4, 10))
        .await
        .expect("crawl should start");

    assert_eq!(outcome.pages.len(), 2);
    assert!(outcome.statistics.count(TaskState::SkippedDuplicate) >= 3);
}

#[tokio::test]
async fn test_budget_respected_under_concurrency() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    let routes: Vec<String> = (0..20).map(|i| format!("/p{}", i)).collect();
    let hrefs: Vec<&str> = routes.iter().map(String::as_str).collect();
    mount_html(&mock_server, "/", page("Home", "Root", &hrefs)).await;
    for route in &routes {
        mount_html(&mock_server, route, page(route, "Leaf", &hrefs)).await;
    }

    let outcome = crawl_site(&base_url, &create_test_config(5, 7))
        .await
        .expect("crawl should start");

    assert_eq!(outcome.pages.len(), 7);
}

#[tokio::test]
async fn test_invalid_base_url_fails_to_start() {
    let result = crawl_site("not a url", &create_test_config(2, 10)).await;
    assert!(matches!(result, Err(RippleError::BaseUrl(_))));
}

#[tokio::test]
async fn test_report_written_after_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/",
        page("Home, sweet home", r#"Say "hello""#, &["/next"]),
    )
    .await;
    mount_html(&mock_server, "/next", page("Next", "More", &[])).await;

    let coordinator = Coordinator::from_config(&base_url, &create_test_config(2, 10))
        .expect("coordinator should build");
    let outcome = coordinator.run().await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.csv");
    write_csv_report(&outcome.pages, &report_path).expect("report should be written");

    let report = std::fs::read_to_string(&report_path).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(
        lines[0],
        "page_url,h1,first_paragraph,outgoing_link_urls,image_urls"
    );
    assert_eq!(lines.len(), 3);
    assert!(report.contains(r#""Home, sweet home","Say ""hello""""#));
}
