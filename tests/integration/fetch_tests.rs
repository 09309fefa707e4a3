use crate::common::{fast_scraping, site_config};
use doxygen_harvest::crawler::{FetchError, HttpFetcher, PageSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_resolves_against_base() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/annotated.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>listing</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let body = fetcher.fetch("annotated.html").await.unwrap();

    assert_eq!(body, "<html>listing</html>");
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/class_a.html"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/class_a.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    assert_eq!(fetcher.fetch("class_a.html").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/class_a.html"))
        .respond_with(ResponseTemplate::new(502))
        .expect(3)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let result = fetcher.fetch("class_a.html").await;

    assert!(matches!(result, Err(FetchError::Status { status: 502, .. })));
}

#[tokio::test]
async fn test_not_found_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs/class_missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&site_config(&server), &fast_scraping()).unwrap();
    let result = fetcher.fetch("class_missing.html").await;

    assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
}
