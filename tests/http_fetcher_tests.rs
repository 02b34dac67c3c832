//! Integration tests for the HTTP fetcher against a mock HTTP server.

use std::time::Duration;

use crawler_core::{FetchError, Fetcher, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_success_extracts_links() {
    let mock_server = MockServer::start().await;
    let body = r##"<html><body>
        <a href="/docs/intro">intro</a>
        <a href="https://elsewhere.org/page">external</a>
        <a href="#top">anchor</a>
        <a href="mailto:team@example.com">mail</a>
    </body></html>"##;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new();
    let url = format!("{}/index.html", mock_server.uri());
    let document = fetcher.fetch(&url).await.unwrap();

    let links = document.extract_links().unwrap();
    assert_eq!(
        links,
        vec![
            format!("{}/docs/intro", mock_server.uri()),
            "https://elsewhere.org/page".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_fetch_404_is_http_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new();
    let url = format!("{}/missing", mock_server.uri());
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(error, FetchError::HttpStatus { status: 404, .. }));
}

#[tokio::test]
async fn test_fetch_500_is_http_status_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new();
    let url = format!("{}/broken", mock_server.uri());
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(error, FetchError::HttpStatus { status: 500, .. }));
}

#[tokio::test]
async fn test_fetch_connection_refused_is_network_error() {
    // Bind then drop a server so the port is very likely unused
    let mock_server = MockServer::start().await;
    let url = format!("{}/page", mock_server.uri());
    drop(mock_server);

    let fetcher = HttpFetcher::new();
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(error, FetchError::Network { .. }));
}

#[tokio::test]
async fn test_fetch_timeout_is_timeout_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::with_timeout(Duration::from_millis(200));
    let url = format!("{}/slow", mock_server.uri());
    let error = fetcher.fetch(&url).await.unwrap_err();

    assert!(matches!(error, FetchError::Timeout { .. }));
}

#[tokio::test]
async fn test_fetch_empty_body_yields_no_links() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/empty"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let fetcher = HttpFetcher::new();
    let url = format!("{}/empty", mock_server.uri());
    let document = fetcher.fetch(&url).await.unwrap();

    assert!(document.extract_links().unwrap().is_empty());
}
