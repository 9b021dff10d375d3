//! Tests for the preview scrapers.
//!
//! The mock scraper is checked directly; the HTTP scraper is pointed at a
//! throwaway axum server on a loopback port.

use std::time::Duration;

use rstest::rstest;
use url::Url;

use linkshelf::services::scraper::{fetch_preview, MockScraper, PreviewScraper};
use linkshelf::types::errors::ScraperError;

#[rstest]
#[case("https://reactjs.org/", "React – A JavaScript library for building user interfaces")]
#[case("https://docs.reactjs.org/learn", "React – A JavaScript library for building user interfaces")]
#[case("https://news.ycombinator.com/item?id=1", "Content from news.ycombinator.com")]
#[case("http://localhost:8080/", "Content from localhost")]
fn test_mock_metadata_guess(#[case] url: &str, #[case] expected_title: &str) {
    let (title, description) = MockScraper::guess_metadata(&Url::parse(url).unwrap());
    assert_eq!(title, expected_title);
    assert!(!description.is_empty());
}

#[tokio::test]
async fn test_mock_preview_is_unique_per_link() {
    let mock = MockScraper::instant();
    let a = mock.scrape("https://a.com", "lk-a").await.unwrap();
    let b = mock.scrape("https://a.com", "lk-b").await.unwrap();
    assert_ne!(a.preview_image_url, b.preview_image_url);
    assert!(a.preview_image_url.unwrap().ends_with("random=lk-a"));
}

#[tokio::test]
async fn test_mock_rejects_unparseable_url() {
    let mock = MockScraper::instant();
    let result = mock.scrape("::not-a-url::", "lk-1").await;
    assert!(matches!(result, Err(ScraperError::InvalidUrl(_))));

    // Through fetch_preview the same failure is absorbed.
    let preview = fetch_preview(&mock, "::not-a-url::", "lk-1", Duration::from_secs(1)).await;
    assert!(preview.is_unavailable());
}

#[cfg(feature = "network")]
mod http {
    use super::*;

    use axum::{http::header, response::IntoResponse, routing::get, Router};
    use linkshelf::services::scraper::HttpScraper;
    use tokio::net::TcpListener;

    const PAGE: &str = r#"<!doctype html><html><head>
        <title>Fallback title</title>
        <meta property="og:title" content="Local Article">
        <meta name="description" content="A page served for tests">
        <meta property="og:image" content="/static/cover.jpg">
    </head><body><p>hello</p></body></html>"#;

    async fn page() -> impl IntoResponse {
        ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], PAGE)
    }

    /// A page whose head is followed by far more body than the scraper reads.
    async fn huge() -> impl IntoResponse {
        let mut html = String::from(
            r#"<html><head><meta property="og:title" content="Huge Page"></head><body>"#,
        );
        html.push_str(&"<p>padding</p>".repeat(400_000));
        html.push_str("</body></html>");
        ([(header::CONTENT_TYPE, "text/html")], html)
    }

    async fn pdf() -> impl IntoResponse {
        ([(header::CONTENT_TYPE, "application/pdf")], "%PDF-1.4")
    }

    async fn slow() -> impl IntoResponse {
        tokio::time::sleep(Duration::from_secs(5)).await;
        ([(header::CONTENT_TYPE, "text/html")], "<title>late</title>")
    }

    async fn spawn_site() -> String {
        let app = Router::new()
            .route("/article", get(page))
            .route("/huge", get(huge))
            .route("/file.pdf", get(pdf))
            .route("/slow", get(slow));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn scraper(timeout: Duration) -> HttpScraper {
        HttpScraper::new("linkshelf-test", timeout).unwrap()
    }

    #[tokio::test]
    async fn test_reads_open_graph_metadata() {
        let base = spawn_site().await;
        let preview = scraper(Duration::from_secs(5))
            .scrape(&format!("{}/article", base), "lk-1")
            .await
            .unwrap();
        assert_eq!(preview.title.as_deref(), Some("Local Article"));
        assert_eq!(preview.description.as_deref(), Some("A page served for tests"));
        assert_eq!(
            preview.preview_image_url,
            Some(format!("{}/static/cover.jpg", base))
        );
    }

    #[tokio::test]
    async fn test_oversized_page_still_yields_preview() {
        let base = spawn_site().await;
        let preview = scraper(Duration::from_secs(10))
            .scrape(&format!("{}/huge", base), "lk-1")
            .await
            .unwrap();
        assert_eq!(preview.title.as_deref(), Some("Huge Page"));
    }

    #[tokio::test]
    async fn test_non_html_is_rejected() {
        let base = spawn_site().await;
        let result = scraper(Duration::from_secs(5))
            .scrape(&format!("{}/file.pdf", base), "lk-1")
            .await;
        assert!(matches!(result, Err(ScraperError::NotHtml(_))));
    }

    #[tokio::test]
    async fn test_missing_page_reports_status() {
        let base = spawn_site().await;
        let result = scraper(Duration::from_secs(5))
            .scrape(&format!("{}/nope", base), "lk-1")
            .await;
        assert!(matches!(result, Err(ScraperError::HttpStatus(404))));
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let result = scraper(Duration::from_secs(5))
            .scrape("ftp://files.example.com/readme", "lk-1")
            .await;
        assert!(matches!(result, Err(ScraperError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_slow_site_times_out_to_unavailable() {
        let base = spawn_site().await;
        let http = scraper(Duration::from_secs(30));
        let preview = fetch_preview(
            &http,
            &format!("{}/slow", base),
            "lk-1",
            Duration::from_millis(200),
        )
        .await;
        assert!(preview.is_unavailable());
    }
}
