//! HTTP scraper: fetches the page and reads its title, description and
//! preview image from the HTML head.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, redirect::Policy, Client, Response};
use scraper::{Html, Selector};
use url::Url;

use super::PreviewScraper;
use crate::types::errors::ScraperError;
use crate::types::link::non_blank;
use crate::types::preview::Preview;

/// Download cap; bytes past it are never read off the socket.
const MAX_HTML_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
pub struct HttpScraper {
    http: Client,
}

impl HttpScraper {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        let http = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::limited(8))
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http })
    }
}

#[async_trait]
impl PreviewScraper for HttpScraper {
    async fn scrape(&self, url: &str, _link_id: &str) -> Result<Preview, ScraperError> {
        let parsed = Url::parse(url).map_err(|e| ScraperError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScraperError::InvalidUrl(format!("unsupported scheme: {}", parsed.scheme())));
        }

        let res = self
            .http
            .get(parsed.clone())
            .send()
            .await
            .map_err(|e| ScraperError::Network(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus(status.as_u16()));
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        if !content_type.to_lowercase().starts_with("text/html") {
            return Err(ScraperError::NotHtml(content_type));
        }

        // Base for relative image URLs: the final URL after redirects.
        let base = res.url().clone();
        let body = read_capped(res, MAX_HTML_BYTES).await?;
        let html = String::from_utf8_lossy(&body);

        Ok(parse_preview(&html, &base))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Reads at most `cap` bytes of the body, chunk by chunk, then drops the
/// response.
async fn read_capped(mut res: Response, cap: usize) -> Result<Vec<u8>, ScraperError> {
    let mut body = Vec::new();
    while let Some(chunk) = res
        .chunk()
        .await
        .map_err(|e| ScraperError::Network(e.to_string()))?
    {
        let room = cap - body.len();
        body.extend_from_slice(&chunk[..chunk.len().min(room)]);
        if body.len() >= cap {
            break;
        }
    }
    Ok(body)
}

/// Extracts a preview from an HTML document.
///
/// Open Graph tags win over `<title>` and `meta[name=description]`.
pub fn parse_preview(html: &str, base: &Url) -> Preview {
    let doc = Html::parse_document(html);

    let title = meta_content(&doc, r#"meta[property="og:title"]"#)
        .or_else(|| first_text(&doc, "title"));
    let description = meta_content(&doc, r#"meta[property="og:description"]"#)
        .or_else(|| meta_content(&doc, r#"meta[name="description"]"#));
    let preview_image_url = meta_content(&doc, r#"meta[property="og:image"]"#)
        .or_else(|| meta_content(&doc, r#"meta[name="twitter:image"]"#))
        .and_then(|src| base.join(&src).ok())
        .map(|u| u.to_string());

    Preview {
        preview_image_url,
        title,
        description,
    }
}

fn meta_content(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .filter_map(|m| m.value().attr("content"))
        .find_map(non_blank)
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel)
        .map(|n| n.text().collect::<String>())
        .find_map(|t| non_blank(&t))
}
