//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler:
//! - Building the HTTP client with the configured user agent and timeouts
//! - GET requests to fetch page content
//! - Classifying failures so the crawler can skip them
//!
//! There is no retry logic. A failed fetch drops the page and the crawl moves on.

use crate::config::CrawlerConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Response was not an HTML or text document
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for crawling
///
/// # Example
///
/// ```no_run
/// use tutorial_forge::config::CrawlerConfig;
/// use tutorial_forge::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML/text (or no) Content-Type | Success |
/// | 2xx with any other Content-Type | ContentMismatch |
/// | Non-2xx status | HttpError |
/// | Timeout, connection refused, body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !is_document_content_type(&content_type) {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// Accepts missing Content-Type, any `text/*`, and XHTML
fn is_document_content_type(content_type: &str) -> bool {
    let content_type = content_type.trim().to_ascii_lowercase();
    content_type.is_empty()
        || content_type.starts_with("text/")
        || content_type.contains("html")
}

/// Maps a status code to a short label for logs
pub(crate) fn describe_status(status_code: u16) -> String {
    match StatusCode::from_u16(status_code) {
        Ok(status) => status.to_string(),
        Err(_) => format!("HTTP {}", status_code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&CrawlerConfig::default()).unwrap()
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(&CrawlerConfig::default()).is_ok());
    }

    #[test]
    fn test_document_content_types() {
        assert!(is_document_content_type("text/html; charset=utf-8"));
        assert!(is_document_content_type("TEXT/HTML"));
        assert!(is_document_content_type("text/plain"));
        assert!(is_document_content_type("application/xhtml+xml"));
        assert!(is_document_content_type(""));

        assert!(!is_document_content_type("application/pdf"));
        assert!(!is_document_content_type("image/png"));
        assert!(!is_document_content_type("application/json"));
    }

    #[test]
    fn test_describe_status() {
        assert_eq!(describe_status(404), "404 Not Found");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/guide"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html><body>Hi</body></html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&server)
            .await;

        let result = fetch_url(&test_client(), &format!("{}/guide", server.uri())).await;
        match result {
            FetchResult::Success { final_url, body } => {
                assert!(final_url.ends_with("/guide"));
                assert!(body.contains("Hi"));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetch_url(&test_client(), &format!("{}/missing", server.uri())).await;
        assert!(matches!(result, FetchResult::HttpError { status_code: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_binary_is_mismatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46])
                    .insert_header("content-type", "application/pdf"),
            )
            .mount(&server)
            .await;

        let result = fetch_url(&test_client(), &format!("{}/manual", server.uri())).await;
        assert!(matches!(result, FetchResult::ContentMismatch { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let result = fetch_url(&test_client(), "http://127.0.0.1:1/").await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
