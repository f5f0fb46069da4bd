//! Integration tests for the crawler
//!
//! These tests use wiremock to serve small documentation sites and run the
//! full crawl cycle against them.

use std::collections::HashSet;
use tutorial_forge::config::CrawlerConfig;
use tutorial_forge::crawler::{crawl, CrawledPage};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Crawler configuration with no politeness delay
fn test_config() -> CrawlerConfig {
    CrawlerConfig {
        request_delay_ms: 0,
        request_timeout_secs: 5,
        ..CrawlerConfig::default()
    }
}

fn html(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=utf-8")
        .set_body_string(format!("<html><head><title>Docs</title></head><body>{body}</body></html>"))
}

async fn mount_page(server: &MockServer, page_path: &str, body: &str, expected_hits: u64) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(expected_hits)
        .mount(server)
        .await;
}

fn paths(pages: &[CrawledPage], base: &str) -> Vec<String> {
    pages
        .iter()
        .map(|page| page.url.trim_start_matches(base).to_string())
        .collect()
}

#[tokio::test]
async fn test_breadth_first_order_and_dedup() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main><h1>Home</h1><a href="/a">A</a><a href="/b/">B</a><a href="/">Home</a></main>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/a",
        r#"<main><h1>A</h1><a href="/c">C</a><a href="/b">B again</a></main>"#,
        1,
    )
    .await;
    mount_page(
        &server,
        "/b",
        r#"<main><h1>B</h1><a href="/a">A again</a></main>"#,
        1,
    )
    .await;
    mount_page(&server, "/c", "<main><h1>C</h1></main>", 1).await;

    let pages = crawl(&base, 10, &test_config()).await.unwrap();

    assert_eq!(paths(&pages, &base), vec!["", "/a", "/b", "/c"]);

    let unique: HashSet<_> = pages.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(unique.len(), pages.len());
    assert_eq!(pages[1].title, "A");
}

#[tokio::test]
async fn test_budget_of_one_fetches_only_seed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", r#"<main><a href="/next">Next</a></main>"#, 1).await;
    mount_page(&server, "/next", "<main>Never fetched</main>", 0).await;

    let pages = crawl(&base, 1, &test_config()).await.unwrap();
    assert_eq!(pages.len(), 1);
}

#[tokio::test]
async fn test_budget_caps_output() {
    let server = MockServer::start().await;
    let base = server.uri();

    let links: String = (1..=10)
        .map(|n| format!(r#"<a href="/p{n}">P{n}</a>"#))
        .collect();
    mount_page(&server, "/", &format!("<main>{links}</main>"), 1).await;
    Mock::given(method("GET"))
        .respond_with(html("<main>Page</main>"))
        .mount(&server)
        .await;

    let pages = crawl(&base, 4, &test_config()).await.unwrap();
    assert_eq!(paths(&pages, &base), vec!["", "/p1", "/p2", "/p3"]);
}

#[tokio::test]
async fn test_scope_and_exclusions() {
    let server = MockServer::start().await;
    let base = server.uri();
    let port = url::Url::parse(&base).unwrap().port().unwrap();

    let body = format!(
        r#"<nav>
            <a href="/guide.pdf">PDF</a>
            <a href="/api/reference">API</a>
            <a href="/LOGIN">Login</a>
            <a href="/theme.css">CSS</a>
            <a href="/section#anchor">Anchor</a>
            <a href="/files/bundle" download>Download</a>
            <a href="http://localhost:{port}/outside">Other host</a>
            <a href="mailto:docs@example.com">Mail</a>
            <a href="/guide">Guide</a>
        </nav>
        <main><h1>Home</h1></main>"#
    );
    mount_page(&server, "/", &body, 1).await;
    mount_page(&server, "/guide", "<main><h1>Guide</h1></main>", 1).await;

    for excluded in [
        "/guide.pdf",
        "/api/reference",
        "/LOGIN",
        "/theme.css",
        "/section",
        "/files/bundle",
        "/outside",
    ] {
        mount_page(&server, excluded, "<main>excluded</main>", 0).await;
    }

    let pages = crawl(&base, 20, &test_config()).await.unwrap();
    assert_eq!(paths(&pages, &base), vec!["", "/guide"]);
}

#[tokio::test]
async fn test_failures_skipped_without_using_budget() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<main><a href="/missing">Missing</a><a href="/broken">Broken</a><a href="/logo">Logo</a><a href="/good">Good</a></main>"#,
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/logo"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/png")
                .set_body_bytes(vec![0x89, 0x50, 0x4e, 0x47]),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "/good", "<main><h1>Good</h1></main>", 1).await;

    let pages = crawl(&base, 2, &test_config()).await.unwrap();
    assert_eq!(paths(&pages, &base), vec!["", "/good"]);
}

#[tokio::test]
async fn test_unreachable_seed_yields_nothing() {
    let pages = crawl("http://127.0.0.1:1", 5, &test_config()).await.unwrap();
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_seed_error_status_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let pages = crawl(&server.uri(), 5, &test_config()).await.unwrap();
    assert!(pages.is_empty());
}

#[tokio::test]
async fn test_malformed_seed_rejected() {
    assert!(crawl("definitely not a url", 5, &test_config()).await.is_err());
}

#[tokio::test]
async fn test_page_content_extraction() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<header><h1>Site Banner</h1></header>
           <nav><h2>Menu</h2><a href="/x">Sidebar link</a></nav>
           <main>
             <h1>Getting Started</h1>
             <p>Install   the
                tool.</p>
             <h2>Configuration</h2>
             <script>var hidden = 1;</script>
             <h4>Too deep</h4>
           </main>
           <footer>Copyright</footer>"#,
        1,
    )
    .await;
    mount_page(&server, "/x", "<main>linked from nav</main>", 0).await;

    let pages = crawl(&base, 1, &test_config()).await.unwrap();
    let page = &pages[0];

    assert_eq!(page.url, base);
    assert_eq!(page.title, "Getting Started");
    assert_eq!(page.headings, vec!["Getting Started", "Configuration"]);
    assert!(page.content.contains("Install the tool."));
    assert!(!page.content.contains("Site Banner"));
    assert!(!page.content.contains("Sidebar link"));
    assert!(!page.content.contains("hidden"));
    assert!(!page.content.contains("Copyright"));
}

#[tokio::test]
async fn test_content_is_capped() {
    let server = MockServer::start().await;
    let base = server.uri();

    let long_text = "word ".repeat(5_000);
    mount_page(&server, "/", &format!("<main><p>{long_text}</p></main>"), 1).await;

    let config = CrawlerConfig {
        content_max_chars: 100,
        ..test_config()
    };
    let pages = crawl(&base, 1, &config).await.unwrap();
    assert_eq!(pages[0].content.chars().count(), 100);
}
