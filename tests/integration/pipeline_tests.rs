//! Integration tests for the generation pipeline and the HTTP service
//!
//! Two wiremock servers stand in for the outside world: one serves a small
//! documentation site, the other plays the Messages API.

use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tutorial_forge::config::Config;
use tutorial_forge::pipeline::{
    ChannelSink, EventKind, GenerateRequest, LogSink, Pipeline, PipelineError, ProgressEvent,
    Stage,
};
use tutorial_forge::server::build_router;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const IDEAS: &str = r#"Here you go:
[
  {
    "title": "Your First Widget",
    "summary": "Build and render a widget.",
    "difficulty": "Beginner",
    "estimatedTime": "2 hours",
    "prerequisites": ["Node.js", "A text editor"],
    "learningObjectives": ["Create a widget", "Render it"],
    "outline": [
      {"title": "Setup", "description": "Install", "topics": ["npm", "init"]},
      {"title": "Widget", "description": "Create", "topics": ["props", "state"]},
      {"title": "Render", "description": "Show it", "topics": ["mount", "update"]},
      {"title": "Style", "description": "Make it pretty", "topics": ["css", "themes"]},
      {"title": "Ship", "description": "Deploy", "topics": ["build", "host"]}
    ],
    "resources": ["https://docs.example.com/widgets"]
  },
  {
    "title": "Advanced Widget Plugins",
    "summary": "Extend widgets with plugins.",
    "difficulty": "Advanced",
    "estimatedTime": "6 hours",
    "prerequisites": [],
    "learningObjectives": [],
    "outline": [],
    "resources": []
  }
]"#;

/// Serves three linked documentation pages
async fn docs_site() -> MockServer {
    let server = MockServer::start().await;

    let pages = [
        (
            "/",
            r#"<main><h1>Widgets</h1><p>Widgets are the core unit.</p>
               <a href="/install">Install</a><a href="/plugins">Plugins</a></main>"#,
        ),
        (
            "/install",
            "<main><h1>Install</h1><p>Run npm install widgets.</p></main>",
        ),
        (
            "/plugins",
            "<main><h1>Plugins</h1><h2>Hooks</h2><p>Plugins hook into rendering.</p></main>",
        ),
    ];

    for (page_path, body) in pages {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(format!("<html><body>{body}</body></html>")),
            )
            .mount(&server)
            .await;
    }

    server
}

/// Answers every Messages API call with `reply_text`
async fn messages_api(reply_text: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": reply_text}]
        })))
        .mount(&server)
        .await;
    server
}

fn test_config(api: &MockServer) -> Config {
    let mut config = Config::default();
    config.crawler.request_delay_ms = 0;
    config.crawler.request_timeout_secs = 5;
    config.analyzer.batch_delay_ms = 0;
    config.analyzer.api_base_url = api.uri();
    config
}

fn pipeline(api: &MockServer) -> Pipeline {
    Pipeline::new(test_config(api), Some("test-key".to_string())).unwrap()
}

fn drain(mut rx: mpsc::UnboundedReceiver<ProgressEvent>) -> Vec<ProgressEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Starts the HTTP service on an ephemeral port and returns its base URL
async fn spawn_server(pipeline: Pipeline) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, build_router(pipeline)).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Parses the `data:` frames of an SSE body
fn sse_events(body: &str) -> Vec<Value> {
    body.lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| serde_json::from_str(data.trim()).unwrap())
        .collect()
}

#[tokio::test]
async fn test_buffered_generation() {
    let site = docs_site().await;
    let api = messages_api(IDEAS).await;

    let result = pipeline(&api)
        .run(GenerateRequest::new(site.uri(), None), Arc::new(LogSink))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.stats.pages_crawled, 3);
    assert_eq!(result.stats.tutorials_generated, 2);
    // 250 (Beginner, 5 sections, 2 prerequisites) + 300 (Advanced, defaults)
    assert_eq!(result.stats.total_estimated_cost, 550);

    assert_eq!(result.files[0].filename, "tutorial-1-your-first-widget.md");
    assert_eq!(result.files[1].filename, "tutorial-2-advanced-widget-plugins.md");
    assert!(result.files[0].content.contains("- TODO: props"));
    assert_eq!(result.files[0].tutorial.estimated_cost, 250);

    let csv_lines: Vec<_> = result.csv.split('\n').collect();
    assert_eq!(csv_lines.len(), 3);
    assert!(csv_lines[1].starts_with("1,Your First Widget,Beginner,2 hours,250,"));
}

#[tokio::test]
async fn test_prompt_reaches_service() {
    let site = docs_site().await;
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"type": "text", "text": IDEAS}]
        })))
        .expect(1)
        .mount(&api)
        .await;

    pipeline(&api)
        .run(GenerateRequest::new(site.uri(), Some(3)), Arc::new(LogSink))
        .await
        .unwrap();

    let requests = api.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let prompt = body["messages"][0]["content"].as_str().unwrap();

    assert_eq!(body["model"], "claude-sonnet-4-20250514");
    assert!(prompt.contains(&format!("URL: {}/install", site.uri())));
    assert!(prompt.contains("Headings: Plugins, Hooks"));
}

#[tokio::test]
async fn test_streaming_progress() {
    let site = docs_site().await;
    let api = messages_api(IDEAS).await;

    let (tx, rx) = mpsc::unbounded_channel();
    pipeline(&api)
        .run(
            GenerateRequest::new(site.uri(), None),
            Arc::new(ChannelSink::new(tx)),
        )
        .await
        .unwrap();

    let events = drain(rx);
    assert!(events.len() >= 5);

    for pair in events.windows(2) {
        assert!(pair[0].progress <= pair[1].progress);
    }

    let (last, rest) = events.split_last().unwrap();
    assert_eq!(last.kind, EventKind::Complete);
    assert_eq!(last.step, Stage::Complete);
    assert_eq!(last.progress, 100);
    assert_eq!(last.data.as_ref().unwrap().stats.tutorials_generated, 2);
    assert!(rest.iter().all(|e| e.progress < 100 && e.kind == EventKind::Progress));

    let steps: Vec<_> = rest.iter().map(|e| e.step).collect();
    assert_eq!(steps.first(), Some(&Stage::Crawling));
    assert!(steps.contains(&Stage::Analyzing));
    assert_eq!(steps.last(), Some(&Stage::Generating));

    assert_eq!(rest[0].progress, 5);
    assert!(rest[0].eta.is_some());
    let first_batch = rest.iter().find(|e| e.step == Stage::Analyzing).unwrap();
    assert_eq!(first_batch.progress, 30);
    assert_eq!(first_batch.eta.as_deref(), Some("~20 seconds"));
}

#[tokio::test]
async fn test_unreachable_seed_reports_no_pages() {
    let api = messages_api(IDEAS).await;

    let (tx, rx) = mpsc::unbounded_channel();
    let err = pipeline(&api)
        .run(
            GenerateRequest::new("http://127.0.0.1:1", None),
            Arc::new(ChannelSink::new(tx)),
        )
        .await
        .unwrap_err();

    assert_eq!(err, PipelineError::NoPages);
    assert_eq!(err.status_code(), 400);

    let events = drain(rx);
    let last = events.last().unwrap();
    assert_eq!(last.kind, EventKind::Error);
    assert_eq!(
        last.message,
        "No pages could be crawled from the provided URL"
    );
    assert!(events.iter().all(|e| e.progress < 100));
}

#[tokio::test]
async fn test_failed_service_reports_no_tutorials() {
    let site = docs_site().await;
    let api = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&api)
        .await;

    let err = pipeline(&api)
        .run(GenerateRequest::new(site.uri(), None), Arc::new(LogSink))
        .await
        .unwrap_err();

    assert_eq!(err, PipelineError::NoTutorials);
    assert_eq!(err.status_code(), 400);
}

#[tokio::test]
async fn test_http_health() {
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;

    let response = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_http_validation_errors() {
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;
    let client = reqwest::Client::new();
    let endpoint = format!("{base}/api/generate");

    let response = client.post(&endpoint).json(&json!({})).send().await.unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "URL is required"}));

    let response = client
        .post(&endpoint)
        .json(&json!({"url": "not a url"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid URL format");

    let response = client
        .post(&endpoint)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn test_http_missing_credential() {
    let api = messages_api(IDEAS).await;
    let no_key = Pipeline::new(test_config(&api), None).unwrap();
    let base = spawn_server(no_key).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generate"))
        .json(&json!({"url": "https://docs.example.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "API key not configured");
}

#[tokio::test]
async fn test_http_buffered_success() {
    let site = docs_site().await;
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generate"))
        .json(&json!({"url": site.uri(), "maxPages": 2}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["stats"]["pagesCrawled"], 2);
    assert_eq!(body["stats"]["tutorialsGenerated"], 2);
    assert_eq!(body["files"].as_array().unwrap().len(), 2);
    assert!(body["csv"].as_str().unwrap().starts_with("Number,Title"));
}

#[tokio::test]
async fn test_http_buffered_no_pages() {
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generate"))
        .json(&json!({"url": "http://127.0.0.1:1"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "No pages could be crawled from the provided URL"
    );
}

#[tokio::test]
async fn test_http_stream() {
    let site = docs_site().await;
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generate/stream"))
        .json(&json!({"url": site.uri()}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/event-stream"));

    let events = sse_events(&response.text().await.unwrap());
    let progress: Vec<u64> = events
        .iter()
        .map(|e| e["progress"].as_u64().unwrap())
        .collect();
    assert!(progress.windows(2).all(|w| w[0] <= w[1]));

    let last = events.last().unwrap();
    assert_eq!(last["type"], "complete");
    assert_eq!(last["step"], "complete");
    assert_eq!(last["progress"], 100);
    assert_eq!(last["data"]["stats"]["pagesCrawled"], 3);
    assert!(events[..events.len() - 1]
        .iter()
        .all(|e| e["type"] == "progress" && e.get("data").is_none()));
}

#[tokio::test]
async fn test_http_stream_validation_error_is_single_event() {
    let api = messages_api(IDEAS).await;
    let base = spawn_server(pipeline(&api)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/generate/stream"))
        .json(&json!({"maxPages": 5}))
        .send()
        .await
        .unwrap();

    let events = sse_events(&response.text().await.unwrap());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "error");
    assert_eq!(events[0]["step"], "error");
    assert_eq!(events[0]["message"], "URL is required");
}
