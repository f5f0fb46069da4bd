//! Request handlers

use crate::pipeline::{
    ChannelSink, ErrorBody, GenerateRequest, LogSink, PipelineError, ProgressEvent,
};
use crate::server::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures::stream::{self, Stream};
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn health() -> &'static str {
    "ok"
}

/// `POST /api/generate`: runs the pipeline and returns the whole result
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    match state.pipeline.run(request, Arc::new(LogSink)).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => pipeline_error(&e),
    }
}

/// `POST /api/generate/stream`: runs the pipeline and streams its events
///
/// Validation failures arrive as a single `error` event. The stream ends
/// after the terminal event; a client that disconnects early does not stop
/// the run.
pub async fn generate_stream(
    State(state): State<AppState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return malformed_body(rejection),
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let pipeline = state.pipeline.clone();
    tokio::spawn(async move {
        // The outcome already reached the client as the terminal event
        let _ = pipeline.run(request, Arc::new(ChannelSink::new(tx))).await;
    });

    Sse::new(event_stream(rx))
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn event_stream(
    rx: mpsc::UnboundedReceiver<ProgressEvent>,
) -> impl Stream<Item = Result<Event, axum::Error>> {
    stream::unfold((rx, false), |(mut rx, finished)| async move {
        if finished {
            return None;
        }
        let Some(event) = rx.recv().await else {
            return None;
        };
        let finished = event.is_terminal();
        Some((Event::default().json_data(&event), (rx, finished)))
    })
}

fn malformed_body(rejection: JsonRejection) -> Response {
    tracing::debug!("Rejected request body: {}", rejection.body_text());
    let body = ErrorBody {
        error: "Invalid request body".to_string(),
        details: Some(rejection.body_text()),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn pipeline_error(error: &PipelineError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.to_body())).into_response()
}
