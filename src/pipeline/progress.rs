//! Progress events, the monotonic tracker, and ETA heuristics
//!
//! # Schedule
//!
//! | Point                         | Progress                         |
//! |-------------------------------|----------------------------------|
//! | crawl starts                  | 5                                |
//! | crawl done                    | 10                               |
//! | analysis batch starts         | 30 + 55 * pages_before / pages   |
//! | analysis done                 | 85                               |
//! | generating                    | 90                               |
//! | complete                      | 100                              |
//!
//! Every non-terminal value is clamped to 99 and progress never decreases
//! within a run, so 100 is only ever seen on the `complete` event.

use crate::config::ProgressConfig;
use crate::pipeline::result::GenerationResult;
use crate::pipeline::sink::ProgressSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

pub const CRAWL_START: u8 = 5;
pub const CRAWL_DONE: u8 = 10;
pub const ANALYSIS_START: u8 = 30;
pub const ANALYSIS_SPAN: u8 = 55;
pub const ANALYSIS_DONE: u8 = 85;
pub const GENERATING: u8 = 90;
pub const COMPLETE: u8 = 100;

const NON_TERMINAL_CEILING: u8 = 99;

/// Pipeline stage reported in `step`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Crawling,
    Analyzing,
    Generating,
    Complete,
    Error,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Crawling => "crawling",
            Self::Analyzing => "analyzing",
            Self::Generating => "generating",
            Self::Complete => "complete",
            Self::Error => "error",
        };
        f.write_str(s)
    }
}

/// Event kind reported in `type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Progress,
    Complete,
    Error,
}

/// One observable transition of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub step: Stage,
    pub message: String,
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GenerationResult>,
}

impl ProgressEvent {
    /// Returns true for `complete` and `error` events
    pub fn is_terminal(&self) -> bool {
        !matches!(self.kind, EventKind::Progress)
    }
}

/// Keeps reported progress monotonic within one run
#[derive(Debug, Default, Clone)]
pub struct ProgressTracker {
    last: u8,
    finished: bool,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a requested value for a non-terminal event
    pub fn advance(&mut self, requested: u8) -> u8 {
        self.last = self.last.max(requested.min(NON_TERMINAL_CEILING));
        self.last
    }

    /// Marks the run complete
    pub fn complete(&mut self) -> u8 {
        self.last = COMPLETE;
        self.finished = true;
        self.last
    }

    /// Marks the run failed; progress stays where it was
    pub fn fail(&mut self) -> u8 {
        self.finished = true;
        self.last
    }

    /// Last reported value
    pub fn current(&self) -> u8 {
        self.last
    }

    /// True once a terminal event has been reported
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Progress at the start of an analysis batch
pub fn analysis_progress(pages_before: usize, total_pages: usize) -> u8 {
    if total_pages == 0 {
        return ANALYSIS_START;
    }
    let offset = (usize::from(ANALYSIS_SPAN) * pages_before.min(total_pages)) / total_pages;
    ANALYSIS_START + offset as u8
}

/// Renders a duration as `~N seconds` or, from one minute up, `~N minutes`
pub fn format_eta(seconds: u64) -> String {
    if seconds < 60 {
        format!("~{} seconds", seconds)
    } else {
        format!("~{} minutes", seconds.div_ceil(60))
    }
}

/// Estimated time left in a stage, given units done out of total
///
/// Units are pages while crawling and batches while analyzing. Other stages
/// have no estimate.
pub fn estimate_eta(
    stage: Stage,
    done: usize,
    total: usize,
    config: &ProgressConfig,
) -> Option<String> {
    let remaining = total.saturating_sub(done) as u64;
    match stage {
        Stage::Crawling => Some(format_eta(remaining * config.seconds_per_page)),
        Stage::Analyzing => Some(format_eta(remaining * config.seconds_per_batch)),
        _ => None,
    }
}

/// Builds events for one run and forwards them to a sink
///
/// Shared between the task executing the pipeline and the boundary that
/// reports its terminal state.
pub struct Reporter {
    tracker: Mutex<ProgressTracker>,
    sink: Arc<dyn ProgressSink>,
}

impl Reporter {
    pub fn new(sink: Arc<dyn ProgressSink>) -> Self {
        Self {
            tracker: Mutex::new(ProgressTracker::new()),
            sink,
        }
    }

    /// Builds and emits an event under the tracker lock
    ///
    /// Nothing is emitted once a terminal event has gone out, so the terminal
    /// event is always the last one a sink sees.
    fn emit_with(&self, build: impl FnOnce(&mut ProgressTracker) -> ProgressEvent) {
        let mut tracker = match self.tracker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if tracker.is_finished() {
            return;
        }
        let event = build(&mut *tracker);
        self.sink.emit(event);
    }

    /// Emits a non-terminal event
    pub fn progress(
        &self,
        step: Stage,
        message: impl Into<String>,
        requested: u8,
        eta: Option<String>,
    ) {
        let message = message.into();
        self.emit_with(|tracker| ProgressEvent {
            kind: EventKind::Progress,
            step,
            message,
            progress: tracker.advance(requested),
            eta,
            data: None,
        });
    }

    /// Emits the `complete` event carrying the final payload
    pub fn complete(&self, result: &GenerationResult) {
        self.emit_with(|tracker| ProgressEvent {
            kind: EventKind::Complete,
            step: Stage::Complete,
            message: format!(
                "Generated {} tutorials from {} pages",
                result.stats.tutorials_generated, result.stats.pages_crawled
            ),
            progress: tracker.complete(),
            eta: None,
            data: Some(result.clone()),
        });
    }

    /// Emits the `error` event; progress stays where it was
    pub fn fail(&self, message: impl Into<String>) {
        let message = message.into();
        self.emit_with(|tracker| ProgressEvent {
            kind: EventKind::Error,
            step: Stage::Error,
            message,
            progress: tracker.fail(),
            eta: None,
            data: None,
        });
    }
}
