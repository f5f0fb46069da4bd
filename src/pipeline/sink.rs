//! Destinations for progress events

use crate::pipeline::progress::{EventKind, ProgressEvent};
use tokio::sync::mpsc::UnboundedSender;

/// Receives every event of a run, in order
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ProgressEvent);
}

/// Forwards events to a streaming consumer
///
/// Sends after the receiver is gone are dropped silently; the run itself
/// carries on to completion.
pub struct ChannelSink {
    tx: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<ProgressEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("Progress receiver closed, dropping event");
        }
    }
}

/// Writes events to the log; used by the buffered mode
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ProgressSink for LogSink {
    fn emit(&self, event: ProgressEvent) {
        match event.kind {
            EventKind::Error => {
                tracing::error!("[{}%] {}: {}", event.progress, event.step, event.message)
            }
            _ => match &event.eta {
                Some(eta) => tracing::info!(
                    "[{}%] {}: {} ({} left)",
                    event.progress,
                    event.step,
                    event.message,
                    eta
                ),
                None => tracing::info!("[{}%] {}: {}", event.progress, event.step, event.message),
            },
        }
    }
}
