//! Best-effort structured logging
//!
//! Entities report configuration problems through [`Diagnostics`]; nothing here
//! can fail in a way gameplay code has to handle.

use std::collections::HashMap;
use tracing::span::EnteredSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Returns false if a
/// subscriber was already installed, which is not an error.
pub fn init_logging(default_filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

/// Opaque handle to a span opened with [`Diagnostics::enter_span`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpanHandle(u64);

/// Logger facade handed to each entity
#[derive(Default)]
pub struct Diagnostics {
    next_span: u64,
    open_spans: HashMap<u64, EnteredSpan>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: &str) {
        tracing::info!(target: "warden", "{}", message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!(target: "warden", "{}", message);
    }

    /// Open and enter a span tagged with where it was opened and its arguments
    pub fn enter_span(&mut self, location: &str, args: &str) -> SpanHandle {
        let entered = tracing::info_span!(
            target: "warden",
            "span",
            location = %location,
            args = %args
        )
        .entered();

        let id = self.next_span;
        self.next_span += 1;
        self.open_spans.insert(id, entered);
        SpanHandle(id)
    }

    /// Exit and close a span. Unknown or already closed handles are ignored.
    pub fn exit_span(&mut self, handle: SpanHandle) -> bool {
        match self.open_spans.remove(&handle.0) {
            Some(entered) => {
                drop(entered);
                true
            }
            None => {
                tracing::warn!(target: "warden", span = handle.0, "Failed to close span");
                false
            }
        }
    }

    /// Number of spans entered and not yet exited
    pub fn open_span_count(&self) -> usize {
        self.open_spans.len()
    }
}
