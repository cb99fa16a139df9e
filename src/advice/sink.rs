//! Observation sinks.

use std::sync::Mutex;

use tracing::{error, info};

use crate::interfaces::{Observation, ObservationSink, Stream};

/// Writes info lines to standard output and error lines to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl ObservationSink for ConsoleSink {
    fn info(&self, line: &str) {
        println!("{}", line);
    }

    fn error(&self, line: &str) {
        eprintln!("{}", line);
    }
}

/// Forwards observations to `tracing` under target `interpose::advice`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ObservationSink for TracingSink {
    fn info(&self, line: &str) {
        info!(target: "interpose::advice", "{}", line);
    }

    fn error(&self, line: &str) {
        error!(target: "interpose::advice", "{}", line);
    }
}

/// Records observations in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<Observation>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every observation so far, in write order.
    pub fn observations(&self) -> Vec<Observation> {
        self.lock().clone()
    }

    /// Lines written to the info stream.
    pub fn info_lines(&self) -> Vec<String> {
        self.lines_for(Stream::Info)
    }

    /// Lines written to the error stream.
    pub fn error_lines(&self) -> Vec<String> {
        self.lines_for(Stream::Error)
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lines_for(&self, stream: Stream) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|o| o.stream == stream)
            .map(|o| o.line.clone())
            .collect()
    }

    fn push(&self, stream: Stream, line: &str) {
        self.lock().push(Observation {
            stream,
            line: line.to_string(),
        });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Observation>> {
        // A panicking writer cannot leave a half-pushed line behind.
        self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ObservationSink for MemorySink {
    fn info(&self, line: &str) {
        self.push(Stream::Info, line);
    }

    fn error(&self, line: &str) {
        self.push(Stream::Error, line);
    }
}
