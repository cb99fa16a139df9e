//! Observation output channel.

/// Which stream an observation line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    /// Informational lines (`Calling ...`, `Result of ...`).
    Info,
    /// Failure lines (`Error in ...`).
    Error,
}

/// One line written by a wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub stream: Stream,
    pub line: String,
}

/// Destination for wrapper observations.
///
/// Implementations:
/// - `ConsoleSink`: standard output / standard error
/// - `TracingSink`: `tracing` events
/// - `MemorySink`: in-memory record, for tests and embedding
pub trait ObservationSink: Send + Sync {
    /// Write an informational line.
    fn info(&self, line: &str);

    /// Write a failure line.
    fn error(&self, line: &str);
}
