//! Advice configuration.
//!
//! Selects where the standard wrappers write and how they render values.

use std::sync::Arc;

use serde::Deserialize;

use crate::advice::{ConsoleSink, ErrorReporter, Logger, RenderPolicy, TracingSink};
use crate::interfaces::ObservationSink;

/// Observation destination for the standard wrappers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard output and standard error.
    #[default]
    Console,
    /// `tracing` events under the `interpose::advice` target.
    Tracing,
}

/// Standard wrapper settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AdviceConfig {
    /// Where `Logger` and `ErrorReporter` write.
    pub sink: SinkKind,

    /// Rendering used by `Logger`.
    pub render: RenderPolicy,

    /// Add a `CallTracer` outside the other wrappers.
    ///
    /// Default: false.
    pub trace_calls: bool,
}

impl AdviceConfig {
    pub fn sink(&self) -> Arc<dyn ObservationSink> {
        match self.sink {
            SinkKind::Console => Arc::new(ConsoleSink),
            SinkKind::Tracing => Arc::new(TracingSink),
        }
    }

    pub fn logger(&self) -> Logger {
        Logger::new(self.sink()).with_policy(self.render)
    }

    pub fn error_reporter(&self) -> ErrorReporter {
        ErrorReporter::new(self.sink())
    }
}
