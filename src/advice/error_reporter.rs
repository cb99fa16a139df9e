//! Error reporting advice.

use std::sync::Arc;

use async_trait::async_trait;

use super::sink::ConsoleSink;
use crate::interfaces::{
    Args, AsyncOriginal, CallError, CallResult, ObservationSink, Receiver, SourceName,
    SyncOriginal, Wrapper,
};

/// Wrapper that reports failures and rethrows them.
///
/// On error, writes `Error in <label>: <error>` to the error stream and
/// returns the same error value. Successful calls produce no output.
pub struct ErrorReporter {
    sink: Arc<dyn ObservationSink>,
}

impl ErrorReporter {
    pub fn new(sink: Arc<dyn ObservationSink>) -> Self {
        Self { sink }
    }

    /// Report to standard error.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }

    fn report(&self, label: &SourceName, error: &CallError) {
        self.sink.error(&format!("Error in {}: {}", label, error));
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::console()
    }
}

#[async_trait]
impl Wrapper for ErrorReporter {
    fn name(&self) -> &str {
        "error-reporter"
    }

    fn run_sync(
        &self,
        original: &SyncOriginal<'_>,
        label: &SourceName,
        receiver: &Receiver,
        args: Args,
    ) -> CallResult {
        original(receiver, args).inspect_err(|e| self.report(label, e))
    }

    async fn run_async(
        &self,
        original: &AsyncOriginal<'_>,
        label: &SourceName,
        receiver: Arc<Receiver>,
        args: Args,
    ) -> CallResult {
        original(receiver, args)
            .await
            .inspect_err(|e| self.report(label, e))
    }
}
