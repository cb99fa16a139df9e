//! Call logging advice.

use std::sync::Arc;

use async_trait::async_trait;

use super::render::RenderPolicy;
use super::sink::ConsoleSink;
use crate::interfaces::{
    Args, AsyncOriginal, CallResult, ObservationSink, Receiver, SourceName, SyncOriginal, Wrapper,
};

/// Wrapper that logs each call and its successful result.
///
/// Emits on the info stream:
/// - `Calling <label> with args: [..]` before the original runs
/// - `Result of <label>: ..` after it returns
///
/// Nothing is written when the original fails; the error passes through.
///
/// # Example
///
/// ```ignore
/// let logger = Logger::console().with_policy(RenderPolicy::Json);
/// ```
pub struct Logger {
    sink: Arc<dyn ObservationSink>,
    policy: RenderPolicy,
}

impl Logger {
    /// Log to the given sink with the default `Structured` rendering.
    pub fn new(sink: Arc<dyn ObservationSink>) -> Self {
        Self {
            sink,
            policy: RenderPolicy::default(),
        }
    }

    /// Log to standard output.
    pub fn console() -> Self {
        Self::new(Arc::new(ConsoleSink))
    }

    pub fn with_policy(mut self, policy: RenderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    fn before(&self, label: &SourceName, args: &Args) {
        self.sink.info(&format!(
            "Calling {} with args: {}",
            label,
            self.policy.args(args)
        ));
    }

    fn after(&self, label: &SourceName, result: &serde_json::Value) {
        self.sink
            .info(&format!("Result of {}: {}", label, self.policy.result(result)));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::console()
    }
}

#[async_trait]
impl Wrapper for Logger {
    fn name(&self) -> &str {
        "logger"
    }

    fn run_sync(
        &self,
        original: &SyncOriginal<'_>,
        label: &SourceName,
        receiver: &Receiver,
        args: Args,
    ) -> CallResult {
        self.before(label, &args);
        let result = original(receiver, args)?;
        self.after(label, &result);
        Ok(result)
    }

    async fn run_async(
        &self,
        original: &AsyncOriginal<'_>,
        label: &SourceName,
        receiver: Arc<Receiver>,
        args: Args,
    ) -> CallResult {
        self.before(label, &args);
        let result = original(receiver, args).await?;
        self.after(label, &result);
        Ok(result)
    }
}
