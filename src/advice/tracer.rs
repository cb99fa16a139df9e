//! Tracing advice.
//!
//! Wraps every call in a `tracing` span and records duration and outcome,
//! without writing to the observation sinks.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, debug_span, Instrument};

use crate::interfaces::{
    Args, AsyncOriginal, CallResult, MethodKind, Receiver, SourceName, SyncOriginal, Wrapper,
};

/// Wrapper that opens an `interpose.call` span per call.
///
/// Span fields: `label`, `kind`. On completion a `debug` event carries
/// `elapsed_ms` and `ok`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CallTracer;

impl CallTracer {
    pub fn new() -> Self {
        Self
    }
}

fn completed(label: &SourceName, start: Instant, result: &CallResult) {
    debug!(
        label = %label,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        ok = result.is_ok(),
        "call completed"
    );
}

#[async_trait]
impl Wrapper for CallTracer {
    fn name(&self) -> &str {
        "call-tracer"
    }

    fn run_sync(
        &self,
        original: &SyncOriginal<'_>,
        label: &SourceName,
        receiver: &Receiver,
        args: Args,
    ) -> CallResult {
        let span = debug_span!("interpose.call", label = %label, kind = %MethodKind::Sync);
        let _guard = span.enter();

        let start = Instant::now();
        let result = original(receiver, args);
        completed(label, start, &result);
        result
    }

    async fn run_async(
        &self,
        original: &AsyncOriginal<'_>,
        label: &SourceName,
        receiver: Arc<Receiver>,
        args: Args,
    ) -> CallResult {
        let span = debug_span!("interpose.call", label = %label, kind = %MethodKind::Async);

        async move {
            let start = Instant::now();
            let result = original(receiver, args).await;
            completed(label, start, &result);
            result
        }
        .instrument(span)
        .await
    }
}
