//! Wrapper contract: the two-operation interface every cross-cutting
//! strategy implements.

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use super::args::Args;
use super::error::CallResult;
use super::source::SourceName;

/// Type-erased call receiver (the instance a method is invoked on).
pub type Receiver = dyn Any + Send + Sync;

/// A synchronous original, already bound to its method body.
pub type SyncOriginal<'a> = dyn Fn(&Receiver, Args) -> CallResult + Send + Sync + 'a;

/// An asynchronous original. The receiver is shared ownership because the
/// eventual value can outlive the calling frame.
pub type AsyncOriginal<'a> =
    dyn Fn(Arc<Receiver>, Args) -> BoxFuture<'a, CallResult> + Send + Sync + 'a;

/// Cross-cutting strategy applied around every intercepted call.
///
/// Implementations must invoke `original` with the receiver and arguments
/// they were given, unchanged. Side effects are limited to observation:
/// the value returned by `original` is passed back as-is, and an error
/// from `original` is propagated as the same `CallError` value.
///
/// Wrappers hold no per-call state and are shared as `Arc<dyn Wrapper>`
/// across any number of decorated types and instances.
#[async_trait]
pub trait Wrapper: Send + Sync {
    /// Short identifier for diagnostics.
    fn name(&self) -> &str;

    /// Run a synchronous original. Errors surface synchronously.
    fn run_sync(
        &self,
        original: &SyncOriginal<'_>,
        label: &SourceName,
        receiver: &Receiver,
        args: Args,
    ) -> CallResult;

    /// Run an asynchronous original, awaiting it before returning.
    async fn run_async(
        &self,
        original: &AsyncOriginal<'_>,
        label: &SourceName,
        receiver: Arc<Receiver>,
        args: Args,
    ) -> CallResult;
}
