//! Wrapper chain dispatch.
//!
//! For a chain `[w0, w1, .., wn]`, `w0` runs the call with an original
//! that dispatches to `w1`, and so on; `wn` receives the method itself.
//! The first wrapper therefore observes first on the way in and last on
//! the way out.
//!
//! Async calls start eagerly: the chain is driven to its first real
//! suspension before the caller gets the eventual value back, and an
//! original that finishes on its first poll still settles no earlier than
//! the next suspension of whoever awaits it.

use std::any::Any;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{self, BoxFuture};
use futures::task::noop_waker_ref;
use futures::FutureExt;

use super::table::{AsyncFn, SyncFn};
use crate::interfaces::{
    Args, AsyncOriginal, CallError, CallResult, InterceptError, Receiver, SourceName,
    SyncOriginal, Wrapper,
};

/// Ordered wrappers, outermost first.
pub type Chain = Arc<[Arc<dyn Wrapper>]>;

pub(crate) fn dispatch_sync(
    chain: &[Arc<dyn Wrapper>],
    original: &SyncOriginal<'_>,
    label: &SourceName,
    receiver: &Receiver,
    args: Args,
) -> CallResult {
    match chain.split_first() {
        None => original(receiver, args),
        Some((outer, rest)) => {
            let next = |receiver: &Receiver, args: Args| {
                dispatch_sync(rest, original, label, receiver, args)
            };
            outer.run_sync(&next, label, receiver, args)
        }
    }
}

pub(crate) fn dispatch_async<'a, 'o: 'a>(
    chain: &'a [Arc<dyn Wrapper>],
    original: &'a AsyncOriginal<'o>,
    label: &'a SourceName,
    receiver: Arc<Receiver>,
    args: Args,
) -> BoxFuture<'a, CallResult> {
    match chain.split_first() {
        None => original(receiver, args),
        Some((outer, rest)) => Box::pin(async move {
            let next = move |receiver: Arc<Receiver>, args: Args| -> BoxFuture<'a, CallResult> {
                dispatch_async(rest, original, label, receiver, args)
            };
            outer.run_async(&next, label, receiver, args).await
        }),
    }
}

/// Poll once without a waker to notify, running `fut` up to its first
/// suspension. A pending future is polled again by whoever awaits it.
pub(crate) fn advance(fut: &mut BoxFuture<'_, CallResult>) -> Poll<CallResult> {
    fut.poll_unpin(&mut Context::from_waker(noop_waker_ref()))
}

/// Start an async body now, the way a direct call would.
fn start<'a>(mut body: BoxFuture<'a, CallResult>) -> BoxFuture<'a, CallResult> {
    match advance(&mut body) {
        Poll::Pending => body,
        Poll::Ready(result) => Box::pin(async move {
            tokio::task::yield_now().await;
            result
        }),
    }
}

fn mismatch<T: Any>(label: &SourceName) -> CallError {
    InterceptError::ReceiverMismatch {
        label: label.to_string(),
        class: std::any::type_name::<T>().to_string(),
    }
    .into()
}

/// Adapt a typed sync body to the erased original handed to wrappers.
pub(crate) fn erase_sync<'a, T: Any + Send + Sync>(
    method: &'a SyncFn<T>,
    label: &'a SourceName,
) -> impl Fn(&Receiver, Args) -> CallResult + Send + Sync + 'a {
    move |receiver: &Receiver, args: Args| -> CallResult {
        match receiver.downcast_ref::<T>() {
            Some(this) => method(this, args),
            None => Err(mismatch::<T>(label)),
        }
    }
}

/// Adapt a typed async body to the erased original handed to wrappers.
pub(crate) fn erase_async<'a, T: Any + Send + Sync>(
    method: &'a AsyncFn<T>,
    label: &'a SourceName,
) -> impl Fn(Arc<Receiver>, Args) -> BoxFuture<'a, CallResult> + Send + Sync + 'a {
    move |receiver: Arc<Receiver>, args: Args| -> BoxFuture<'a, CallResult> {
        match receiver.downcast::<T>() {
            Ok(this) => start(method(this, args)),
            Err(_) => {
                let result: CallResult = Err(mismatch::<T>(label));
                Box::pin(future::ready(result))
            }
        }
    }
}
