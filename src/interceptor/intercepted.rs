//! Instrumented instances.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::task::Poll;

use futures::future::{self, BoxFuture};
use tracing::trace;

use super::dispatch::{advance, dispatch_async, dispatch_sync, erase_async, erase_sync, Chain};
use super::table::{AsyncFn, Method, SyncFn};
use super::Interceptable;
use crate::interfaces::{Args, CallResult, InterceptError, MethodKind, Receiver, SourceName};

/// The instrumented replacement for one method of one instance.
pub(crate) struct StandIn<T> {
    pub(crate) label: SourceName,
    pub(crate) method: Method<T>,
}

/// Result of invoking a stand-in.
///
/// Synchronous methods complete (or fail) before `invoke` returns.
/// Asynchronous ones have already entered every wrapper and started the
/// method; the eventual value finishes the chain when awaited.
pub enum Outcome {
    Ready(CallResult),
    Eventual(BoxFuture<'static, CallResult>),
}

impl Outcome {
    /// Resolve to the call's result, awaiting if eventual.
    pub async fn settle(self) -> CallResult {
        match self {
            Outcome::Ready(result) => result,
            Outcome::Eventual(fut) => fut.await,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }
}

impl fmt::Debug for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Outcome::Eventual(_) => f.write_str("Eventual(..)"),
        }
    }
}

/// An instance whose registered methods run through a wrapper chain.
///
/// Data fields stay reachable through `Deref` and are never wrapped.
pub struct Intercepted<T> {
    inner: Arc<T>,
    chain: Chain,
    stand_ins: HashMap<String, StandIn<T>>,
    fields: HashSet<String>,
    order: Vec<String>,
}

impl<T: Interceptable> Intercepted<T> {
    pub(crate) fn new(
        inner: Arc<T>,
        chain: Chain,
        stand_ins: HashMap<String, StandIn<T>>,
        fields: HashSet<String>,
        order: Vec<String>,
    ) -> Self {
        Self {
            inner,
            chain,
            stand_ins,
            fields,
            order,
        }
    }

    /// Invoke a member by name.
    ///
    /// Sync stand-ins run to completion here and return
    /// [`Outcome::Ready`]; errors are never deferred into a future.
    /// Async stand-ins run up to their first suspension here, so
    /// pre-call observations and the start of the method happen before
    /// [`Outcome::Eventual`] is returned. Call from within a Tokio runtime.
    pub fn invoke(&self, name: &str, args: Args) -> Outcome {
        let stand_in = match self.stand_in(name) {
            Ok(stand_in) => stand_in,
            Err(e) => return Outcome::Ready(Err(e.into())),
        };
        match &stand_in.method {
            Method::Sync(method) => Outcome::Ready(self.run_sync(stand_in, method, args)),
            Method::Async(method) => {
                let mut eventual = self.run_async(stand_in, method, args);
                match advance(&mut eventual) {
                    Poll::Pending => Outcome::Eventual(eventual),
                    Poll::Ready(result) => Outcome::Eventual(Box::pin(future::ready(result))),
                }
            }
        }
    }

    /// Call a synchronous member.
    pub fn call(&self, name: &str, args: Args) -> CallResult {
        let stand_in = self.stand_in(name)?;
        match &stand_in.method {
            Method::Sync(method) => self.run_sync(stand_in, method, args),
            Method::Async(_) => Err(InterceptError::NotSynchronous {
                label: stand_in.label.to_string(),
            }
            .into()),
        }
    }

    /// Call any member and await its result.
    ///
    /// Sync members run on the first poll and their result is returned
    /// as-is.
    pub async fn call_async(&self, name: &str, args: Args) -> CallResult {
        self.invoke(name, args).settle().await
    }

    /// Names of intercepted methods: own members first, then prototype.
    pub fn method_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn is_intercepted(&self, name: &str) -> bool {
        self.stand_ins.contains_key(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<MethodKind> {
        self.stand_ins.get(name).map(|s| s.method.kind())
    }

    pub fn label_of(&self, name: &str) -> Option<&SourceName> {
        self.stand_ins.get(name).map(|s| &s.label)
    }

    /// Declared data members (never wrapped).
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    pub fn class_name(&self) -> &'static str {
        T::CLASS_NAME
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Shared handle to the underlying instance.
    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.inner)
    }

    /// Drop the stand-ins and return the instance. Eventual values still
    /// pending keep their own handle.
    pub fn into_inner(self) -> Arc<T> {
        self.inner
    }

    fn run_sync(&self, stand_in: &StandIn<T>, method: &Arc<SyncFn<T>>, args: Args) -> CallResult {
        trace!(label = %stand_in.label, kind = %MethodKind::Sync, "Dispatching");
        let original = erase_sync(&**method, &stand_in.label);
        let receiver: &Receiver = &*self.inner;
        dispatch_sync(&self.chain, &original, &stand_in.label, receiver, args)
    }

    fn run_async(
        &self,
        stand_in: &StandIn<T>,
        method: &Arc<AsyncFn<T>>,
        args: Args,
    ) -> BoxFuture<'static, CallResult> {
        trace!(label = %stand_in.label, kind = %MethodKind::Async, "Dispatching");
        let method = Arc::clone(method);
        let label = stand_in.label.clone();
        let chain = Arc::clone(&self.chain);
        let receiver: Arc<Receiver> = self.inner.clone();
        Box::pin(async move {
            let original = erase_async(&*method, &label);
            dispatch_async(&chain, &original, &label, receiver, args).await
        })
    }

    fn stand_in(&self, name: &str) -> Result<&StandIn<T>, InterceptError> {
        if let Some(stand_in) = self.stand_ins.get(name) {
            return Ok(stand_in);
        }
        if self.fields.contains(name) {
            return Err(InterceptError::NotCallable {
                label: SourceName::new(T::CLASS_NAME, name).to_string(),
            });
        }
        Err(InterceptError::UnknownMember {
            class: T::CLASS_NAME.to_string(),
            member: name.to_string(),
        })
    }
}

impl<T> Deref for Intercepted<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Intercepted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intercepted")
            .field("inner", &self.inner)
            .field("methods", &self.order)
            .field("wrappers", &self.chain.iter().map(|w| w.name()).collect::<Vec<_>>())
            .finish()
    }
}
