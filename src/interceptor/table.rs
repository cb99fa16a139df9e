//! Explicit member registration.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::trace;

use super::CONSTRUCTOR;
use crate::interfaces::{Args, CallResult, MethodKind};

/// Synchronous method body for receiver type `T`.
pub type SyncFn<T> = dyn Fn(&T, Args) -> CallResult + Send + Sync;

/// Asynchronous method body for receiver type `T`.
pub type AsyncFn<T> = dyn Fn(Arc<T>, Args) -> BoxFuture<'static, CallResult> + Send + Sync;

/// A registered method implementation, tagged with its kind.
pub enum Method<T> {
    Sync(Arc<SyncFn<T>>),
    Async(Arc<AsyncFn<T>>),
}

impl<T> Method<T> {
    pub fn kind(&self) -> MethodKind {
        match self {
            Method::Sync(_) => MethodKind::Sync,
            Method::Async(_) => MethodKind::Async,
        }
    }
}

impl<T> Clone for Method<T> {
    fn clone(&self) -> Self {
        match self {
            Method::Sync(f) => Method::Sync(Arc::clone(f)),
            Method::Async(f) => Method::Async(Arc::clone(f)),
        }
    }
}

/// A named member of a type: either callable or plain data.
pub enum Member<T> {
    Method(Method<T>),
    /// Data member. Part of the candidate set, never wrapped.
    Field,
}

impl<T> Clone for Member<T> {
    fn clone(&self) -> Self {
        match self {
            Member::Method(m) => Member::Method(m.clone()),
            Member::Field => Member::Field,
        }
    }
}

/// Ordered name -> member mapping for one type.
///
/// Registering a name twice replaces the earlier entry in place.
/// The name `constructor` is reserved and never registered.
pub struct MethodTable<T> {
    class: &'static str,
    members: Vec<(String, Member<T>)>,
}

impl<T: Send + Sync + 'static> MethodTable<T> {
    pub fn new(class: &'static str) -> Self {
        Self {
            class,
            members: Vec::new(),
        }
    }

    /// Register a synchronous method.
    pub fn sync_method<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&T, Args) -> CallResult + Send + Sync + 'static,
    {
        self.insert(name, Member::Method(Method::Sync(Arc::new(f))))
    }

    /// Register an asynchronous method.
    ///
    /// ```ignore
    /// table.async_method("greet", |this, args| {
    ///     Box::pin(async move { this.greet(arg(&args, 0)?).await })
    /// });
    /// ```
    pub fn async_method<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(Arc<T>, Args) -> BoxFuture<'static, CallResult> + Send + Sync + 'static,
    {
        self.insert(name, Member::Method(Method::Async(Arc::new(f))))
    }

    /// Declare a non-callable data member.
    pub fn field(&mut self, name: &str) -> &mut Self {
        self.insert(name, Member::Field)
    }

    fn insert(&mut self, name: &str, member: Member<T>) -> &mut Self {
        if name == CONSTRUCTOR {
            trace!(class = self.class, "Ignoring constructor registration");
            return self;
        }
        match self.members.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = member,
            None => self.members.push((name.to_string(), member)),
        }
        self
    }
}

impl<T> MethodTable<T> {
    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(n, _)| n.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&Member<T>> {
        self.members.iter().find(|(n, _)| n == name).map(|(_, m)| m)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Member<T>)> {
        self.members.iter().map(|(n, m)| (n.as_str(), m))
    }
}
