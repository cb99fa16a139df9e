//! Test utilities: fixture types and a recording wrapper.
//!
//! Fixtures register every member shape the interceptor supports:
//! prototype sync/async methods, instance-bound closures, failing
//! methods, and plain data fields.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use serde_json::json;

use crate::interceptor::{Interceptable, MethodTable};
use crate::interfaces::{
    arg, to_value, Args, AsyncOriginal, CallError, CallResult, MethodError, Receiver, SourceName,
    SyncOriginal, Wrapper,
};

/// Small fixture: `add` (sync), `fail` (sync, throws), `greet` (async),
/// `version` (data field).
#[derive(Debug, Default)]
pub struct C {
    pub version: u32,
    hits: AtomicUsize,
    greeted: AtomicUsize,
}

impl C {
    pub fn new() -> Self {
        Self {
            version: 1,
            hits: AtomicUsize::new(0),
            greeted: AtomicUsize::new(0),
        }
    }

    /// Number of `add` calls that reached this instance.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Number of `greet` bodies that have started.
    pub fn greeted(&self) -> usize {
        self.greeted.load(Ordering::SeqCst)
    }
}

impl Interceptable for C {
    const CLASS_NAME: &'static str = "C";

    fn prototype(table: &mut MethodTable<Self>) {
        table
            .sync_method("add", |this, args| {
                this.hits.fetch_add(1, Ordering::SeqCst);
                let a: i64 = arg(&args, 0)?;
                let b: i64 = arg(&args, 1)?;
                to_value(a + b)
            })
            .sync_method("fail", |_, _| Err(MethodError::new("boom").into()))
            .async_method("greet", |this, args| {
                Box::pin(async move {
                    this.greeted.fetch_add(1, Ordering::SeqCst);
                    let name: String = arg(&args, 0)?;
                    to_value(format!("Hi, {}", name))
                })
            })
            .field("version");
    }
}

/// Mirror of the contract test class: prototype methods plus
/// instance-bound closures ("arrow" members) for each shape.
#[derive(Debug)]
pub struct TestClass {
    /// Captured by the instance-bound members at construction.
    pub scale: i64,
    pub label: String,
}

impl TestClass {
    pub fn new() -> Self {
        Self::with_scale(1)
    }

    pub fn with_scale(scale: i64) -> Self {
        Self {
            scale,
            label: "test".to_string(),
        }
    }
}

impl Default for TestClass {
    fn default() -> Self {
        Self::new()
    }
}

fn die(message: &str) -> CallError {
    MethodError::new(message).into()
}

fn rejected(message: &'static str) -> BoxFuture<'static, CallResult> {
    let result: CallResult = Err(die(message));
    Box::pin(future::ready(result))
}

impl Interceptable for TestClass {
    const CLASS_NAME: &'static str = "TestClass";

    fn prototype(table: &mut MethodTable<Self>) {
        table
            .async_method("asyncMethod", |_, args| {
                Box::pin(async move { to_value(arg::<i64>(&args, 0)? + arg::<i64>(&args, 1)?) })
            })
            .sync_method("syncMethod", |_, args| {
                to_value(arg::<i64>(&args, 0)? * arg::<i64>(&args, 1)?)
            })
            .async_method("asyncError", |_, _| rejected("Die async"))
            .sync_method("syncError", |_, _| Err(die("Die sync")))
            .field("label");
    }

    fn own_members(&self, table: &mut MethodTable<Self>) {
        let scale = self.scale;
        table
            .async_method("asyncMethodArrow", move |_, args| {
                Box::pin(async move {
                    to_value(scale * (arg::<i64>(&args, 0)? + arg::<i64>(&args, 1)?))
                })
            })
            .sync_method("syncMethodArrow", move |_, args| {
                to_value(scale * arg::<i64>(&args, 0)? * arg::<i64>(&args, 1)?)
            })
            .async_method("asyncErrorArrow", |_, _| rejected("Die async"))
            .sync_method("syncErrorArrow", |_, _| Err(die("Die sync")));
    }
}

/// Returns its first argument unchanged, for exercising value rendering.
#[derive(Debug, Default)]
pub struct Echo;

fn first(args: &[serde_json::Value]) -> serde_json::Value {
    args.first().cloned().unwrap_or(serde_json::Value::Null)
}

impl Interceptable for Echo {
    const CLASS_NAME: &'static str = "Echo";

    fn prototype(table: &mut MethodTable<Self>) {
        table
            .sync_method("echo", |_, args| Ok(first(&args)))
            .async_method("echoLater", |_, args| {
                let result: CallResult = Ok(first(&args));
                Box::pin(future::ready(result))
            });
    }
}

/// Wrapper that records `<name>:enter:<label>` / `<name>:exit:<label>`
/// into a shared log.
pub struct Recorder {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new(name: impl Into<String>, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.into(),
            log,
        }
    }

    fn record(&self, event: &str, label: &SourceName) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}:{}", self.name, event, label));
    }
}

#[async_trait]
impl Wrapper for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn run_sync(
        &self,
        original: &SyncOriginal<'_>,
        label: &SourceName,
        receiver: &Receiver,
        args: Args,
    ) -> CallResult {
        self.record("enter", label);
        let result = original(receiver, args);
        self.record("exit", label);
        result
    }

    async fn run_async(
        &self,
        original: &AsyncOriginal<'_>,
        label: &SourceName,
        receiver: Arc<Receiver>,
        args: Args,
    ) -> CallResult {
        self.record("enter", label);
        let result = original(receiver, args).await;
        self.record("exit", label);
        result
    }
}

/// Shared log for [`Recorder`] wrappers.
pub fn recorder_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

/// `Hi, <name>` as a JSON value, the result `C::greet` resolves to.
pub fn greeting(name: &str) -> serde_json::Value {
    json!(format!("Hi, {}", name))
}
