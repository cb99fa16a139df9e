//! Wrapper contract step definitions.

use std::fmt;
use std::sync::Arc;

use cucumber::{given, then, when, World};
use interpose::advice::{CallTracer, ErrorReporter, Logger, MemorySink, RenderPolicy};
use interpose::test_utils::{Echo, TestClass};
use interpose::{args, decorate, Args, Intercepted, Wrapper};
use serde_json::{json, Value};

use super::outcome::{assert_error, assert_info, json_arg, LastCall};

/// Test context for wrapper contract scenarios.
///
/// Wrappers are collected outermost first, then applied to both fixture
/// types at once. Calls go to whichever instance registers the method.
#[derive(World)]
#[world(init = Self::new)]
pub struct WrapperWorld {
    sink: Arc<MemorySink>,
    wrappers: Vec<Arc<dyn Wrapper>>,
    test_class: Option<Intercepted<TestClass>>,
    echo: Option<Intercepted<Echo>>,
    last: LastCall,
}

impl fmt::Debug for WrapperWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapperWorld")
            .field("wrappers", &self.wrappers.iter().map(|w| w.name()).collect::<Vec<_>>())
            .field("observations", &self.sink.observations())
            .field("last", &self.last)
            .finish()
    }
}

impl WrapperWorld {
    fn new() -> Self {
        Self {
            sink: Arc::new(MemorySink::new()),
            wrappers: Vec::new(),
            test_class: None,
            echo: None,
            last: LastCall::default(),
        }
    }

    async fn call(&mut self, name: &str, args: Args) {
        let test_class = self.test_class.as_ref().expect("Wrappers not applied");
        let echo = self.echo.as_ref().expect("Wrappers not applied");
        let outcome = if test_class.is_intercepted(name) {
            test_class.invoke(name, args)
        } else {
            echo.invoke(name, args)
        };
        self.last = LastCall::settle(outcome).await;
    }
}

// --- Given steps ---

#[given("a logger")]
async fn given_logger(world: &mut WrapperWorld) {
    world.wrappers.push(Arc::new(Logger::new(world.sink.clone())));
}

#[given(expr = "a logger rendering {word}")]
async fn given_logger_rendering(world: &mut WrapperWorld, policy: String) {
    let policy: RenderPolicy =
        serde_json::from_value(json!(policy)).expect("Unknown render policy");
    world
        .wrappers
        .push(Arc::new(Logger::new(world.sink.clone()).with_policy(policy)));
}

#[given("an error reporter")]
async fn given_error_reporter(world: &mut WrapperWorld) {
    world
        .wrappers
        .push(Arc::new(ErrorReporter::new(world.sink.clone())));
}

#[given("a call tracer")]
async fn given_call_tracer(world: &mut WrapperWorld) {
    world.wrappers.push(Arc::new(CallTracer::new()));
}

#[given("the wrappers are applied")]
async fn given_wrappers_applied(world: &mut WrapperWorld) {
    let decorator = decorate(world.wrappers.clone());
    world.test_class = Some(decorator.apply::<TestClass>().construct(TestClass::new()));
    world.echo = Some(decorator.apply::<Echo>().construct(Echo));
}

// --- When steps ---

#[when(expr = "I call {word} with {int} and {int}")]
async fn when_call_with_ints(world: &mut WrapperWorld, name: String, a: i64, b: i64) {
    world.call(&name, args![a, b]).await;
}

#[when(expr = "I call {word} with {string}")]
async fn when_call_with_string(world: &mut WrapperWorld, name: String, text: String) {
    world.call(&name, args![text]).await;
}

#[when(expr = "I call {word} with JSON {string}")]
async fn when_call_with_json(world: &mut WrapperWorld, name: String, text: String) {
    world.call(&name, vec![json_arg(&text)]).await;
}

#[when(expr = "I call {word} with no arguments")]
async fn when_call_without_args(world: &mut WrapperWorld, name: String) {
    world.call(&name, args![]).await;
}

// --- Then steps ---

#[then(expr = "the result is {int}")]
async fn then_result_int(world: &mut WrapperWorld, expected: i64) {
    assert_eq!(world.last.value(), &json!(expected));
}

#[then(expr = "the result is {string}")]
async fn then_result_string(world: &mut WrapperWorld, expected: String) {
    assert_eq!(world.last.value(), &Value::String(expected));
}

#[then(expr = "the call fails with {string}")]
async fn then_call_fails(world: &mut WrapperWorld, expected: String) {
    assert_eq!(world.last.error(), expected);
}

#[then(expr = "the info stream shows {string} then {string}")]
async fn then_info_two(world: &mut WrapperWorld, first: String, second: String) {
    assert_info(&world.sink, &[first.as_str(), second.as_str()]);
}

#[then(expr = "the info stream shows {string}")]
async fn then_info_one(world: &mut WrapperWorld, line: String) {
    assert_info(&world.sink, &[line.as_str()]);
}

#[then("the info stream is empty")]
async fn then_info_empty(world: &mut WrapperWorld) {
    assert_info(&world.sink, &[]);
}

#[then(expr = "the error stream shows {string}")]
async fn then_error_one(world: &mut WrapperWorld, line: String) {
    assert_error(&world.sink, &[line.as_str()]);
}

#[then("the error stream is empty")]
async fn then_error_empty(world: &mut WrapperWorld) {
    assert_error(&world.sink, &[]);
}
