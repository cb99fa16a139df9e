//! Method interceptor step definitions.

use std::fmt;
use std::sync::{Arc, Mutex};

use cucumber::{given, then, when, World};
use interpose::advice::{ErrorReporter, Logger, MemorySink};
use interpose::test_utils::{recorder_log, Recorder, TestClass, C};
use interpose::{args, decorate, Args, DecoratedClass, InterceptError, Intercepted, Wrapper};
use serde_json::{json, Value};

use super::outcome::{assert_info, LastCall};

/// Test context for interceptor scenarios.
#[derive(World)]
#[world(init = Self::new)]
pub struct InterceptorWorld {
    sink: Arc<MemorySink>,
    log: Arc<Mutex<Vec<String>>>,
    class: Option<DecoratedClass<C>>,
    instance: Option<Intercepted<C>>,
    scaled: Vec<Intercepted<TestClass>>,
    scaled_results: Vec<Value>,
    last: LastCall,
}

impl fmt::Debug for InterceptorWorld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterceptorWorld")
            .field("instance", &self.instance)
            .field("observations", &self.sink.observations())
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl InterceptorWorld {
    fn new() -> Self {
        Self {
            sink: Arc::new(MemorySink::new()),
            log: recorder_log(),
            class: None,
            instance: None,
            scaled: Vec::new(),
            scaled_results: Vec::new(),
            last: LastCall::default(),
        }
    }

    fn class(&self) -> &DecoratedClass<C> {
        self.class.as_ref().expect("Class not decorated")
    }

    fn instance(&self) -> &Intercepted<C> {
        self.instance.as_ref().expect("Instance not constructed")
    }

    fn recorder(&self, name: &str) -> Arc<dyn Wrapper> {
        Arc::new(Recorder::new(name, self.log.clone()))
    }

    async fn call(&mut self, name: &str, args: Args) {
        let outcome = self.instance().invoke(name, args);
        self.last = LastCall::settle(outcome).await;
    }
}

// --- Given steps ---

#[given("class C decorated with an error reporter and a logger")]
async fn given_standard_chain(world: &mut InterceptorWorld) {
    let reporter: Arc<dyn Wrapper> = Arc::new(ErrorReporter::new(world.sink.clone()));
    let logger: Arc<dyn Wrapper> = Arc::new(Logger::new(world.sink.clone()));
    world.class = Some(decorate(vec![reporter, logger]).apply::<C>());
}

#[given(expr = "class C decorated with recorders {string} and {string}")]
async fn given_recorders(world: &mut InterceptorWorld, outer: String, inner: String) {
    let chain = vec![world.recorder(&outer), world.recorder(&inner)];
    world.class = Some(decorate(chain).apply::<C>());
}

#[given(expr = "the decorated class is decorated again with recorder {string}")]
async fn given_redecorated(world: &mut InterceptorWorld, name: String) {
    let wrapper = world.recorder(&name);
    let class = world.class.take().expect("Class not decorated");
    world.class = Some(class.decorate(wrapper));
}

#[given(expr = "TestClass instances with scales {int} and {int}")]
async fn given_scaled_instances(world: &mut InterceptorWorld, first: i64, second: i64) {
    let class = interpose::Decorator::new().apply::<TestClass>();
    world.scaled = vec![
        class.construct(TestClass::with_scale(first)),
        class.construct(TestClass::with_scale(second)),
    ];
}

// --- When steps ---

#[when("an instance of C is constructed")]
async fn when_constructed(world: &mut InterceptorWorld) {
    world.instance = Some(world.class().construct(C::new()));
}

#[when(expr = "I call {word} with {int} and {int}")]
async fn when_call_with_ints(world: &mut InterceptorWorld, name: String, a: i64, b: i64) {
    world.call(&name, args![a, b]).await;
}

#[when(expr = "I call {word} with {string}")]
async fn when_call_with_string(world: &mut InterceptorWorld, name: String, text: String) {
    world.call(&name, args![text]).await;
}

#[when(expr = "I call {word} with no arguments")]
async fn when_call_without_args(world: &mut InterceptorWorld, name: String) {
    world.call(&name, args![]).await;
}

#[when(expr = "each instance calls {word} with {int} and {int}")]
async fn when_each_instance_calls(world: &mut InterceptorWorld, name: String, a: i64, b: i64) {
    let mut results = Vec::new();
    for instance in &world.scaled {
        results.push(instance.call_async(&name, args![a, b]).await.expect("Call failed"));
    }
    world.scaled_results = results;
}

// --- Then steps ---

#[then(expr = "the result is {int}")]
async fn then_result_int(world: &mut InterceptorWorld, expected: i64) {
    assert_eq!(world.last.value(), &json!(expected));
}

#[then(expr = "the result is {string}")]
async fn then_result_string(world: &mut InterceptorWorld, expected: String) {
    assert_eq!(world.last.value(), &Value::String(expected));
}

#[then(expr = "the call fails with {string}")]
async fn then_call_fails(world: &mut InterceptorWorld, expected: String) {
    assert_eq!(world.last.error(), expected);
}

#[then(expr = "the info stream shows {string} then {string}")]
async fn then_info_two(world: &mut InterceptorWorld, first: String, second: String) {
    assert_info(&world.sink, &[first.as_str(), second.as_str()]);
}

#[then("the info stream is empty")]
async fn then_info_empty(world: &mut InterceptorWorld) {
    assert_info(&world.sink, &[]);
}

#[then(expr = "the error stream shows {string}")]
async fn then_error_one(world: &mut InterceptorWorld, line: String) {
    assert_eq!(world.sink.error_lines(), vec![line]);
}

#[then(expr = "the instance has seen {int} calls")]
async fn then_instance_hits(world: &mut InterceptorWorld, expected: usize) {
    assert_eq!(world.instance().hits(), expected);
}

#[then(expr = "{word} is not intercepted")]
async fn then_not_intercepted(world: &mut InterceptorWorld, name: String) {
    assert!(!world.instance().is_intercepted(&name));
}

#[then(expr = "calling {word} fails because it is a data field")]
async fn then_field_not_callable(world: &mut InterceptorWorld, name: String) {
    let err = world.instance().call(&name, args![]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InterceptError>(),
        Some(InterceptError::NotCallable { .. })
    ));
}

#[then(expr = "the decorated class is named {string}")]
async fn then_class_named(world: &mut InterceptorWorld, expected: String) {
    assert_eq!(world.class().name(), expected);
    assert_eq!(world.instance().class_name(), expected);
}

#[then(expr = "{word} is labelled {string}")]
async fn then_labelled(world: &mut InterceptorWorld, name: String, expected: String) {
    let label = world.instance().label_of(&name).expect("Not intercepted");
    assert_eq!(label.to_string(), expected);
}

#[then(expr = "the recorder log is {string}")]
async fn then_recorder_log(world: &mut InterceptorWorld, expected: String) {
    let log = world.log.lock().unwrap().join(",");
    assert_eq!(log, expected);
}

#[then(expr = "the results are {int} and {int}")]
async fn then_scaled_results(world: &mut InterceptorWorld, first: i64, second: i64) {
    assert_eq!(world.scaled_results, vec![json!(first), json!(second)]);
}
