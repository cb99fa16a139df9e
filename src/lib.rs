//! Interpose - method interception for Rust types
//!
//! Routes every registered method of a type through one or more
//! [`Wrapper`](interfaces::Wrapper) implementations, so cross-cutting
//! behavior (call logging, error reporting, tracing) is applied at
//! composition time instead of inside each method.
//!
//! ```ignore
//! let reporter: Arc<dyn Wrapper> = Arc::new(ErrorReporter::console());
//! let logger: Arc<dyn Wrapper> = Arc::new(Logger::console());
//!
//! let class = decorate(vec![reporter, logger]).apply::<Calculator>();
//! let calc = class.construct(Calculator::new());
//!
//! let sum = calc.call("add", args![2, 3])?;
//! let greeting = calc.call_async("greet", args!["Al"]).await?;
//! ```

pub mod advice;
pub mod config;
pub mod interceptor;
pub mod interfaces;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use interceptor::{decorate, DecoratedClass, Decorator, Interceptable, Intercepted, MethodTable, Outcome};
pub use interfaces::{
    arg, Args, CallError, CallResult, InterceptError, MethodError, MethodKind, SourceName, Wrapper,
};

// Re-exported for the `args!` macro.
#[doc(hidden)]
pub use serde_json;

/// Build an argument list from JSON-convertible expressions.
///
/// ```ignore
/// let args = args![2, 3, "label"];
/// ```
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        vec![$($crate::serde_json::json!($value)),*]
    };
}
