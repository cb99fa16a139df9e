//! Aspect-oriented advice for intercepted methods.
//!
//! This module provides the concrete [`Wrapper`](crate::interfaces::Wrapper)
//! strategies that add orthogonal behavior (call logging, error reporting,
//! tracing spans) without touching the methods themselves.
//!
//! # Architecture
//!
//! Advice is applied at decoration time, not in implementations:
//!
//! ```ignore
//! let reporter: Arc<dyn Wrapper> = Arc::new(ErrorReporter::console());
//! let logger: Arc<dyn Wrapper> = Arc::new(Logger::console());
//!
//! // Outer to inner: the reporter sees every call the logger sees.
//! let class = decorate(vec![reporter, logger]).apply::<Calculator>();
//! ```
//!
//! # Available Advice
//!
//! - [`Logger`] - `Calling <label> with args: ...` / `Result of <label>: ...`
//! - [`ErrorReporter`] - `Error in <label>: <error>` on failure, then rethrow
//! - [`CallTracer`] - `tracing` span and timing per call

mod error_reporter;
mod logger;
pub mod render;
mod sink;
mod tracer;

pub use error_reporter::ErrorReporter;
pub use logger::Logger;
pub use render::RenderPolicy;
pub use sink::{ConsoleSink, MemorySink, TracingSink};
pub use tracer::CallTracer;
