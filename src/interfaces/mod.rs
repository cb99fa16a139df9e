//! Trait definitions for the interception layer.
//!
//! These traits are the seams between the method interceptor and the
//! cross-cutting strategies plugged into it. Concrete implementations
//! live in [`crate::advice`].

pub mod args;
pub mod error;
pub mod sink;
pub mod source;
pub mod wrapper;

pub use args::{arg, to_value, Args};
pub use error::{CallError, CallResult, InterceptError, MethodError};
pub use sink::{Observation, ObservationSink, Stream};
pub use source::{MethodKind, SourceName};
pub use wrapper::{AsyncOriginal, Receiver, SyncOriginal, Wrapper};
