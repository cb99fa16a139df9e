//! Error types for intercepted calls.

use serde_json::Value;

/// Error raised by an original method.
///
/// Wrappers and the interceptor move this box through untouched, so the
/// caller receives the same allocation the method produced.
pub type CallError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an intercepted call.
pub type CallResult = std::result::Result<Value, CallError>;

/// Errors produced by the interception layer itself.
///
/// None of these are raised on the normal call path: they cover calls
/// to members that were never registered, data fields, and argument
/// decoding inside method bodies.
#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
    #[error("Unknown member {member} on {class}")]
    UnknownMember { class: String, member: String },

    #[error("Member {label} is a data field, not a method")]
    NotCallable { label: String },

    #[error("Method {label} is asynchronous; use call_async or invoke")]
    NotSynchronous { label: String },

    #[error("Receiver passed to {label} is not an instance of {class}")]
    ReceiverMismatch { label: String, class: String },

    #[error("Missing argument at position {index}")]
    MissingArgument { index: usize },

    #[error("Invalid argument at position {index}: {source}")]
    InvalidArgument {
        index: usize,
        source: serde_json::Error,
    },
}

/// General-purpose error for method bodies.
///
/// Renders as `Error: <message>`, the text error reporters print after
/// the source label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error: {message}")]
pub struct MethodError {
    message: String,
}

impl MethodError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message without the `Error: ` prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}
