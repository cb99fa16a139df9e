//! Method identity: display labels and sync/async classification.

use std::fmt;

/// Whether an original method completes synchronously or yields an
/// eventual value.
///
/// Fixed when the method is registered. A synchronous method that
/// happens to return a future-like value is still `Sync`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    Sync,
    Async,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Sync => "sync",
            MethodKind::Async => "async",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display identifier for a class member, rendered as `<Class-member>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceName {
    class: String,
    member: String,
}

impl SourceName {
    pub fn new(class: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            member: member.into(),
        }
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn member(&self) -> &str {
        &self.member
    }
}

impl fmt::Display for SourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}-{}>", self.class, self.member)
    }
}
