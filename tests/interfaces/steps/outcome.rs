//! Call outcome shared by the step worlds.

use interpose::advice::MemorySink;
use interpose::{CallResult, Outcome};
use serde_json::Value;

/// What the last call produced.
#[derive(Debug, Default)]
pub struct LastCall {
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl LastCall {
    pub async fn settle(outcome: Outcome) -> Self {
        Self::from_result(outcome.settle().await)
    }

    pub fn from_result(result: CallResult) -> Self {
        match result {
            Ok(value) => Self {
                result: Some(value),
                error: None,
            },
            Err(e) => Self {
                result: None,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn value(&self) -> &Value {
        match (&self.result, &self.error) {
            (Some(value), _) => value,
            (None, Some(error)) => panic!("Call failed: {}", error),
            (None, None) => panic!("No call was made"),
        }
    }

    pub fn error(&self) -> &str {
        self.error.as_deref().expect("Call did not fail")
    }
}

/// Parse a step argument as JSON.
pub fn json_arg(text: &str) -> Value {
    serde_json::from_str(text).expect("Step argument is not valid JSON")
}

pub fn assert_info(sink: &MemorySink, expected: &[&str]) {
    assert_eq!(sink.info_lines(), expected, "info stream");
}

pub fn assert_error(sink: &MemorySink, expected: &[&str]) {
    assert_eq!(sink.error_lines(), expected, "error stream");
}
