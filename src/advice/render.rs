//! Text rendering for logged arguments and results.
//!
//! Two policies exist and produce different text for arrays and objects,
//! so the choice is part of the observable output:
//!
//! | Value            | `Structured`            | `Json`                 |
//! |------------------|-------------------------|------------------------|
//! | `"Al"`           | `Al`                    | `Al` (result), `"Al"` (args) |
//! | `5`              | `5`                     | `5`                    |
//! | `3.0`            | `3`                     | `3.0`                  |
//! | `[1, 2, 3]`      | `3` (element count)     | `[1,2,3]`              |
//! | `{"k": "v"}`     | `{k:v}`                 | `{"k":"v"}`            |
//! | `null`, `true`   | `Unsupported type`      | `null`, `true`         |
//!
//! `Structured` is the default. Object keys render in the map's iteration
//! order.

use serde::Deserialize;
use serde_json::Value;

/// Marker emitted by `Structured` for values it does not describe.
pub const UNSUPPORTED_TYPE: &str = "Unsupported type";

/// How the logger turns values into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderPolicy {
    /// Per-field formatting: literals as text, arrays as their length,
    /// objects as `{key:value,...}`.
    #[default]
    Structured,
    /// JSON text for the argument list and for non-string results.
    Json,
}

impl RenderPolicy {
    /// Render an argument list, always bracketed.
    pub fn args(&self, args: &[Value]) -> String {
        match self {
            RenderPolicy::Structured => {
                let values: Vec<String> = args.iter().map(render_value).collect();
                format!("[{}]", values.join(","))
            }
            RenderPolicy::Json => Value::Array(args.to_vec()).to_string(),
        }
    }

    /// Render a single result value.
    pub fn result(&self, value: &Value) -> String {
        match self {
            RenderPolicy::Structured => render_value(value),
            RenderPolicy::Json => match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            },
        }
    }
}

/// Render one value with the `Structured` rules.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // f64 Display drops a zero fraction: 3.0 renders as 3
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Array(items) => items.len().to_string(),
        Value::Object(map) => {
            let fields: Vec<String> = map
                .iter()
                .map(|(key, value)| format!("{}:{}", key, render_value(value)))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Null | Value::Bool(_) => UNSUPPORTED_TYPE.to_string(),
    }
}
