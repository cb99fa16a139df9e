//! Positional argument lists.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::error::{CallResult, InterceptError};

/// Positional arguments forwarded to an original method.
pub type Args = Vec<Value>;

/// Decode the argument at `index` into `T`.
pub fn arg<T: DeserializeOwned>(args: &[Value], index: usize) -> Result<T, InterceptError> {
    let value = args
        .get(index)
        .ok_or(InterceptError::MissingArgument { index })?;
    serde_json::from_value(value.clone())
        .map_err(|source| InterceptError::InvalidArgument { index, source })
}

/// Encode a method's return value.
pub fn to_value<T: Serialize>(value: T) -> CallResult {
    serde_json::to_value(value).map_err(Into::into)
}
