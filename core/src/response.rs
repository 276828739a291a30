//! Raw backend results.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// The JSON a call returned, or `Empty` when the backend had nothing to say.
///
/// An empty body and every falsy JSON value (`null`, `false`, `0`, `""`)
/// collapse into `Empty`. Callers treat it as "no data", not as a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Empty,
    Value(Value),
}

impl RawResponse {
    /// Interpret a 2xx response body.
    pub fn from_body(body: &str) -> Result<Self, ApiError> {
        if body.trim().is_empty() {
            return Ok(RawResponse::Empty);
        }
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ApiError::Backend(format!("response body is not JSON: {e}")))?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        if is_falsy(&value) {
            RawResponse::Empty
        } else {
            RawResponse::Value(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RawResponse::Empty)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            RawResponse::Empty => None,
            RawResponse::Value(value) => Some(value),
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            RawResponse::Empty => None,
            RawResponse::Value(value) => Some(value),
        }
    }

    /// Decode into an endpoint schema; `Empty` decodes to `None`.
    pub fn decode<T: DeserializeOwned>(self, endpoint: impl ToString) -> Result<Option<T>, ApiError> {
        match self {
            RawResponse::Empty => Ok(None),
            RawResponse::Value(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| ApiError::unexpected(endpoint, e)),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
