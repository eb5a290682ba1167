// Response envelope handling
//
// Every endpoint answers `{ "status": 0, "message": ..., "error": ..., "content": ... }`.
// A zero/falsy status is success; anything else is a failure described by
// `message` and `error` (older endpoints name it `errorCode`). The HTTP status
// line carries no extra information and is ignored.

use serde_json::{Map, Value};

use crate::error::Error;

const NO_RESPONSE: &str = "No response";

/// Decoded response envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: Value,
    pub message: Option<String>,
    pub code: Option<i64>,
    pub content: Value,
}

impl Envelope {
    /// Decode a raw response body.
    ///
    /// Fails with `Error::Protocol` if the body is not JSON, is not an object,
    /// or has no usable `status` field.
    pub fn decode(body: &str) -> Result<Self, Error> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::protocol(format!("{NO_RESPONSE}: body is not JSON ({e})"), body))?;

        let Value::Object(mut fields) = value else {
            return Err(Error::protocol(
                format!("{NO_RESPONSE}: expected a JSON object"),
                body,
            ));
        };

        let status = match fields.remove("status") {
            Some(Value::Null) | None => {
                return Err(Error::protocol(
                    format!("{NO_RESPONSE}: missing status field"),
                    body,
                ));
            }
            Some(status) => status,
        };

        Ok(Self {
            status,
            message: fields
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            code: error_code(&fields),
            content: fields.remove("content").unwrap_or(Value::Null),
        })
    }

    /// `true` when `status` reports success.
    pub fn is_success(&self) -> bool {
        !is_truthy(&self.status)
    }

    /// Return `content` on success, or the failure as `Error::Api`.
    pub fn into_content(self) -> Result<Value, Error> {
        if self.is_success() {
            return Ok(self.content);
        }
        let message = self
            .message
            .unwrap_or_else(|| format!("status={}", self.status));
        Err(Error::Api {
            message,
            code: self.code,
        })
    }

    /// Decode a body and unwrap its `content` in one step.
    pub fn parse(body: &str) -> Result<Value, Error> {
        Self::decode(body)?.into_content()
    }
}

/// `error` takes precedence over `errorCode`. Numeric strings are accepted.
fn error_code(fields: &Map<String, Value>) -> Option<i64> {
    ["error", "errorCode"]
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|value| match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
}

/// Loose truthiness, matching how the service encodes `status`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}
