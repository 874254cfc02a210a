//! HTTP response handling and JSON envelope parsing.
//!
//! The platform wraps every application-level response in a JSON envelope
//! `{type, response}`. A `type` of `"error"` carries `{message, status}` (or a
//! bare string) in `response`. Non-200 statuses and unparseable bodies are
//! synthesized into the same error shape so callers see a single taxonomy.

use serde_json::Value;

use crate::error::{Error, ErrorKind, Result};

/// A completed HTTP exchange: status code plus raw body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: u16,
    body: String,
}

impl ApiResponse {
    /// Create a response from a status code and body text.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns true if the response status is 200.
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    /// Get the raw body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Parse the body according to the platform envelope rules and return the
    /// resolved payload.
    ///
    /// - non-200 status → `Err` with message `HTTP status: <n>`
    /// - body that is not valid JSON → `Err` with message `Parsing error: …`
    /// - `{type: "error", response}` envelope → `Err` with the server's
    ///   message and status
    /// - `{type, response}` envelope otherwise → `Ok(response)`
    /// - no envelope (e.g. the health endpoint) → `Ok(whole body)`
    pub fn payload(self) -> Result<Value> {
        if self.status != 200 {
            return Err(Error::new(ErrorKind::Api {
                message: format!("HTTP status: {}", self.status),
                status: self.status,
            }));
        }

        let value: Value = match serde_json::from_str(&self.body) {
            Ok(v) => v,
            Err(e) => {
                return Err(Error::new(ErrorKind::Api {
                    message: format!("Parsing error: {e}"),
                    status: self.status,
                }))
            }
        };

        envelope_payload(value, self.status)
    }
}

/// Unwrap a parsed envelope, rejecting `type == "error"`.
fn envelope_payload(value: Value, status: u16) -> Result<Value> {
    if value.get("type").and_then(Value::as_str) == Some("error") {
        return Err(server_error(value.get("response"), status));
    }
    match value {
        Value::Object(mut map) if map.contains_key("response") => {
            Ok(map.remove("response").unwrap_or(Value::Null))
        }
        other => Ok(other),
    }
}

/// Build an error from the server's error payload, which is either
/// `{message, status}` or a bare string.
fn server_error(response: Option<&Value>, http_status: u16) -> Error {
    let (message, status) = match response {
        Some(Value::String(s)) => (s.clone(), http_status),
        Some(Value::Object(map)) => {
            let message = map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(map.clone()).to_string());
            let status = map
                .get("status")
                .and_then(Value::as_u64)
                .map(|s| s as u16)
                .unwrap_or(http_status);
            (message, status)
        }
        other => (
            other.map(Value::to_string).unwrap_or_default(),
            http_status,
        ),
    };
    Error::new(ErrorKind::Api { message, status })
}
