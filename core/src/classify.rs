//! Response classification.
//!
//! Rules are applied in order and the first match wins: transport failure,
//! unparsable body, non-200 status, embedded `error` member, success.

use serde_json::Value;

use crate::error::RottenError;
use crate::http::{HttpResponse, TransportError};

/// Outcome of one call as delivered to the caller.
pub type Classified = Result<Value, RottenError>;

pub fn classify(outcome: Result<HttpResponse, TransportError>) -> Classified {
    let response = outcome.map_err(|e| RottenError::Transport(e.message))?;
    let data: Value = serde_json::from_str(&response.body).map_err(|_| RottenError::Parse)?;
    if response.status != 200 {
        return Err(RottenError::Http(response.status));
    }
    if let Some(message) = embedded_error(&data) {
        return Err(RottenError::Api(message));
    }
    Ok(data)
}

/// Message of a truthy top-level `error` member, if any.
fn embedded_error(data: &Value) -> Option<String> {
    match data.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
