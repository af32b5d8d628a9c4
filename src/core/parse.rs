//! Parsers for the tiny bodies the inspector returns.
//!
//! Plain scalars come back as bare text (`2222`, `true`), while values read
//! through the Lua bridge are wrapped in a one-element JSON array (`[true]`).

use crate::utils::error::{InspectorError, Result};
use serde_json::Value;
use std::str::FromStr;

fn invalid(path: &str, body: &[u8], reason: impl Into<String>) -> InspectorError {
    InspectorError::InvalidResponse {
        path: path.to_string(),
        body: String::from_utf8_lossy(body).into_owned(),
        reason: reason.into(),
    }
}

/// First element of a JSON array body, if the body is one.
fn first_json_element(body: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(body).ok()? {
        Value::Array(mut items) if !items.is_empty() => Some(items.swap_remove(0)),
        _ => None,
    }
}

pub fn parse_bool(path: &str, body: &[u8]) -> Result<bool> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => return Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => return Ok(false),
        _ => {}
    }

    match first_json_element(text) {
        Some(Value::Bool(value)) => Ok(value),
        _ => Err(invalid(path, body, "expected a boolean")),
    }
}

pub fn parse_int<T: FromStr>(path: &str, body: &[u8]) -> Result<T> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    if let Ok(value) = text.parse::<T>() {
        return Ok(value);
    }

    match first_json_element(text) {
        Some(Value::Number(n)) => n
            .to_string()
            .parse::<T>()
            .map_err(|_| invalid(path, body, format!("integer {} out of range", n))),
        _ => Err(invalid(path, body, "expected an integer")),
    }
}

/// The SSH status endpoint answers with a JSON array led by the flag
/// (`[true]`). Any other shape is rejected rather than read as "not running".
pub fn parse_running_flag(path: &str, body: &[u8]) -> Result<bool> {
    let items: Vec<Value> = serde_json::from_slice(body)
        .map_err(|e| invalid(path, body, format!("expected a JSON array: {}", e)))?;

    match items.first() {
        Some(Value::Bool(running)) => Ok(*running),
        Some(_) => Err(invalid(path, body, "first element is not a boolean")),
        None => Err(invalid(path, body, "empty array")),
    }
}
