use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// Reads the body of a response, turning a non-2xx status into an error.
pub async fn read_body(response: reqwest::Response) -> AppResult<String> {
    let status = response.status();
    let body = response.text().await?;
    check_status(status, body)
}

pub fn check_status(status: StatusCode, body: String) -> AppResult<String> {
    if status.is_success() {
        return Ok(body);
    }
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_string()
    } else {
        body
    };
    Err(AppError::HttpStatus {
        status: status.as_u16(),
        message,
    })
}

/// Mirrors a JavaScript `if (value)` check on a decoded body.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Decodes a body into `T`, yielding `None` for an empty or falsy body.
pub fn parse_optional<T: DeserializeOwned>(body: &str) -> AppResult<Option<T>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body)?;
    if !is_truthy(&value) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_value(value)?))
}

/// Interprets the body of a DELETE or PUT. A 2xx with no body is an
/// acknowledgement; a plain-text body counts when it is non-empty.
pub fn acknowledged(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return true;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => is_truthy(&value),
        Err(_) => true,
    }
}
