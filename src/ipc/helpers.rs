use super::error::HandlerError;
use serde_json::{Map, Value};

pub fn required_str<'a>(params: &'a Value, key: &str) -> Result<&'a str, HandlerError> {
    match params.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        Some(_) => Err(HandlerError::bad_params(format!("{} must not be empty", key))),
        None => Err(HandlerError::bad_params(format!("missing {}", key))),
    }
}

pub fn optional_str<'a>(params: &'a Value, key: &str) -> Result<Option<&'a str>, HandlerError> {
    match params.get(key) {
        None => Ok(None),
        Some(v) if v.is_null() => Ok(None),
        Some(v) => match v.as_str() {
            Some(s) => Ok(Some(s)),
            None => Err(HandlerError::bad_params(format!("{} must be a string", key))),
        },
    }
}

pub fn required_object<'a>(
    params: &'a Value,
    key: &str,
) -> Result<&'a Map<String, Value>, HandlerError> {
    params
        .get(key)
        .and_then(|v| v.as_object())
        .ok_or_else(|| HandlerError::bad_params(format!("missing/invalid {}", key)))
}
