//! Declared unwrapping of the success-envelope shapes the backend emits.
//!
//! List responses arrive as a bare array or wrapped under one of a small set
//! of known keys (`{<resource>: []}`, `{data: []}`, `{items: []}`,
//! `{results: []}`); objects arrive bare or under `{<resource>: {}}` /
//! `{data: {}}`. Anything else is a contract violation and is rejected loudly
//! instead of silently degraded, so backend drift shows up in logs rather
//! than as an empty table.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::error;

use crate::error::ApiError;

const LIST_KEYS: [&str; 3] = ["data", "items", "results"];
const OBJECT_KEYS: [&str; 1] = ["data"];

/// Unwrap a list envelope and decode each record.
pub fn records<T: DeserializeOwned>(value: Value, resource: &str) -> Result<Vec<T>, ApiError> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match take_array(&mut map, resource) {
            Some(items) => items,
            None => {
                error!(resource, keys = ?map.keys().collect::<Vec<_>>(), "unrecognized list envelope");
                return Err(ApiError::UnexpectedShape(format!(
                    "no `{resource}` record array in response"
                )));
            }
        },
        other => {
            error!(resource, "list response is not an array or object: {other}");
            return Err(ApiError::UnexpectedShape(format!(
                "expected a `{resource}` list, got a scalar"
            )));
        }
    };

    items
        .into_iter()
        .map(|item| {
            serde_json::from_value(item)
                .map_err(|e| ApiError::UnexpectedShape(format!("malformed {resource} record: {e}")))
        })
        .collect()
}

/// Unwrap a single-object envelope and decode it.
pub fn record<T: DeserializeOwned>(value: Value, resource: &str) -> Result<T, ApiError> {
    let object = match value {
        Value::Object(mut map) => {
            let mut unwrapped = None;
            for key in std::iter::once(resource).chain(OBJECT_KEYS) {
                if matches!(map.get(key), Some(Value::Object(_))) {
                    unwrapped = map.remove(key);
                    break;
                }
            }
            unwrapped.unwrap_or(Value::Object(map))
        }
        other => {
            error!(resource, "object response is not a JSON object: {other}");
            return Err(ApiError::UnexpectedShape(format!(
                "expected a `{resource}` object"
            )));
        }
    };

    serde_json::from_value(object)
        .map_err(|e| ApiError::UnexpectedShape(format!("malformed {resource} object: {e}")))
}

fn take_array(map: &mut Map<String, Value>, resource: &str) -> Option<Vec<Value>> {
    for key in std::iter::once(resource).chain(LIST_KEYS) {
        if matches!(map.get(key), Some(Value::Array(_))) {
            if let Some(Value::Array(items)) = map.remove(key) {
                return Some(items);
            }
        }
    }
    None
}
