use eventline_decoder::SseEvent;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PayloadError, Result};

/// Deserialize an event's `data` as JSON.
pub fn decode_json<T: DeserializeOwned>(event: &SseEvent) -> Result<T> {
    ensure_data(event)?;
    serde_json::from_str(&event.data).map_err(|source| PayloadError::Json {
        event_type: event.event_type.clone(),
        source,
    })
}

/// Like [`decode_json`], but top-level object keys are matched without regard
/// to case. Target types must use lower-case field names.
pub fn decode_json_case_insensitive<T: DeserializeOwned>(event: &SseEvent) -> Result<T> {
    ensure_data(event)?;
    from_str_case_insensitive(&event.data).map_err(|source| PayloadError::Json {
        event_type: event.event_type.clone(),
        source,
    })
}

/// Case-insensitive deserialization of a raw JSON string, for callers that
/// slice payloads out of lines themselves.
pub fn from_str_case_insensitive<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    let value = match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Value::Object(lowercase_keys(map)),
        other => other,
    };
    serde_json::from_value(value)
}

fn lowercase_keys(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}

fn ensure_data(event: &SseEvent) -> Result<()> {
    if event.data.is_empty() {
        return Err(PayloadError::EmptyData {
            event_type: event.event_type.clone(),
        });
    }
    Ok(())
}
