use eventline_decoder::SseEvent;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entity state update as pushed by ESPHome-style device web servers on
/// `state` events.
///
/// Every field is optional: devices omit what does not apply to an entity.
/// Decode with [`decode_json_case_insensitive`](crate::decode_json_case_insensitive),
/// since firmware versions disagree on key casing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EspEvent {
    pub id: Option<String>,
    /// Raw value, numeric for sensors, boolean for switches, string otherwise
    pub value: Option<Value>,
    pub name: Option<String>,
    /// Human-readable state, e.g. `"21.5 °C"`
    pub state: Option<String>,
    pub event_type: Option<String>,
}

impl std::fmt::Display for EspEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let field = |v: &Option<String>| v.clone().unwrap_or_default();
        let value = self.value.as_ref().map(Value::to_string).unwrap_or_default();
        write!(
            f,
            "Id: {}, Value: {}, Name: {}, State: {}, Event_Type: {}",
            field(&self.id),
            value,
            field(&self.name),
            field(&self.state),
            field(&self.event_type),
        )
    }
}

/// Selects events by type, ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeFilter {
    event_type: String,
}

impl EventTypeFilter {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
        }
    }

    pub fn state() -> Self {
        Self::new("state")
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn matches(&self, event: &SseEvent) -> bool {
        self.matches_type(&event.event_type)
    }

    pub fn matches_type(&self, event_type: &str) -> bool {
        event_type.eq_ignore_ascii_case(&self.event_type)
    }

    /// Whether a raw line is exactly the `event:` line for this type, as in
    /// `event: state`. Only the single-space form is recognized.
    pub fn matches_event_line(&self, line: &str) -> bool {
        match (line.get(..7), line.get(7..)) {
            (Some(prefix), Some(rest)) => {
                prefix.eq_ignore_ascii_case("event: ") && self.matches_type(rest)
            }
            _ => false,
        }
    }
}
