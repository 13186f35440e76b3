use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Event type used when no `event` field was given.
pub const DEFAULT_EVENT_TYPE: &str = "message";

/// An event produced by a blank line in the stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SseEvent {
    pub event_type: String,
    /// `data` lines joined with `\n`
    pub data: String,
    /// Last event id seen on the stream, empty if none
    pub id: String,
    /// Reconnection delay most recently advertised by the stream
    #[serde(
        default,
        with = "duration_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub retry: Option<Duration>,
}

impl SseEvent {
    pub fn new(event_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
            id: String::new(),
            retry: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_retry(mut self, retry: Duration) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn data_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    pub fn is_type(&self, event_type: &str) -> bool {
        self.event_type == event_type
    }
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_u64(d.as_millis() as u64),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
