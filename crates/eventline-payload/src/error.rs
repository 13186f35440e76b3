use thiserror::Error;

#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Invalid JSON payload for event '{event_type}': {source}")]
    Json {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Event '{event_type}' has no data")]
    EmptyData { event_type: String },
}

pub type Result<T> = std::result::Result<T, PayloadError>;
