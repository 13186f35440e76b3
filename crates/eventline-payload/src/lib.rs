//! Payload decoding for dispatched events.
//!
//! The decoder stops at raw `data` text; this crate turns it into typed
//! records with `serde_json`.

pub mod error;
pub mod json;
pub mod records;

pub use error::PayloadError;
pub use json::{decode_json, decode_json_case_insensitive, from_str_case_insensitive};
pub use records::{EspEvent, EventTypeFilter};
