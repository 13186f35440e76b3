//! Commonly used types, re-exported for `use eventline::prelude::*`.

pub use eventline_decoder::{
    decode_reader, decode_stream, DecodeError, DecoderConfig, DispatchPolicy, EventIter,
    EventStream, SseDecoder, SseEvent, Utf8Policy,
};

#[cfg(feature = "payload")]
pub use eventline_payload::{
    decode_json, decode_json_case_insensitive, EspEvent, EventTypeFilter, PayloadError,
};
