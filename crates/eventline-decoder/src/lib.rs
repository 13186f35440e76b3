//! Incremental decoder for the Server-Sent Events wire format.
//!
//! Bytes are framed into lines (`\n` or `\r\n`), lines into fields, and a
//! blank line dispatches the accumulated event. Input may arrive in chunks of
//! any size; nothing beyond the current partial line is buffered.
//!
//! Three ways in:
//!
//! - [`SseDecoder`]: push bytes, pull events, fully synchronous
//! - [`decode_stream`] / [`decode_reader`]: lazy async [`EventStream`]s
//! - [`EventIter`]: blocking iterator over a [`std::io::Read`]

pub mod accumulator;
pub mod buffer;
pub mod config;
pub mod decoder;
pub mod error;
pub mod event;
pub mod line;
pub mod stream;

pub use accumulator::EventAccumulator;
pub use buffer::LineBuffer;
pub use config::{DecoderConfig, DispatchPolicy, Utf8Policy};
pub use decoder::SseDecoder;
pub use error::{BoxError, DecodeError};
pub use event::{SseEvent, DEFAULT_EVENT_TYPE};
pub use line::{FieldName, Line};
pub use stream::{decode_reader, decode_stream, EventIter, EventStream};
