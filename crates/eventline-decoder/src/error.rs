use std::str::Utf8Error;

use thiserror::Error;

/// Boxed error produced by the byte source feeding a decoder.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Terminal failures of an event sequence.
///
/// Malformed line shapes, unknown fields, an `id` containing NUL and a
/// non-numeric `retry` are tolerated by the decoder and never show up here.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("I/O error while reading event stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("Invalid UTF-8 on line {line}: {source}")]
    InvalidUtf8 {
        line: u64,
        #[source]
        source: Utf8Error,
    },

    #[error("Line exceeds maximum length of {limit} bytes")]
    LineTooLong { limit: usize },
}

impl DecodeError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        DecodeError::Transport(err.into())
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
