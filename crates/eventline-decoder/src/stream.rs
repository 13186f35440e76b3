// Pull-based front-ends over SseDecoder
// The source is only read when the consumer asks for an event and none is buffered

use std::io::{ErrorKind, Read};
use std::iter::FusedIterator;
use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::config::DecoderConfig;
use crate::decoder::SseDecoder;
use crate::error::{BoxError, DecodeError, Result};
use crate::event::SseEvent;

/// Lazy sequence of decoded events. Ends after the source ends or after the
/// first error.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<SseEvent>> + Send>>;

/// Decode a stream of byte chunks (e.g. an HTTP body) into events.
///
/// Each event carries the stream's last id and retry hint at the time of
/// dispatch, which is what a reconnecting transport needs.
pub fn decode_stream<S, B, E>(source: S, config: DecoderConfig) -> EventStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<BoxError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut chunks = Box::pin(source);
        let mut decoder = SseDecoder::new(config);

        loop {
            match decoder.next_event() {
                Ok(Some(event)) => {
                    yield Ok(event);
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }

            match chunks.next().await {
                Some(Ok(bytes)) => decoder.feed(bytes.as_ref()),
                Some(Err(e)) => {
                    yield Err(decoder.fail(DecodeError::transport(e)));
                    break;
                }
                None => {
                    decoder.finish();
                    break;
                }
            }
        }
    })
}

/// Decode events from any async reader (file, socket, in-memory buffer).
pub fn decode_reader<R>(reader: R, config: DecoderConfig) -> EventStream
where
    R: AsyncRead + Send + 'static,
{
    let chunk_size = config.read_chunk_size.max(1);

    Box::pin(async_stream::stream! {
        let mut reader = Box::pin(reader);
        let mut chunk = vec![0u8; chunk_size];
        let mut decoder = SseDecoder::new(config);

        loop {
            match decoder.next_event() {
                Ok(Some(event)) => {
                    yield Ok(event);
                    continue;
                }
                Ok(None) => {}
                Err(e) => {
                    yield Err(e);
                    break;
                }
            }

            match reader.read(&mut chunk).await {
                Ok(0) => {
                    decoder.finish();
                    break;
                }
                Ok(n) => decoder.feed(&chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    yield Err(decoder.fail(DecodeError::Io(e)));
                    break;
                }
            }
        }
    })
}

/// Blocking iterator over events read from a [`std::io::Read`].
#[derive(Debug)]
pub struct EventIter<R> {
    reader: R,
    decoder: SseDecoder,
    chunk: Vec<u8>,
}

impl<R: Read> EventIter<R> {
    pub fn new(reader: R, config: DecoderConfig) -> Self {
        let chunk = vec![0u8; config.read_chunk_size.max(1)];
        Self {
            reader,
            decoder: SseDecoder::new(config),
            chunk,
        }
    }

    pub fn last_event_id(&self) -> &str {
        self.decoder.last_event_id()
    }

    pub fn retry(&self) -> Option<Duration> {
        self.decoder.retry()
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }
}

impl<R: Read> Iterator for EventIter<R> {
    type Item = Result<SseEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.decoder.next_event() {
                Ok(Some(event)) => return Some(Ok(event)),
                Ok(None) if self.decoder.is_terminated() => return None,
                Ok(None) => {}
                Err(e) => return Some(Err(e)),
            }

            match self.reader.read(&mut self.chunk) {
                Ok(0) => {
                    self.decoder.finish();
                    return None;
                }
                Ok(n) => self.decoder.feed(&self.chunk[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Some(Err(self.decoder.fail(DecodeError::Io(e)))),
            }
        }
    }
}

impl<R: Read> FusedIterator for EventIter<R> {}
