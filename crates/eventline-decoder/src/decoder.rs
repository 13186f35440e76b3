use std::borrow::Cow;
use std::time::Duration;

use crate::accumulator::EventAccumulator;
use crate::buffer::LineBuffer;
use crate::config::{DecoderConfig, Utf8Policy};
use crate::error::{DecodeError, Result};
use crate::event::SseEvent;
use crate::line::Line;

/// Push-style SSE decoder.
///
/// Bytes go in through [`feed`](Self::feed), events come out of
/// [`next_event`](Self::next_event). All work is synchronous; the async and
/// blocking front-ends in [`crate::stream`] decide when to read more input.
///
/// ```
/// use eventline_decoder::{DecoderConfig, SseDecoder};
///
/// let mut decoder = SseDecoder::new(DecoderConfig::default());
/// decoder.feed(b"event: state\ndata: {\"a\":1}\n\n");
///
/// let event = decoder.next_event().unwrap().unwrap();
/// assert_eq!(event.event_type, "state");
/// assert_eq!(event.data, "{\"a\":1}");
/// ```
#[derive(Debug)]
pub struct SseDecoder {
    buffer: LineBuffer,
    accumulator: EventAccumulator,
    utf8_policy: Utf8Policy,
    lines_read: u64,
    terminated: bool,
}

impl Default for SseDecoder {
    fn default() -> Self {
        Self::new(DecoderConfig::default())
    }
}

impl SseDecoder {
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            buffer: LineBuffer::with_capacity(config.initial_capacity)
                .with_max_line_length(config.max_line_length),
            accumulator: EventAccumulator::new(config.dispatch_policy),
            utf8_policy: config.utf8_policy,
            lines_read: 0,
            terminated: false,
        }
    }

    pub fn feed(&mut self, bytes: &[u8]) {
        if !self.terminated {
            self.buffer.extend(bytes);
        }
    }

    /// Process buffered lines until an event is ready or input runs out.
    ///
    /// `Ok(None)` means more input is needed (or the decoder has terminated).
    /// Any error is terminal.
    pub fn next_event(&mut self) -> Result<Option<SseEvent>> {
        if self.terminated {
            return Ok(None);
        }

        while let Some(line) = self.buffer.next_line() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Err(self.fail(e)),
            };
            self.lines_read += 1;

            let text = match self.decode_line(&line) {
                Ok(text) => text,
                Err(e) => return Err(self.fail(e)),
            };

            if let Some(event) = self.accumulator.apply(Line::parse(&text)) {
                tracing::trace!(event_type = %event.event_type, len = event.data.len(), "dispatching event");
                return Ok(Some(event));
            }
        }

        Ok(None)
    }

    /// Signal end of input. Any unterminated line or event is dropped.
    pub fn finish(&mut self) {
        let partial_bytes = self.buffer.clear();
        let partial_event = self.accumulator.discard();
        if partial_bytes > 0 || partial_event {
            tracing::trace!(partial_bytes, partial_event, "discarding unterminated input at end of stream");
        }
        self.terminated = true;
    }

    /// Abort after a source failure: drop buffered state and stop producing events.
    pub fn fail(&mut self, err: DecodeError) -> DecodeError {
        tracing::debug!(error = %err, lines_read = self.lines_read, "event stream failed");
        self.buffer.clear();
        self.accumulator.discard();
        self.terminated = true;
        err
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Last event id seen, for a `Last-Event-ID` header on reconnect.
    pub fn last_event_id(&self) -> &str {
        self.accumulator.last_event_id()
    }

    /// Seed the last event id, e.g. when resuming a previous session.
    pub fn set_last_event_id(&mut self, id: impl Into<String>) {
        self.accumulator.set_last_event_id(id);
    }

    /// Reconnection delay most recently advertised by the stream.
    pub fn retry(&self) -> Option<Duration> {
        self.accumulator.retry()
    }

    /// Number of complete lines processed so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    fn decode_line<'a>(&self, line: &'a [u8]) -> Result<Cow<'a, str>> {
        match self.utf8_policy {
            Utf8Policy::Strict => std::str::from_utf8(line)
                .map(Cow::Borrowed)
                .map_err(|source| DecodeError::InvalidUtf8 {
                    line: self.lines_read,
                    source,
                }),
            Utf8Policy::Replace => Ok(String::from_utf8_lossy(line)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DispatchPolicy;

    fn drain(decoder: &mut SseDecoder) -> Vec<SseEvent> {
        let mut events = Vec::new();
        while let Some(event) = decoder.next_event().unwrap() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_multiple_events_in_one_chunk() {
        let mut decoder = SseDecoder::default();
        decoder.feed(b"data: a\n\nevent: x\ndata: b\n\n");

        let events = drain(&mut decoder);
        assert_eq!(events, vec![SseEvent::new("message", "a"), SseEvent::new("x", "b")]);
    }

    #[test]
    fn test_events_resume_after_more_input() {
        let mut decoder = SseDecoder::default();
        decoder.feed(b"data: hel");
        assert!(decoder.next_event().unwrap().is_none());

        decoder.feed(b"lo\n");
        assert!(decoder.next_event().unwrap().is_none());

        decoder.feed(b"\n");
        assert_eq!(decoder.next_event().unwrap(), Some(SseEvent::new("message", "hello")));
    }

    #[test]
    fn test_finish_discards_partial_event() {
        let mut decoder = SseDecoder::default();
        decoder.feed(b"data: done\n\ndata: partial\n");

        assert_eq!(drain(&mut decoder).len(), 1);
        decoder.finish();
        assert!(decoder.is_terminated());

        decoder.feed(b"\n");
        assert!(decoder.next_event().unwrap().is_none());
    }

    #[test]
    fn test_strict_utf8_fails_with_line_number() {
        let mut decoder = SseDecoder::default();
        decoder.feed(b"data: ok\ndata: \xFF\xFE\n\n");

        match decoder.next_event() {
            Err(DecodeError::InvalidUtf8 { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected InvalidUtf8, got {:?}", other),
        }
        assert!(decoder.is_terminated());
        assert!(decoder.next_event().unwrap().is_none());
    }

    #[test]
    fn test_replace_utf8_substitutes() {
        let config = DecoderConfig::default().with_utf8_policy(Utf8Policy::Replace);
        let mut decoder = SseDecoder::new(config);
        decoder.feed(b"data: a\xFFb\n\n");

        let event = decoder.next_event().unwrap().unwrap();
        assert_eq!(event.data, "a\u{FFFD}b");
    }

    #[test]
    fn test_multibyte_char_split_across_feeds() {
        let mut decoder = SseDecoder::default();
        let bytes = "data: 21.5 °C\n\n".as_bytes();
        let (a, b) = bytes.split_at(12);
        decoder.feed(a);
        assert!(decoder.next_event().unwrap().is_none());
        decoder.feed(b);

        assert_eq!(decoder.next_event().unwrap().unwrap().data, "21.5 °C");
    }

    #[test]
    fn test_line_too_long_is_terminal() {
        let config = DecoderConfig::default().with_max_line_length(8);
        let mut decoder = SseDecoder::new(config);
        decoder.feed(b"data: 0123456789\n\n");

        assert!(matches!(
            decoder.next_event(),
            Err(DecodeError::LineTooLong { limit: 8 })
        ));
        assert!(decoder.next_event().unwrap().is_none());
    }

    #[test]
    fn test_seeded_last_event_id() {
        let mut decoder = SseDecoder::default();
        decoder.set_last_event_id("41");
        decoder.feed(b"data: x\n\n");

        assert_eq!(decoder.next_event().unwrap().unwrap().id, "41");
        assert_eq!(decoder.last_event_id(), "41");
    }

    #[test]
    fn test_always_policy_counts_blank_lines() {
        let config = DecoderConfig::default().with_dispatch_policy(DispatchPolicy::Always);
        let mut decoder = SseDecoder::new(config);
        decoder.feed(b"\n\n: c\n\n");

        assert_eq!(drain(&mut decoder).len(), 3);
        assert_eq!(decoder.lines_read(), 4);
    }
}
