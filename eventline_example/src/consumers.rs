// Four ways of counting one event type in an SSE fixture
// Each consumer takes its own reader; a consumed stream is never rewound

use anyhow::Result;
use eventline::decoder::{decode_reader, DecoderConfig};
use eventline::payload::{decode_json_case_insensitive, from_str_case_insensitive, EspEvent, EventTypeFilter};
use futures::StreamExt;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Length of the `data: ` prefix sliced off by the line-scanning consumer.
const DATA_PREFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub lines: usize,
    pub lines_decoded: usize,
    pub events: usize,
    pub events_decoded: usize,
}

impl Counts {
    pub fn agree(&self) -> bool {
        self.lines == self.lines_decoded
            && self.lines == self.events
            && self.lines == self.events_decoded
    }
}

/// Line scan: count the line following each exact `event: <type>` line.
///
/// Assumes the payload sits on the very next line, which only holds for
/// single-line events without interleaved comments or ids.
pub async fn count_lines<R>(reader: R, filter: &EventTypeFilter) -> Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut count = 0;
    let mut handle_next = false;

    while let Some(line) = lines.next_line().await? {
        if handle_next {
            count += 1;
        }
        handle_next = filter.matches_event_line(&line);
    }

    Ok(count)
}

/// Line scan plus JSON decoding of the line after `event: <type>`.
pub async fn count_lines_decoded<R>(reader: R, filter: &EventTypeFilter) -> Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    let mut count = 0;
    let mut handle_next = false;

    while let Some(line) = lines.next_line().await? {
        if handle_next {
            let payload = line.get(DATA_PREFIX_LEN..).unwrap_or_default();
            match from_str_case_insensitive::<EspEvent>(payload) {
                Ok(_) => count += 1,
                Err(e) => tracing::warn!(error = %e, "skipping undecodable payload line"),
            }
        }
        handle_next = filter.matches_event_line(&line);
    }

    Ok(count)
}

/// Decoder: count dispatched events of the filtered type.
pub async fn count_events<R>(reader: R, config: DecoderConfig, filter: &EventTypeFilter) -> Result<usize>
where
    R: AsyncRead + Send + 'static,
{
    let mut events = decode_reader(reader, config);
    let mut count = 0;

    while let Some(event) = events.next().await {
        if filter.matches(&event?) {
            count += 1;
        }
    }

    Ok(count)
}

/// Decoder plus JSON decoding of each matching event's data.
pub async fn count_events_decoded<R>(
    reader: R,
    config: DecoderConfig,
    filter: &EventTypeFilter,
) -> Result<usize>
where
    R: AsyncRead + Send + 'static,
{
    let mut events = decode_reader(reader, config);
    let mut count = 0;

    while let Some(event) = events.next().await {
        let event = event?;
        if !filter.matches(&event) {
            continue;
        }
        match decode_json_case_insensitive::<EspEvent>(&event) {
            Ok(record) => {
                tracing::trace!(%record, "decoded");
                count += 1;
            }
            Err(e) => tracing::warn!(error = %e, id = %event.id, "skipping undecodable event"),
        }
    }

    Ok(count)
}
