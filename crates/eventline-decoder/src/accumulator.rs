use std::time::Duration;

use crate::config::DispatchPolicy;
use crate::event::{SseEvent, DEFAULT_EVENT_TYPE};
use crate::line::{FieldName, Line};

/// Pending event state carried between blank lines.
///
/// `id` and `retry` survive a dispatch, everything else is reset.
#[derive(Debug, Clone)]
pub struct EventAccumulator {
    event_type: String,
    data_lines: Vec<String>,
    id: String,
    retry: Option<Duration>,
    fields_seen: bool,
    policy: DispatchPolicy,
}

impl Default for EventAccumulator {
    fn default() -> Self {
        Self::new(DispatchPolicy::default())
    }
}

impl EventAccumulator {
    pub fn new(policy: DispatchPolicy) -> Self {
        Self {
            event_type: DEFAULT_EVENT_TYPE.to_string(),
            data_lines: Vec::new(),
            id: String::new(),
            retry: None,
            fields_seen: false,
            policy,
        }
    }

    /// Apply one parsed line. Returns an event when the line was blank and
    /// the dispatch policy lets the snapshot through.
    pub fn apply(&mut self, line: Line<'_>) -> Option<SseEvent> {
        match line {
            Line::Dispatch => self.dispatch(),
            Line::Comment => None,
            Line::Field { name, value } => {
                self.set_field(name, value);
                None
            }
        }
    }

    fn set_field(&mut self, name: FieldName, value: &str) {
        match name {
            FieldName::Event => {
                self.event_type.clear();
                self.event_type.push_str(value);
            }
            FieldName::Data => self.data_lines.push(value.to_string()),
            FieldName::Id => {
                if value.contains('\0') {
                    tracing::trace!("ignoring id containing NUL");
                } else if !value.is_empty() || self.id.is_empty() {
                    self.id.clear();
                    self.id.push_str(value);
                }
            }
            FieldName::Retry => match parse_retry(value) {
                Some(millis) => self.retry = Some(Duration::from_millis(millis)),
                None => tracing::trace!(value, "ignoring invalid retry"),
            },
            FieldName::Unknown => return,
        }
        self.fields_seen = true;
    }

    /// Snapshot and reset. The reset happens even when nothing is emitted.
    pub fn dispatch(&mut self) -> Option<SseEvent> {
        let emit = match self.policy {
            DispatchPolicy::FieldsSeen => self.fields_seen,
            DispatchPolicy::Always => true,
            DispatchPolicy::DataOnly => !self.data_lines.is_empty(),
        };

        let event_type = std::mem::replace(&mut self.event_type, DEFAULT_EVENT_TYPE.to_string());
        let data_lines = std::mem::take(&mut self.data_lines);
        self.fields_seen = false;

        if !emit {
            return None;
        }

        Some(SseEvent {
            event_type,
            data: data_lines.join("\n"),
            id: self.id.clone(),
            retry: self.retry,
        })
    }

    /// Drop the pending event (end of stream). Returns whether anything was pending.
    pub fn discard(&mut self) -> bool {
        let pending = self.fields_seen;
        self.event_type.clear();
        self.event_type.push_str(DEFAULT_EVENT_TYPE);
        self.data_lines.clear();
        self.fields_seen = false;
        pending
    }

    pub fn last_event_id(&self) -> &str {
        &self.id
    }

    pub fn set_last_event_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn retry(&self) -> Option<Duration> {
        self.retry
    }
}

/// Base-10 digits only; no sign, no whitespace, must fit in `u64`.
fn parse_retry(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(acc: &mut EventAccumulator, lines: &[&str]) -> Vec<SseEvent> {
        lines
            .iter()
            .filter_map(|l| acc.apply(Line::parse(l)))
            .collect()
    }

    #[test]
    fn test_event_and_data() {
        let mut acc = EventAccumulator::default();
        let events = feed(&mut acc, &["event: state", "data: {\"a\":1}", ""]);

        assert_eq!(events, vec![SseEvent::new("state", "{\"a\":1}")]);
    }

    #[test]
    fn test_event_type_resets_after_dispatch() {
        let mut acc = EventAccumulator::default();
        let events = feed(&mut acc, &["event: a", "data: 1", "", "data: 2", ""]);

        assert_eq!(events[0].event_type, "a");
        assert_eq!(events[1].event_type, "message");
    }

    #[test]
    fn test_empty_event_field_gives_empty_type() {
        let mut acc = EventAccumulator::default();
        let events = feed(&mut acc, &["event:", "data: x", ""]);

        assert_eq!(events[0].event_type, "");
    }

    #[test]
    fn test_id_and_retry_persist() {
        let mut acc = EventAccumulator::default();
        let events = feed(&mut acc, &["id: 5", "retry: 2500", "data: a", "", "data: b", ""]);

        assert_eq!(events[1].id, "5");
        assert_eq!(events[1].retry, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn test_id_with_nul_is_ignored() {
        let mut acc = EventAccumulator::default();
        feed(&mut acc, &["id: 5", "id: \0bad"]);

        assert_eq!(acc.last_event_id(), "5");
    }

    #[test]
    fn test_empty_id_does_not_overwrite() {
        let mut acc = EventAccumulator::default();
        feed(&mut acc, &["id: 5", "id:", "id"]);

        assert_eq!(acc.last_event_id(), "5");
    }

    #[test]
    fn test_invalid_retry_values() {
        for value in ["-1", "+5", "1.5", " 10", "abc", "", "99999999999999999999999"] {
            let mut acc = EventAccumulator::default();
            acc.apply(Line::Field {
                name: FieldName::Retry,
                value,
            });
            assert_eq!(acc.retry(), None, "retry {:?} should be ignored", value);
        }
    }

    #[test]
    fn test_invalid_retry_keeps_previous() {
        let mut acc = EventAccumulator::default();
        feed(&mut acc, &["retry: 100", "retry: soon"]);

        assert_eq!(acc.retry(), Some(Duration::from_millis(100)));
    }

    #[test]
    fn test_fields_seen_policy() {
        let mut acc = EventAccumulator::new(DispatchPolicy::FieldsSeen);
        let events = feed(&mut acc, &["", ": ping", "", "foo: bar", "", "event: x", ""]);

        assert_eq!(events, vec![SseEvent::new("x", "")]);
    }

    #[test]
    fn test_always_policy() {
        let mut acc = EventAccumulator::new(DispatchPolicy::Always);
        let events = feed(&mut acc, &["", "", "data: x", ""]);

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], SseEvent::new("message", ""));
    }

    #[test]
    fn test_data_only_policy_still_resets() {
        let mut acc = EventAccumulator::new(DispatchPolicy::DataOnly);
        let events = feed(&mut acc, &["event: x", "", "data: y", ""]);

        assert_eq!(events, vec![SseEvent::new("message", "y")]);
    }

    #[test]
    fn test_discard_reports_pending() {
        let mut acc = EventAccumulator::default();
        assert!(!acc.discard());

        feed(&mut acc, &["data: partial"]);
        assert!(acc.discard());
        assert!(acc.dispatch().is_none());
    }
}
