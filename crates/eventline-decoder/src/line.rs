//! Field-level interpretation of a single framed line.

/// Field names the decoder acts on. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Event,
    Data,
    Id,
    Retry,
    Unknown,
}

impl FieldName {
    pub fn parse(name: &str) -> Self {
        match name {
            "event" => FieldName::Event,
            "data" => FieldName::Data,
            "id" => FieldName::Id,
            "retry" => FieldName::Retry,
            _ => FieldName::Unknown,
        }
    }
}

/// A decoded line, borrowing from the line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank line: dispatch the pending event
    Dispatch,
    /// Starts with `:`
    Comment,
    Field { name: FieldName, value: &'a str },
}

impl<'a> Line<'a> {
    pub fn parse(line: &'a str) -> Self {
        if line.is_empty() {
            return Line::Dispatch;
        }

        match line.split_once(':') {
            Some(("", _)) => Line::Comment,
            Some((name, value)) => Line::Field {
                name: FieldName::parse(name),
                value: value.strip_prefix(' ').unwrap_or(value),
            },
            None => Line::Field {
                name: FieldName::parse(line),
                value: "",
            },
        }
    }
}
