// Decoder configuration
// Deserializable so it can be embedded in an application's own settings file

use serde::{Deserialize, Serialize};

/// When a blank line turns the pending event into an emitted one.
///
/// The accumulator is reset on every blank line regardless of the policy;
/// the policy only decides whether the snapshot reaches the consumer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Emit when at least one `event`, `data`, `id` or `retry` line was seen
    /// since the previous blank line.
    #[default]
    FieldsSeen,
    /// Emit on every blank line, including runs of consecutive blank lines.
    Always,
    /// Emit only when at least one `data` line was seen.
    DataOnly,
}

/// What to do with bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utf8Policy {
    /// Fail the sequence with [`DecodeError::InvalidUtf8`](crate::DecodeError::InvalidUtf8).
    #[default]
    Strict,
    /// Substitute U+FFFD for each invalid sequence and carry on.
    Replace,
}

pub const DEFAULT_READ_CHUNK_SIZE: usize = 8192;
pub const DEFAULT_INITIAL_CAPACITY: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    pub dispatch_policy: DispatchPolicy,
    pub utf8_policy: Utf8Policy,
    /// Upper bound on a single line, terminator excluded. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<usize>,
    /// Bytes requested per read by the reader-based front-ends.
    pub read_chunk_size: usize,
    /// Initial capacity of the line buffer.
    pub initial_capacity: usize,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dispatch_policy: DispatchPolicy::default(),
            utf8_policy: Utf8Policy::default(),
            max_line_length: None,
            read_chunk_size: DEFAULT_READ_CHUNK_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
        }
    }
}

impl DecoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dispatch_policy(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch_policy = policy;
        self
    }

    pub fn with_utf8_policy(mut self, policy: Utf8Policy) -> Self {
        self.utf8_policy = policy;
        self
    }

    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = Some(limit);
        self
    }

    /// Chunk size for reader-based decoding. Zero is bumped to one.
    pub fn with_read_chunk_size(mut self, size: usize) -> Self {
        self.read_chunk_size = size.max(1);
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }
}
