use std::collections::VecDeque;

use crate::error::{DecodeError, Result};

const LF: u8 = b'\n';
const CR: u8 = b'\r';
const BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BomState {
    /// Nothing decided yet, the stream may still open with a BOM
    Pending,
    Done,
}

/// Circular buffer that frames incoming bytes into lines.
///
/// Lines end at `\n`; a `\r` directly before the `\n` is dropped. A lone `\r`
/// stays part of the line. Chunk boundaries are irrelevant: a line split
/// across any number of `extend` calls comes out whole.
#[derive(Debug)]
pub struct LineBuffer {
    buffer: VecDeque<u8>,
    /// Prefix of `buffer` already searched without finding a terminator
    scanned: usize,
    max_line_length: Option<usize>,
    bom: BomState,
}

impl LineBuffer {
    /// Create a new buffer with specified capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            scanned: 0,
            max_line_length: None,
            bom: BomState::Pending,
        }
    }

    pub fn with_max_line_length(mut self, limit: Option<usize>) -> Self {
        self.max_line_length = limit;
        self
    }

    /// Add bytes to the buffer
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Extract the next complete line, terminator stripped.
    ///
    /// Returns `None` if no complete line is buffered yet.
    pub fn next_line(&mut self) -> Option<Result<Vec<u8>>> {
        if self.bom == BomState::Pending && !self.skip_bom() {
            return None;
        }

        let Some(newline_pos) = self.find_newline() else {
            self.scanned = self.buffer.len();
            return self.check_partial_len().err().map(Err);
        };

        let mut line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
        self.scanned = 0;
        line.pop();
        if line.last() == Some(&CR) {
            line.pop();
        }

        if let Some(limit) = self.max_line_length {
            if line.len() > limit {
                return Some(Err(DecodeError::LineTooLong { limit }));
            }
        }

        Some(Ok(line))
    }

    /// Drop everything buffered, returning how many bytes were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.buffer.len();
        self.buffer = VecDeque::new();
        self.scanned = 0;
        discarded
    }

    /// Current buffer size
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns false while the buffered prefix is still ambiguous.
    fn skip_bom(&mut self) -> bool {
        let prefix_len = self.buffer.len().min(BOM.len());
        let is_bom_prefix = self
            .buffer
            .iter()
            .take(prefix_len)
            .zip(BOM.iter())
            .all(|(a, b)| a == b);

        if is_bom_prefix && prefix_len < BOM.len() {
            return false;
        }
        if is_bom_prefix {
            self.buffer.drain(..BOM.len());
        }
        self.bom = BomState::Done;
        true
    }

    fn find_newline(&self) -> Option<usize> {
        let (front, back) = self.buffer.as_slices();
        let start = self.scanned;

        if start < front.len() {
            if let Some(i) = memchr::memchr(LF, &front[start..]) {
                return Some(start + i);
            }
            memchr::memchr(LF, back).map(|i| front.len() + i)
        } else {
            let offset = start - front.len();
            memchr::memchr(LF, &back[offset..]).map(|i| start + i)
        }
    }

    // One extra byte is allowed for a `\r` that may turn out to precede `\n`.
    fn check_partial_len(&self) -> Result<()> {
        match self.max_line_length {
            Some(limit) if self.buffer.len() > limit.saturating_add(1) => {
                Err(DecodeError::LineTooLong { limit })
            }
            _ => Ok(()),
        }
    }
}
