//! The bounded input line buffer and its in-place normalization.

use thiserror::Error;

/// Raised when a line does not fit the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("line too long (limit is {limit} bytes)")]
pub struct LineTooLong {
    pub limit: usize,
}

/// Mutable, fixed-capacity buffer holding one line of input.
///
/// The buffer is allocated once per session and overwritten on every read.
/// `capacity` counts the terminator slot, so the content never exceeds
/// `capacity - 1` bytes (not counting a trailing `\n`, which the reader keeps
/// and [`InputLine::normalize`] removes).
#[derive(Debug, Clone)]
pub struct InputLine {
    buf: String,
    capacity: usize,
}

impl InputLine {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            buf: String::with_capacity(capacity),
            capacity,
        }
    }

    /// Total capacity, terminator slot included.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest number of content bytes a line may carry.
    pub fn limit(&self) -> usize {
        self.capacity - 1
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Overwrite the buffer with `raw`, which may end with its line terminator.
    ///
    /// On overflow the buffer is left empty and nothing of `raw` is kept.
    pub fn fill(&mut self, raw: &str) -> Result<(), LineTooLong> {
        self.buf.clear();
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        if content.len() > self.limit() {
            return Err(LineTooLong {
                limit: self.limit(),
            });
        }
        self.buf.push_str(raw);
        Ok(())
    }

    /// Strip one trailing `\n`, then leading and trailing spaces and tabs.
    ///
    /// Works in place: leading blanks are drained from the front and trailing
    /// ones truncated, no new allocation happens.
    pub fn normalize(&mut self) {
        if self.buf.ends_with('\n') {
            self.buf.pop();
        }

        let leading = self.buf.len() - self.buf.trim_start_matches(is_blank).len();
        if leading > 0 {
            self.buf.drain(..leading);
        }

        let kept = self.buf.trim_end_matches(is_blank).len();
        self.buf.truncate(kept);
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
