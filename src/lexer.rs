//! Splitting a normalized line into the argument vector.

/// Bounded, ordered list of tokens borrowed from the input line.
///
/// Tokens are slices of the line, nothing is copied. The borrow ties the vector
/// to the line it was cut from, so it cannot survive the next read into that
/// buffer. At most `capacity - 1` tokens are held: the last slot is reserved
/// for the end-of-list sentinel, which [`ArgVector::get`] reports as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgVector<'a> {
    args: Vec<&'a str>,
    capacity: usize,
    dropped: usize,
}

impl<'a> ArgVector<'a> {
    fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            args: Vec::with_capacity(capacity - 1),
            capacity,
            dropped: 0,
        }
    }

    /// Number of collected tokens.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Capacity including the sentinel slot.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Tokens that did not fit and were dropped.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Token at `index`; the slot right after the last token is the sentinel.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.args.get(index).copied()
    }

    /// The command name, i.e. token 0.
    pub fn command(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// Everything after the command name.
    pub fn args(&self) -> &[&'a str] {
        self.args.get(1..).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[&'a str] {
        &self.args
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.args.iter().copied()
    }

    fn push(&mut self, token: &'a str) {
        if self.args.len() < self.capacity - 1 {
            self.args.push(token);
        } else {
            self.dropped += 1;
        }
    }
}

fn is_delimiter(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Split `line` on runs of space, tab, carriage return and newline.
///
/// Tokens beyond `capacity - 1` are dropped without error; earlier tokens are
/// kept intact. Blank input yields an empty vector.
pub fn tokenize(line: &str, capacity: usize) -> ArgVector<'_> {
    let mut argv = ArgVector::with_capacity(capacity);
    for token in line.split(is_delimiter).filter(|t| !t.is_empty()) {
        argv.push(token);
    }
    if argv.dropped > 0 {
        tracing::debug!(
            kept = argv.len(),
            dropped = argv.dropped,
            "argument vector full, extra tokens dropped"
        );
    }
    argv
}
