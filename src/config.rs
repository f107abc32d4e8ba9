//! Fixed capacities and the prompt used by the interpreter loop.

/// Prompt written before every read.
pub const PROMPT: &str = "tinysh> ";

/// Capacity of the input line buffer, terminator slot included.
///
/// A line may therefore carry at most `LINE_CAPACITY - 1` bytes of content.
pub const LINE_CAPACITY: usize = 1024;

/// Capacity of the argument vector, sentinel slot included.
///
/// At most `ARG_CAPACITY - 1` tokens are collected per line; the rest are dropped.
pub const ARG_CAPACITY: usize = 64;

/// Knobs of a single interpreter session.
///
/// There is no configuration file: a binary always runs with [`Config::default`],
/// tests shrink the capacities to exercise the overflow paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub prompt: String,
    pub line_capacity: usize,
    pub arg_capacity: usize,
}

impl Config {
    /// Build a config, clamping both capacities so one byte and one token always fit.
    pub fn new(prompt: impl Into<String>, line_capacity: usize, arg_capacity: usize) -> Self {
        Self {
            prompt: prompt.into(),
            line_capacity: line_capacity.max(2),
            arg_capacity: arg_capacity.max(2),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(PROMPT, LINE_CAPACITY, ARG_CAPACITY)
    }
}
