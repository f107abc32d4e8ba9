//! Line sources: where the interpreter gets its input from.

use crate::line::{InputLine, LineTooLong};
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::cell::RefCell;
use std::io::{self, BufRead, Read, Write};
use std::rc::Rc;
use thiserror::Error;

/// Result of one successful read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// A line (possibly empty) is in the buffer.
    Line,
    /// Nothing more will come; the session should end.
    EndOfInput,
}

#[derive(Debug, Error)]
pub enum ReadError {
    /// The line was discarded as a whole; the next read starts on a fresh line.
    #[error(transparent)]
    LineTooLong(#[from] LineTooLong),
    /// The line was discarded because it is not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
    #[error("line editor failed: {0}")]
    Editor(#[from] ReadlineError),
}

impl ReadError {
    /// Whether the session can go on with the next line after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ReadError::LineTooLong(_) | ReadError::InvalidUtf8)
    }
}

/// Blocking source of input lines.
pub trait LineSource {
    /// Show `prompt`, then overwrite `line` with the next line of input.
    ///
    /// The line terminator, if any, is kept.
    fn read_line(&mut self, prompt: &str, line: &mut InputLine) -> Result<ReadOutcome, ReadError>;
}

/// Reads lines from any buffered reader, writing the prompt to `prompt_out`.
///
/// Used for piped input and for tests.
pub struct StreamSource<R, W> {
    input: R,
    prompt_out: W,
}

impl<R: BufRead, W: Write> StreamSource<R, W> {
    pub fn new(input: R, prompt_out: W) -> Self {
        Self { input, prompt_out }
    }

    /// Give back the prompt writer, e.g. to inspect what was shown.
    pub fn into_prompt_out(self) -> W {
        self.prompt_out
    }

    /// Skip everything up to and including the next `\n` without buffering it.
    fn discard_rest_of_line(&mut self) -> io::Result<()> {
        loop {
            let available = self.input.fill_buf()?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => {
                    self.input.consume(pos + 1);
                    return Ok(());
                }
                None => {
                    let len = available.len();
                    self.input.consume(len);
                }
            }
        }
    }
}

impl<R: BufRead, W: Write> LineSource for StreamSource<R, W> {
    fn read_line(&mut self, prompt: &str, line: &mut InputLine) -> Result<ReadOutcome, ReadError> {
        self.prompt_out.write_all(prompt.as_bytes())?;
        self.prompt_out.flush()?;

        line.clear();
        // One byte more than the limit leaves room for the terminator.
        let mut raw = Vec::with_capacity(line.capacity());
        let read = (&mut self.input)
            .take(line.capacity() as u64)
            .read_until(b'\n', &mut raw)?;
        if read == 0 {
            return Ok(ReadOutcome::EndOfInput);
        }

        let terminated = raw.last() == Some(&b'\n');
        if !terminated && raw.len() > line.limit() {
            self.discard_rest_of_line()?;
            return Err(LineTooLong {
                limit: line.limit(),
            }
            .into());
        }

        let text = std::str::from_utf8(&raw).map_err(|_| ReadError::InvalidUtf8)?;
        line.fill(text)?;
        Ok(ReadOutcome::Line)
    }
}

/// Interactive terminal input through `rustyline`.
///
/// History is never recorded.
pub struct EditorSource {
    editor: DefaultEditor,
}

impl EditorSource {
    pub fn new() -> Result<Self, ReadError> {
        let config = EditorConfig::builder().auto_add_history(false).build();
        let editor = DefaultEditor::with_config(config)?;
        Ok(Self { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self, prompt: &str, line: &mut InputLine) -> Result<ReadOutcome, ReadError> {
        line.clear();
        match self.editor.readline(prompt) {
            Ok(text) => {
                line.fill(&text)?;
                Ok(ReadOutcome::Line)
            }
            // Ctrl-C at the prompt ends the session like Ctrl-D does.
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => {
                Ok(ReadOutcome::EndOfInput)
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Memory-backed writer for capturing what the interpreter prints.
#[derive(Default)]
pub struct MemWriter {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl MemWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer and a handle to read the collected bytes afterwards.
    pub fn with_handle() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let writer = MemWriter::new();
        let handle = writer.buf.clone();
        (writer, handle)
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn source(input: &str) -> StreamSource<Cursor<Vec<u8>>, Vec<u8>> {
        StreamSource::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn reads_lines_keeping_the_terminator() {
        let mut src = source("ls -la\npwd\n");
        let mut line = InputLine::with_capacity(64);

        assert_eq!(src.read_line("> ", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "ls -la\n");
        assert_eq!(src.read_line("> ", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "pwd\n");
        assert_eq!(src.read_line("> ", &mut line).unwrap(), ReadOutcome::EndOfInput);
        assert_eq!(src.into_prompt_out(), b"> > > ");
    }

    #[test]
    fn last_line_without_newline_is_still_a_line() {
        let mut src = source("exit");
        let mut line = InputLine::with_capacity(64);
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "exit");
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::EndOfInput);
    }

    #[test]
    fn empty_input_is_end_of_input() {
        let mut src = source("");
        let mut line = InputLine::with_capacity(64);
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::EndOfInput);
        assert!(line.is_empty());
    }

    #[test]
    fn overlong_line_is_reported_and_skipped_entirely() {
        let mut src = source("0123456789abcdef\necho ok\n");
        let mut line = InputLine::with_capacity(8);

        let err = src.read_line("", &mut line).unwrap_err();
        assert!(matches!(err, ReadError::LineTooLong(LineTooLong { limit: 7 })));
        assert!(err.is_recoverable());
        assert!(line.is_empty());

        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "echo ok\n");
    }

    #[test]
    fn line_at_the_limit_fits() {
        let mut src = source("1234567\n12345678");
        let mut line = InputLine::with_capacity(8);
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "1234567\n");
        assert!(matches!(
            src.read_line("", &mut line),
            Err(ReadError::LineTooLong(_))
        ));
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::EndOfInput);
    }

    #[test]
    fn invalid_utf8_is_recoverable() {
        let mut src = StreamSource::new(Cursor::new(b"\xff\xfe\nls\n".to_vec()), Vec::new());
        let mut line = InputLine::with_capacity(64);
        let err = src.read_line("", &mut line).unwrap_err();
        assert!(matches!(err, ReadError::InvalidUtf8));
        assert!(err.is_recoverable());
        assert_eq!(src.read_line("", &mut line).unwrap(), ReadOutcome::Line);
        assert_eq!(line.as_str(), "ls\n");
    }

    #[test]
    fn mem_writer_shares_its_buffer() {
        let (mut writer, handle) = MemWriter::with_handle();
        write!(writer, "tinysh> ").unwrap();
        writer.flush().unwrap();
        assert_eq!(handle.borrow().as_slice(), b"tinysh> ");
    }

    #[test]
    fn io_errors_are_not_recoverable() {
        let err = ReadError::from(io::Error::from(io::ErrorKind::BrokenPipe));
        assert!(!err.is_recoverable());
    }
}
