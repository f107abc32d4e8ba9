use crate::builtin::Flow;
use crate::command::{Dispatch, ExitCode, dispatch};
use crate::config::Config;
use crate::external::Launcher;
use crate::io_adapters::{LineSource, ReadOutcome};
use crate::lexer::tokenize;
use crate::line::InputLine;
use std::fmt::Display;
use std::io::Write;

/// What the loop does after one iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Stop(ExitCode),
}

/// The read, normalize, tokenize, dispatch loop.
///
/// The interpreter owns its line buffer for the whole session and rebuilds the
/// argument vector from it on every iteration. Input comes from a [`LineSource`]
/// and external commands go to a [`Launcher`], so both can be faked in tests.
///
/// Example
/// ```
/// use std::io::Cursor;
/// use tinysh::{Config, Interpreter, ProcessLauncher, StreamSource};
///
/// let source = StreamSource::new(Cursor::new(b"\n   \nexit\n".to_vec()), Vec::new());
/// let mut sh = Interpreter::new(Config::default(), source, ProcessLauncher);
/// assert_eq!(sh.run().unwrap(), 0);
/// ```
pub struct Interpreter<S, L> {
    config: Config,
    source: S,
    launcher: L,
    stdout: Box<dyn Write>,
    diagnostics: Box<dyn Write>,
}

impl<S: LineSource, L: Launcher> Interpreter<S, L> {
    /// Create an interpreter writing to the process's stdout and stderr.
    pub fn new(config: Config, source: S, launcher: L) -> Self {
        Self {
            config,
            source,
            launcher,
            stdout: Box::new(std::io::stdout()),
            diagnostics: Box::new(std::io::stderr()),
        }
    }

    /// Redirect the interpreter's own output: the trailing newline at end of
    /// input goes to `stdout`, failure reports go to `diagnostics`.
    pub fn with_output(mut self, stdout: Box<dyn Write>, diagnostics: Box<dyn Write>) -> Self {
        self.stdout = stdout;
        self.diagnostics = diagnostics;
        self
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn into_parts(self) -> (S, L) {
        (self.source, self.launcher)
    }

    /// Run until `exit`, end of input, or an unrecoverable read error.
    ///
    /// Returns 0 on normal termination and 1 when the input stream broke.
    /// `Err` only comes back when the interpreter cannot write its own output.
    pub fn run(&mut self) -> anyhow::Result<ExitCode> {
        let mut line = InputLine::with_capacity(self.config.line_capacity);
        tracing::info!(prompt = %self.config.prompt, "session started");
        loop {
            if let Step::Stop(code) = self.step(&mut line)? {
                tracing::info!(code, "session finished");
                return Ok(code);
            }
        }
    }

    fn step(&mut self, line: &mut InputLine) -> anyhow::Result<Step> {
        match self.source.read_line(&self.config.prompt, line) {
            Ok(ReadOutcome::Line) => {}
            Ok(ReadOutcome::EndOfInput) => {
                writeln!(self.stdout)?;
                self.stdout.flush()?;
                return Ok(Step::Stop(0));
            }
            Err(err) if err.is_recoverable() => {
                self.report(&err)?;
                return Ok(Step::Next);
            }
            Err(err) => {
                self.report(&err)?;
                return Ok(Step::Stop(1));
            }
        }

        line.normalize();
        if line.is_empty() {
            return Ok(Step::Next);
        }

        let argv = tokenize(line.as_str(), self.config.arg_capacity);
        tracing::debug!(argv = ?argv.as_slice(), "line tokenized");
        let Some(target) = dispatch(&argv) else {
            return Ok(Step::Next);
        };

        match target {
            Dispatch::Builtin(builtin) => {
                tracing::debug!(builtin = builtin.name(), "running builtin");
                match builtin.run(argv.args()) {
                    Flow::Continue => Ok(Step::Next),
                    Flow::Exit => Ok(Step::Stop(0)),
                }
            }
            Dispatch::External => {
                // Anything still buffered must reach the terminal before the child writes.
                self.stdout.flush()?;
                match self.launcher.launch(&argv) {
                    Ok(reaped) => {
                        tracing::debug!(pid = reaped.pid, code = reaped.code, "command finished");
                    }
                    Err(err) => {
                        if let Some(status) = err.child_status() {
                            tracing::debug!(status, "child could not run the command");
                        }
                        self.report(&err)?;
                    }
                }
                Ok(Step::Next)
            }
        }
    }

    fn report(&mut self, err: &dyn Display) -> anyhow::Result<()> {
        tracing::warn!(error = %err, "failure reported");
        writeln!(self.diagnostics, "{err}")?;
        self.diagnostics.flush()?;
        Ok(())
    }
}
