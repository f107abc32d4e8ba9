use crate::command::ExitCode;
use crate::lexer::ArgVector;
use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Status of a child whose program image could not be loaded ("command not found").
pub const EXEC_FAILURE_STATUS: ExitCode = 127;

/// A child that ran to completion and has been waited for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reaped {
    pub pid: u32,
    /// Exit code, or `128 + signal` when the child was killed by a signal.
    pub code: ExitCode,
}

/// Every way launching an external command can fail.
///
/// None of these are fatal to the interpreter; the loop reports them and reprompts.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The process could not be duplicated (resource exhaustion). No child exists.
    #[error("fork failed: {0}")]
    Spawn(#[source] io::Error),
    /// The child could not become `command`: not found, not executable, ...
    #[error("{command}: {source}")]
    Exec {
        command: String,
        #[source]
        source: io::Error,
    },
    /// Waiting for the child failed.
    #[error("waitpid: {0}")]
    Wait(#[source] io::Error),
}

impl LaunchError {
    /// Exit status the failed child is considered to have, if a child existed.
    pub fn child_status(&self) -> Option<ExitCode> {
        match self {
            LaunchError::Exec { .. } => Some(EXEC_FAILURE_STATUS),
            LaunchError::Spawn(_) | LaunchError::Wait(_) => None,
        }
    }
}

/// Runs an external command to completion.
///
/// The loop only talks to this trait so tests can substitute a recording fake.
pub trait Launcher {
    /// Start `argv[0]` with the whole vector as its arguments and block until it terminates.
    fn launch(&mut self, argv: &ArgVector<'_>) -> Result<Reaped, LaunchError>;
}

/// Launches real child processes.
///
/// The program is resolved through the ambient `PATH`, the environment and the
/// standard streams are inherited untouched, and the call returns only once
/// that specific child has been reaped.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, argv: &ArgVector<'_>) -> Result<Reaped, LaunchError> {
        let Some(program) = argv.command() else {
            return Err(LaunchError::Exec {
                command: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command"),
            });
        };

        let mut child = Command::new(program)
            .args(argv.args())
            .spawn()
            .map_err(|err| classify_spawn_error(program, err))?;
        let pid = child.id();
        tracing::debug!(pid, program, "child spawned");

        let status = child.wait().map_err(LaunchError::Wait)?;
        let code = match status.code() {
            Some(code) => code,
            None => terminated_by_signal(status),
        };
        tracing::debug!(pid, code, "child reaped");
        Ok(Reaped { pid, code })
    }
}

/// `Command::spawn` reports both a failed fork and a failed exec; tell them apart.
fn classify_spawn_error(program: &str, err: io::Error) -> LaunchError {
    match err.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => LaunchError::Spawn(err),
        _ => LaunchError::Exec {
            command: program.to_owned(),
            source: err,
        },
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}
