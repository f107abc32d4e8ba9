//! A minimal interactive command interpreter.
//!
//! Each iteration reads one line, strips the line terminator and surrounding
//! blanks, splits it into a bounded argument vector and either handles it as a
//! built-in (`exit`) or runs it as an external program, waiting for that child
//! before prompting again.
//!
//! The main entry point is [`Interpreter`]. Input comes through a
//! [`LineSource`] and external programs are started by a [`Launcher`]; both are
//! traits so the loop can be driven in tests without a terminal or real
//! processes.

pub mod builtin;
pub mod command;
pub mod config;
pub mod external;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod line;
pub mod logging;

pub use config::Config;
pub use external::{LaunchError, Launcher, ProcessLauncher, Reaped};
pub use interpreter::Interpreter;
pub use io_adapters::{EditorSource, LineSource, ReadError, ReadOutcome, StreamSource};
