//! Logging setup for `tinysh` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TINYSH_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `error`
//!
//! Records go to stderr so they never mix with the prompt on stdout.

use std::fmt;
use std::str::FromStr;
use tracing_subscriber::fmt as subscriber;

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "unknown log level `{other}`, expected error, warn, info, debug or trace"
            )),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        f.write_str(name)
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(lvl: LogLevel) -> Self {
        match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Pick the effective level from the flag, then the environment value.
pub fn resolve_level(cli_level: Option<LogLevel>, env_value: Option<&str>) -> LogLevel {
    cli_level
        .or_else(|| env_value.and_then(|s| s.parse().ok()))
        .unwrap_or(LogLevel::Error)
}

/// Initialise the global logging subscriber.
///
/// Call once at startup; a second call panics inside `tracing-subscriber`.
pub fn init_logging(cli_level: Option<LogLevel>) {
    let env_value = std::env::var("TINYSH_LOG").ok();
    let level = resolve_level(cli_level, env_value.as_deref());

    subscriber()
        .with_max_level(tracing::Level::from(level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();
}
