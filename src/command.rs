use crate::builtin::Builtin;
use crate::lexer::ArgVector;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// This mirrors the convention used by POSIX shells and many command-line tools.
pub type ExitCode = i32;

/// Where a tokenized command goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Handled in-process.
    Builtin(Builtin),
    /// Handed to the process launcher.
    External,
}

/// Decide how to run `argv` by looking its command name up among the built-ins.
///
/// Returns `None` for an empty vector, which means there is nothing to do.
pub fn dispatch(argv: &ArgVector<'_>) -> Option<Dispatch> {
    let name = argv.command()?;
    Some(match Builtin::lookup(name) {
        Some(builtin) => Dispatch::Builtin(builtin),
        None => Dispatch::External,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn exit_dispatches_to_builtin() {
        let argv = tokenize("exit", 64);
        assert_eq!(dispatch(&argv), Some(Dispatch::Builtin(Builtin::Exit)));
    }

    #[test]
    fn exit_with_arguments_is_still_builtin() {
        let argv = tokenize("exit 1", 64);
        assert_eq!(dispatch(&argv), Some(Dispatch::Builtin(Builtin::Exit)));
    }

    #[test]
    fn other_names_are_external() {
        assert_eq!(dispatch(&tokenize("ls -la", 64)), Some(Dispatch::External));
        assert_eq!(dispatch(&tokenize("Exit", 64)), Some(Dispatch::External));
        assert_eq!(dispatch(&tokenize("/bin/exit", 64)), Some(Dispatch::External));
    }

    #[test]
    fn keyword_only_counts_in_command_position() {
        let argv = tokenize("echo exit", 64);
        assert_eq!(dispatch(&argv), Some(Dispatch::External));
    }

    #[test]
    fn empty_vector_has_nothing_to_dispatch() {
        assert_eq!(dispatch(&tokenize("", 64)), None);
    }
}
