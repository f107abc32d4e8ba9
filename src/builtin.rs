//! Commands handled by the loop itself instead of a child process.

/// What the loop should do once a command has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Closed set of built-in commands known at compile time.
///
/// Adding a built-in means adding a variant, its name in [`Builtin::ALL`]
/// and an arm in [`Builtin::run`]; the loop itself does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Leave the interpreter. Arguments are ignored.
    Exit,
}

impl Builtin {
    pub const ALL: [Builtin; 1] = [Builtin::Exit];

    /// Canonical name, matched exactly and case-sensitively.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
        }
    }

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn run(self, _args: &[&str]) -> Flow {
        match self {
            Builtin::Exit => Flow::Exit,
        }
    }
}
