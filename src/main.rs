use argh::FromArgs;
use std::io::IsTerminal;
use tinysh::command::ExitCode;
use tinysh::logging::{self, LogLevel};
use tinysh::{Config, EditorSource, Interpreter, ProcessLauncher, StreamSource};

#[derive(FromArgs)]
/// Read commands line by line and run them, one at a time.
struct Args {
    /// log verbosity: error, warn, info, debug or trace. Defaults to $TINYSH_LOG, then error.
    #[argh(option)]
    log_level: Option<LogLevel>,
}

fn main() {
    let args: Args = argh::from_env();
    logging::init_logging(args.log_level);

    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("tinysh: {err:?}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let config = Config::default();
    let stdin = std::io::stdin();

    if stdin.is_terminal() {
        let source = EditorSource::new()
            .map_err(|err| anyhow::anyhow!("cannot set up the terminal: {err}"))?;
        Interpreter::new(config, source, ProcessLauncher).run()
    } else {
        let source = StreamSource::new(stdin.lock(), std::io::stdout());
        Interpreter::new(config, source, ProcessLauncher).run()
    }
}
