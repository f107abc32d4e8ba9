#![cfg(unix)]

use std::fs;
use std::io::Cursor;
use tinysh::io_adapters::MemWriter;
use tinysh::{Config, Interpreter, ProcessLauncher, StreamSource};

struct Outcome {
    code: i32,
    stdout: String,
    diagnostics: String,
}

fn run_script(script: &str) -> Outcome {
    let source = StreamSource::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    let (out, out_buf) = MemWriter::with_handle();
    let (diag, diag_buf) = MemWriter::with_handle();
    let code = Interpreter::new(Config::default(), source, ProcessLauncher)
        .with_output(Box::new(out), Box::new(diag))
        .run()
        .expect("interpreter output");
    let stdout = String::from_utf8(out_buf.borrow().clone()).unwrap();
    let diagnostics = String::from_utf8(diag_buf.borrow().clone()).unwrap();
    Outcome {
        code,
        stdout,
        diagnostics,
    }
}

#[test]
fn unknown_command_is_reported_and_session_goes_on() {
    let outcome = run_script("doesnotexist123\ntrue\nexit\n");
    assert_eq!(outcome.code, 0);
    assert!(
        outcome.diagnostics.starts_with("doesnotexist123: "),
        "unexpected diagnostics {:?}",
        outcome.diagnostics
    );
    assert_eq!(outcome.diagnostics.lines().count(), 1);
}

#[test]
fn failing_child_is_not_surfaced() {
    let outcome = run_script("false\nexit\n");
    assert_eq!(outcome.code, 0);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn end_of_input_ends_session_with_newline() {
    let outcome = run_script("true");
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stdout, "\n");
}

#[test]
fn each_child_finishes_before_the_next_starts() {
    let path = std::env::temp_dir().join(format!("tinysh_order_{}", std::process::id()));
    let _ = fs::remove_file(&path);
    let target = path.display().to_string();
    assert!(!target.contains(char::is_whitespace));

    let script = format!(
        "sh -c sleep${{IFS}}1;echo${{IFS}}first>>{target}\n\
         sh -c echo${{IFS}}second>>{target}\n\
         exit\n"
    );
    let outcome = run_script(&script);
    let written = fs::read_to_string(&path).expect("children wrote the file");
    let _ = fs::remove_file(&path);

    assert_eq!(outcome.code, 0);
    assert_eq!(written, "first\nsecond\n");
}
