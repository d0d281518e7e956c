//! Command handlers for the `eva` CLI.
//!
//! Each submodule implements one command. Option parsing, file reading and
//! error reporting shared between commands live here.

use std::ops::Range;

use ariadne::{Config, Label, Report, ReportKind, Source};
use eva_eval::{EvalError, EvalMode, Interpreter, InterpreterBuilder, Value};
use eva_parse::ParseError;
use thiserror::Error;

mod debug;
mod repl;
mod run;

pub use debug::parse_file;
pub use repl::{run_repl, Repl, ReplOutcome};
pub use run::{eval_source, run_file};

/// Options accepted by `run`, `eval` and `repl`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// `--max-depth=<n>`: cap on nested closure calls.
    pub max_depth: Option<usize>,
    /// `--quiet`: do not echo the program's final value.
    pub quiet: bool,
}

impl RunOptions {
    /// Build an interpreter session configured by these options.
    pub fn interpreter(&self) -> Interpreter {
        let builder = InterpreterBuilder::new().mode(EvalMode::Interpret);
        match self.max_depth {
            Some(depth) => builder.max_call_depth(depth).build(),
            None => builder.build(),
        }
    }
}

/// Split command arguments into options and positional arguments.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Vec<String>), String> {
    let mut options = RunOptions::default();
    let mut positional = Vec::new();
    for arg in args {
        if let Some(depth) = arg.strip_prefix("--max-depth=") {
            let depth = depth
                .parse()
                .map_err(|_| format!("invalid value for --max-depth: '{depth}'"))?;
            options.max_depth = Some(depth);
        } else if arg == "--quiet" || arg == "-q" {
            options.quiet = true;
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((options, positional))
}

/// A failed evaluation of source text.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Read `source` as a program and evaluate it in the session's global scope.
pub fn evaluate(interp: &mut Interpreter, source: &str) -> Result<Value, RunError> {
    let program = eva_parse::parse_program(source)?;
    Ok(interp.eval_global(&program)?)
}

/// Read a source file, exiting with status 1 on failure.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Render a reader error as a labelled source snippet.
pub fn render_parse_error(name: &str, source: &str, error: &ParseError, color: bool) -> String {
    let span = char_range(source, error.span().to_range());
    let mut out = Vec::new();
    let written = Report::build(ReportKind::Error, name, span.start)
        .with_config(Config::default().with_color(color))
        .with_message(error.to_string())
        .with_label(Label::new((name, span)).with_message(error.label()))
        .finish()
        .write((name, Source::from(source)), &mut out);
    match written {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => format!("error: {error}\n"),
    }
}

/// Report a reader error on stderr.
pub(crate) fn report_parse_error(name: &str, source: &str, error: &ParseError) {
    let color = std::io::IsTerminal::is_terminal(&std::io::stderr());
    eprint!("{}", render_parse_error(name, source, error, color));
}

/// Report a runtime error and the calls it unwound through.
pub(crate) fn report_eval_error(error: &EvalError, backtrace: &[std::rc::Rc<str>]) {
    eprintln!("error: {error}");
    for name in backtrace {
        eprintln!("  in {name}");
    }
}

/// Report any failure of [`evaluate`].
pub(crate) fn report_run_error(name: &str, source: &str, error: &RunError, interp: &mut Interpreter) {
    match error {
        RunError::Parse(e) => report_parse_error(name, source, e),
        RunError::Eval(e) => report_eval_error(e, &interp.take_backtrace()),
    }
}

/// Byte range to character range; reports are indexed by character.
fn char_range(source: &str, bytes: Range<usize>) -> Range<usize> {
    let chars_before = |end: usize| {
        source
            .get(..end)
            .map_or_else(|| source.chars().count(), |prefix| prefix.chars().count())
    };
    chars_before(bytes.start)..chars_before(bytes.end)
}

#[cfg(test)]
mod tests;
