//! The `repl` command.
//!
//! One interpreter session for the whole REPL, so definitions persist
//! between entries. Input is buffered until it reads as complete
//! expressions; a failed entry is reported and the session continues.

use std::io::{self, BufRead, Write};
use std::rc::Rc;

use eva_eval::{EvalError, Interpreter, Value};
use eva_parse::ParseError;

use super::{render_parse_error, report_eval_error, RunOptions};

const PROMPT: &str = "eva> ";
const CONTINUATION: &str = "...> ";

/// Result of feeding one line to the REPL.
#[derive(Debug)]
pub enum ReplOutcome {
    /// Nothing to evaluate (blank line or only comments).
    Empty,
    /// An open list; more lines are needed.
    Incomplete,
    Value(Value),
    Parse { source: String, error: ParseError },
    Eval {
        error: EvalError,
        backtrace: Vec<Rc<str>>,
    },
}

/// Line-oriented front end over one interpreter session.
pub struct Repl {
    interp: Interpreter,
    buffer: String,
}

impl Repl {
    pub fn new(interp: Interpreter) -> Self {
        Repl {
            interp,
            buffer: String::new(),
        }
    }

    /// Whether earlier lines are waiting for more input.
    pub fn is_continuing(&self) -> bool {
        !self.buffer.is_empty()
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interp
    }

    /// Add a line of input and evaluate it once it reads completely.
    pub fn feed(&mut self, line: &str) -> ReplOutcome {
        self.buffer.push_str(line);
        self.buffer.push('\n');

        let exprs = match eva_parse::parse(&self.buffer) {
            Ok(exprs) => exprs,
            Err(error) if error.is_incomplete() => return ReplOutcome::Incomplete,
            Err(error) => {
                let source = std::mem::take(&mut self.buffer);
                return ReplOutcome::Parse { source, error };
            }
        };
        self.buffer.clear();
        if exprs.is_empty() {
            return ReplOutcome::Empty;
        }

        match self.interp.eval_program(&exprs) {
            Ok(value) => ReplOutcome::Value(value),
            Err(error) => ReplOutcome::Eval {
                error,
                backtrace: self.interp.take_backtrace(),
            },
        }
    }
}

/// Read-eval-print loop on stdin until end of input.
pub fn run_repl(options: &RunOptions) {
    println!("Eva {} (type Ctrl-D to exit)", env!("CARGO_PKG_VERSION"));
    let mut repl = Repl::new(options.interpreter());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", if repl.is_continuing() { CONTINUATION } else { PROMPT });
        if io::stdout().flush().is_err() {
            break;
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error reading input: {e}");
                break;
            }
            None => {
                println!();
                break;
            }
        };

        match repl.feed(&line) {
            ReplOutcome::Empty | ReplOutcome::Incomplete | ReplOutcome::Value(Value::Null) => {}
            ReplOutcome::Value(value) => {
                if !options.quiet {
                    println!("{value}");
                }
            }
            ReplOutcome::Parse { source, error } => {
                let color = io::IsTerminal::is_terminal(&io::stderr());
                eprint!("{}", render_parse_error("<repl>", &source, &error, color));
            }
            ReplOutcome::Eval { error, backtrace } => report_eval_error(&error, &backtrace),
        }
    }
}
