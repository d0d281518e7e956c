//! The `run` and `eval` commands.

use eva_eval::Value;

use super::{evaluate, read_file, report_run_error, RunOptions};

/// Run an Eva source file.
pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    run_source(path, &source, options);
}

/// Run source text given on the command line.
pub fn eval_source(source: &str, options: &RunOptions) {
    run_source("<eval>", source, options);
}

/// Evaluate a whole program, print its value unless it is `null`, and exit
/// with status 1 on any error.
fn run_source(name: &str, source: &str, options: &RunOptions) {
    let mut interp = options.interpreter();
    match evaluate(&mut interp, source) {
        Ok(Value::Null) => {}
        Ok(value) => {
            if !options.quiet {
                println!("{value}");
            }
        }
        Err(e) => {
            report_run_error(name, source, &e, &mut interp);
            std::process::exit(1);
        }
    }
}
