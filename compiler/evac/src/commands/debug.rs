//! The `parse` command: show how the reader sees a file.

use super::{read_file, report_parse_error};

/// Print every top-level expression of a file in canonical form.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    match eva_parse::parse(&source) {
        Ok(exprs) => {
            for expr in &exprs {
                println!("{expr}");
            }
            println!();
            println!("{} top-level expression(s)", exprs.len());
        }
        Err(e) => {
            report_parse_error(path, &source, &e);
            std::process::exit(1);
        }
    }
}
