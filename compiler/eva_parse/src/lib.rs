//! Eva Parse - turns source text into the s-expression AST.
//!
//! The reader is two small passes: a `logos` lexer producing spanned tokens
//! and a recursive reader assembling them into [`Sexp`] trees. It knows
//! nothing about special forms; `(if)` reads fine and is rejected later by
//! the evaluator.
//!
//! # Entry points
//!
//! - [`parse`]: every top-level expression in the source.
//! - [`parse_expr`]: exactly one expression.
//! - [`parse_program`]: the top-level expressions wrapped in `(begin ...)`,
//!   ready for `Interpreter::eval_global`.

mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::{tokenize, Token, TokenKind};

use eva_ir::{Keyword, Sexp, Span};
use parser::Parser;

/// Read every top-level expression.
pub fn parse(source: &str) -> Result<Vec<Sexp>, ParseError> {
    let tokens = tokenize(source)?;
    Parser::new(source, &tokens).parse_all()
}

/// Read exactly one expression.
pub fn parse_expr(source: &str) -> Result<Sexp, ParseError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(source, &tokens);
    let Some(expr) = parser.parse_next()? else {
        return Err(ParseError::Empty {
            span: Span::from_range(source.len()..source.len()),
        });
    };
    if let Some(extra) = parser.peek_span() {
        return Err(ParseError::TrailingInput { span: extra });
    }
    Ok(expr)
}

/// Read a whole program as a single `(begin ...)` block.
pub fn parse_program(source: &str) -> Result<Sexp, ParseError> {
    let mut items = vec![Sexp::atom(Keyword::Begin.as_str())];
    items.extend(parse(source)?);
    Ok(Sexp::list(items))
}
