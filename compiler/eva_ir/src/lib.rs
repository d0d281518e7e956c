//! Eva IR - AST types shared by the reader, the desugaring pass and the
//! evaluator.
//!
//! The AST is deliberately the raw s-expression tree: a node is a number, an
//! atom (identifier or quoted string token, kept verbatim) or a list. Deciding
//! which special form a list denotes is the evaluator's job.

mod keyword;
mod sexp;
mod span;

pub use keyword::Keyword;
pub use sexp::{is_identifier, string_literal, Sexp};
pub use span::Span;
