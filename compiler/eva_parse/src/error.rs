//! Reader errors.

use eva_ir::Span;
use thiserror::Error;

/// A failure to read source text into an s-expression.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected `)`")]
    UnexpectedClose { span: Span },

    #[error("unclosed `(`")]
    Unclosed { open: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("unrecognized input `{text}`")]
    InvalidToken { text: String, span: Span },

    #[error("number literal `{text}` is out of range")]
    InvalidNumber { text: String, span: Span },

    #[error("expected a single expression, found more input")]
    TrailingInput { span: Span },

    #[error("expected an expression, found end of input")]
    Empty { span: Span },
}

impl ParseError {
    /// Source location the error points at.
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedClose { span }
            | ParseError::UnterminatedString { span }
            | ParseError::InvalidToken { span, .. }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::TrailingInput { span }
            | ParseError::Empty { span } => *span,
            ParseError::Unclosed { open } => *open,
        }
    }

    /// Short label for the offending span in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            ParseError::UnexpectedClose { .. } => "no matching `(`",
            ParseError::Unclosed { .. } => "this list is never closed",
            ParseError::UnterminatedString { .. } => "string starts here",
            ParseError::InvalidToken { .. } => "not a valid token",
            ParseError::InvalidNumber { .. } => "does not fit a number",
            ParseError::TrailingInput { .. } => "unexpected expression",
            ParseError::Empty { .. } => "expected an expression here",
        }
    }

    /// Whether more input could complete the source (an open list).
    ///
    /// The REPL uses this to keep reading continuation lines.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, ParseError::Unclosed { .. })
    }
}
