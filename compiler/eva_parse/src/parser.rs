//! Recursive reader over the token stream.

use eva_ir::{Sexp, Span};
use eva_stack::ensure_sufficient_stack;

use crate::{ParseError, Token, TokenKind};

/// Reader state: the token slice and a cursor into it.
pub(crate) struct Parser<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Parser {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Read expressions until the tokens run out.
    pub(crate) fn parse_all(&mut self) -> Result<Vec<Sexp>, ParseError> {
        let mut exprs = Vec::new();
        while let Some(expr) = self.parse_next()? {
            exprs.push(expr);
        }
        Ok(exprs)
    }

    /// Read the next expression, or `None` at end of input.
    pub(crate) fn parse_next(&mut self) -> Result<Option<Sexp>, ParseError> {
        match self.bump() {
            Some(token) => self.parse_datum(token).map(Some),
            None => Ok(None),
        }
    }

    /// Span of the next unread token.
    pub(crate) fn peek_span(&self) -> Option<Span> {
        self.tokens.get(self.pos).map(|t| t.span)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn parse_datum(&mut self, token: Token) -> Result<Sexp, ParseError> {
        match token.kind {
            TokenKind::Int(n) => Ok(Sexp::Int(n)),
            TokenKind::Number(n) => Ok(Sexp::Number(n)),
            TokenKind::Str | TokenKind::Symbol => Ok(Sexp::atom(token.text(self.source))),
            TokenKind::LParen => ensure_sufficient_stack(|| self.parse_list(token.span)),
            TokenKind::RParen => Err(ParseError::UnexpectedClose { span: token.span }),
        }
    }

    /// Read list elements up to the matching `)`. The `(` is already consumed.
    fn parse_list(&mut self, open: Span) -> Result<Sexp, ParseError> {
        let mut items = Vec::new();
        loop {
            let Some(token) = self.bump() else {
                return Err(ParseError::Unclosed { open });
            };
            if token.kind == TokenKind::RParen {
                return Ok(Sexp::list(items));
            }
            items.push(self.parse_datum(token)?);
        }
    }
}
