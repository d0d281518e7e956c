//! Token definitions and the `logos`-driven tokenizer.

use eva_ir::Span;
use logos::Logos;

use crate::ParseError;

/// Raw token from logos, before comment filtering.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // Both win over `Symbol` on equal-length matches such as `-5`.
    #[regex(r"-?[0-9]+", priority = 3)]
    Integer,

    #[regex(r"-?[0-9]+\.[0-9]+", priority = 3)]
    Fraction,

    #[regex(r#""[^"]*""#)]
    Str,

    #[regex(r#"[^\s()"]+"#)]
    Symbol,
}

/// Kind of a significant token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    Int(i64),
    Number(f64),
    /// Quoted string; the token text includes both quotes.
    Str,
    Symbol,
}

/// A significant token and its location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Source text covered by this token.
    pub fn text(self, source: &str) -> &str {
        source.get(self.span.to_range()).unwrap_or_default()
    }
}

/// Tokenize `source`, dropping whitespace and comments.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokens = Vec::new();
    for (raw, range) in RawToken::lexer(source).spanned() {
        let span = Span::from_range(range.clone());
        let text = &source[range];
        let kind = match raw {
            Ok(RawToken::LineComment | RawToken::BlockComment) => continue,
            Ok(RawToken::LParen) => TokenKind::LParen,
            Ok(RawToken::RParen) => TokenKind::RParen,
            Ok(RawToken::Integer) => TokenKind::Int(parse_integer(text, span)?),
            Ok(RawToken::Fraction) => TokenKind::Number(parse_fraction(text, span)?),
            Ok(RawToken::Str) => TokenKind::Str,
            Ok(RawToken::Symbol) => TokenKind::Symbol,
            Err(()) if text.starts_with('"') => {
                return Err(ParseError::UnterminatedString { span });
            }
            Err(()) => {
                return Err(ParseError::InvalidToken {
                    text: text.to_string(),
                    span,
                });
            }
        };
        tokens.push(Token { kind, span });
    }
    Ok(tokens)
}

fn parse_integer(text: &str, span: Span) -> Result<i64, ParseError> {
    text.parse().map_err(|_| ParseError::InvalidNumber {
        text: text.to_string(),
        span,
    })
}

fn parse_fraction(text: &str, span: Span) -> Result<f64, ParseError> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(ParseError::InvalidNumber {
            text: text.to_string(),
            span,
        }),
    }
}
