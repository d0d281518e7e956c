//! The s-expression tree.

use std::fmt;
use std::rc::Rc;

/// An AST node.
///
/// Lists are reference counted so a closure can keep its body alive without
/// copying the subtree, and so the desugaring pass can reuse untouched
/// branches.
#[derive(Clone, Debug, PartialEq)]
pub enum Sexp {
    /// Integer literal token, read exactly.
    Int(i64),
    /// Fractional literal token. The evaluator truncates it to an integer.
    Number(f64),
    /// Raw atom token: an identifier, or a string literal still wrapped in
    /// its quote characters.
    Atom(Rc<str>),
    /// Parenthesized sequence.
    List(Rc<[Sexp]>),
}

impl Sexp {
    /// Build an atom node.
    pub fn atom(text: &str) -> Self {
        Sexp::Atom(Rc::from(text))
    }

    /// Build a list node.
    pub fn list(items: Vec<Sexp>) -> Self {
        Sexp::List(Rc::from(items))
    }

    /// Build an integer literal node.
    pub fn int(n: i64) -> Self {
        Sexp::Int(n)
    }

    /// Build a string-literal atom, adding the quote delimiters.
    pub fn string(content: &str) -> Self {
        Sexp::Atom(Rc::from(format!("\"{content}\"")))
    }

    /// Atom text, if this is an atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Sexp::Atom(text) => Some(text),
            _ => None,
        }
    }

    /// List elements, if this is a list.
    pub fn as_list(&self) -> Option<&[Sexp]> {
        match self {
            Sexp::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is the atom `text`.
    pub fn is_atom(&self, text: &str) -> bool {
        self.as_atom() == Some(text)
    }

}

/// Whether `text` is a bare identifier: non-empty, made only of ASCII
/// letters, digits, `_` and the operator characters `+ - * / < > =`.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"_+-*/<>=".contains(&b))
}

/// Content of a string-literal token: the text between a leading and a
/// trailing `"`. Returns `None` for anything else, including a lone `"`.
pub fn string_literal(text: &str) -> Option<&str> {
    if text.len() >= 2 {
        text.strip_prefix('"')?.strip_suffix('"')
    } else {
        None
    }
}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sexp::Int(n) => write!(f, "{n}"),
            // Integral values keep a fraction so they read back as `Number`.
            Sexp::Number(n) if n.fract() == 0.0 => write!(f, "{n:.1}"),
            Sexp::Number(n) => write!(f, "{n}"),
            Sexp::Atom(text) => f.write_str(text),
            Sexp::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}

#[cfg(test)]
mod tests;
