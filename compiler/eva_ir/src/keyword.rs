//! Special-form tags.

use std::fmt;

/// The keyword heading a special form.
///
/// A list whose first element is one of these atoms is a special form; any
/// other list is a function application.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Begin,
    Var,
    Set,
    If,
    While,
    Def,
    Switch,
    Lambda,
}

impl Keyword {
    /// All keywords, in evaluator dispatch order.
    pub const ALL: [Keyword; 8] = [
        Keyword::Begin,
        Keyword::Var,
        Keyword::Set,
        Keyword::If,
        Keyword::While,
        Keyword::Def,
        Keyword::Switch,
        Keyword::Lambda,
    ];

    /// Recognize a keyword from atom text.
    pub fn from_atom(text: &str) -> Option<Keyword> {
        match text {
            "begin" => Some(Keyword::Begin),
            "var" => Some(Keyword::Var),
            "set" => Some(Keyword::Set),
            "if" => Some(Keyword::If),
            "while" => Some(Keyword::While),
            "def" => Some(Keyword::Def),
            "switch" => Some(Keyword::Switch),
            "lambda" => Some(Keyword::Lambda),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::Begin => "begin",
            Keyword::Var => "var",
            Keyword::Set => "set",
            Keyword::If => "if",
            Keyword::While => "while",
            Keyword::Def => "def",
            Keyword::Switch => "switch",
            Keyword::Lambda => "lambda",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
