use super::*;
use pretty_assertions::assert_eq;

#[test]
fn identifier_grammar_accepts_operators_and_words() {
    for name in ["x", "count", "_tmp", "x1", "+", "-", ">=", "<=", "=", "*", "/", "42"] {
        assert!(is_identifier(name), "{name} should be an identifier");
    }
}

#[test]
fn identifier_grammar_rejects_other_characters() {
    for name in ["", "a.b", "x!", "\"s\"", "a b", "é", "%"] {
        assert!(!is_identifier(name), "{name} should not be an identifier");
    }
}

#[test]
fn string_literal_strips_quotes() {
    assert_eq!(string_literal("\"hello\""), Some("hello"));
    assert_eq!(string_literal("\"\""), Some(""));
    assert_eq!(string_literal("\"a b c\""), Some("a b c"));
}

#[test]
fn string_literal_requires_both_delimiters() {
    assert_eq!(string_literal("\""), None);
    assert_eq!(string_literal("\"open"), None);
    assert_eq!(string_literal("close\""), None);
    assert_eq!(string_literal("bare"), None);
}

#[test]
fn display_prints_canonical_text() {
    let node = Sexp::list(vec![
        Sexp::atom("if"),
        Sexp::list(vec![Sexp::atom(">"), Sexp::atom("x"), Sexp::int(3)]),
        Sexp::string("yes"),
        Sexp::string("no"),
    ]);
    assert_eq!(node.to_string(), "(if (> x 3) \"yes\" \"no\")");
}

#[test]
fn display_keeps_fractional_numbers() {
    assert_eq!(Sexp::Number(2.5).to_string(), "2.5");
    assert_eq!(Sexp::Number(3.0).to_string(), "3.0");
    assert_eq!(Sexp::int(-7).to_string(), "-7");
    assert_eq!(Sexp::int(i64::MAX).to_string(), "9223372036854775807");
    assert_eq!(Sexp::list(vec![]).to_string(), "()");
}

#[test]
fn accessors() {
    let node = Sexp::list(vec![Sexp::atom("begin"), Sexp::int(1)]);
    assert_eq!(node.as_list().map(<[Sexp]>::len), Some(2));
    assert!(node.as_atom().is_none());
    assert!(Sexp::atom("x").is_atom("x"));
    assert!(Sexp::int(1).as_list().is_none());
}
