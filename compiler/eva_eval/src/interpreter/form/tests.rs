#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use eva_ir::Sexp;
use pretty_assertions::assert_eq;

use super::*;

fn read(source: &str) -> Sexp {
    eva_parse::parse_expr(source).unwrap()
}

fn unimplemented(source: &str) {
    let node = read(source);
    assert_eq!(
        Form::classify(&node),
        Err(EvalError::UnimplementedForm {
            form: node.to_string()
        }),
        "{source}"
    );
}

#[test]
fn integer_literals_are_exact() {
    assert_eq!(
        Form::classify(&read("9007199254740993")),
        Ok(Form::Int(9_007_199_254_740_993))
    );
    assert_eq!(
        Form::classify(&read("9223372036854775807")),
        Ok(Form::Int(i64::MAX))
    );
    assert_eq!(
        Form::classify(&read("-9223372036854775808")),
        Ok(Form::Int(i64::MIN))
    );
}

#[test]
fn numbers_truncate_toward_zero() {
    assert_eq!(Form::classify(&Sexp::Number(42.0)), Ok(Form::Int(42)));
    assert_eq!(Form::classify(&Sexp::Number(3.9)), Ok(Form::Int(3)));
    assert_eq!(Form::classify(&Sexp::Number(-3.9)), Ok(Form::Int(-3)));
}

#[test]
fn numbers_out_of_range_overflow() {
    assert_eq!(
        Form::classify(&Sexp::Number(1e300)),
        Err(EvalError::IntegerOverflow {
            op: "integer literal"
        })
    );
    assert!(Form::classify(&Sexp::Number(f64::NAN)).is_err());
}

#[test]
fn string_literal_strips_quotes() {
    let node = Sexp::string("hello world");
    assert_eq!(Form::classify(&node), Ok(Form::Str("hello world")));
    let empty = Sexp::string("");
    assert_eq!(Form::classify(&empty), Ok(Form::Str("")));
}

#[test]
fn identifiers_include_operator_symbols() {
    for name in ["x", "count_2", "+", ">=", "VERSION"] {
        let node = Sexp::atom(name);
        assert_eq!(Form::classify(&node), Ok(Form::Ident(name)));
    }
}

#[test]
fn atoms_outside_the_identifier_grammar_are_rejected() {
    unimplemented("foo.bar");
    unimplemented("a?");
}

#[test]
fn keyword_forms() {
    let node = read("(begin 1 2)");
    assert!(matches!(Form::classify(&node), Ok(Form::Block(exprs)) if exprs.len() == 2));

    let node = read("(begin)");
    assert!(matches!(Form::classify(&node), Ok(Form::Block([]))));

    let node = read("(var x 10)");
    assert!(matches!(Form::classify(&node), Ok(Form::Var { name: "x", .. })));

    let node = read("(set x 10)");
    assert!(matches!(Form::classify(&node), Ok(Form::Set { name: "x", .. })));

    let node = read("(if c 1 2)");
    assert!(matches!(Form::classify(&node), Ok(Form::If { .. })));

    let node = read("(while c (set x 1))");
    assert!(matches!(Form::classify(&node), Ok(Form::While { .. })));

    let node = read("(switch (c 1) (else 2))");
    assert_eq!(Form::classify(&node), Ok(Form::Switch));
}

#[test]
fn def_and_lambda_collect_parameters() {
    let node = read("(def add (a b) (+ a b))");
    match Form::classify(&node) {
        Ok(Form::Def { name, params, body }) => {
            assert_eq!(name, "add");
            assert_eq!(params, vec![Rc::<str>::from("a"), Rc::<str>::from("b")]);
            assert_eq!(body.to_string(), "(+ a b)");
        }
        other => panic!("expected def, got {other:?}"),
    }

    let node = read("(lambda () 1)");
    match Form::classify(&node) {
        Ok(Form::Lambda { params, .. }) => assert!(params.is_empty()),
        other => panic!("expected lambda, got {other:?}"),
    }
}

#[test]
fn malformed_keyword_forms() {
    unimplemented("(var x)");
    unimplemented("(var (x) 1)");
    unimplemented("(set 1 2)");
    unimplemented("(if c 1)");
    unimplemented("(while c)");
    unimplemented("(def f x 1)");
    unimplemented("(def f (1) 1)");
    unimplemented("(lambda (x))");
}

#[test]
fn empty_list_is_unimplemented() {
    unimplemented("()");
}

#[test]
fn other_lists_are_applications() {
    let node = read("(square 6)");
    assert!(matches!(
        Form::classify(&node),
        Ok(Form::Apply { callee, args }) if callee.is_atom("square") && args.len() == 1
    ));

    let node = read("((lambda (x) x) 1)");
    assert!(matches!(Form::classify(&node), Ok(Form::Apply { .. })));
}
