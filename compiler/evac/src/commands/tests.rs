#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use eva_eval::{EvalMode, InterpreterBuilder};
use pretty_assertions::assert_eq;

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

fn test_session() -> Interpreter {
    InterpreterBuilder::new().mode(EvalMode::TestRun).build()
}

#[test]
fn options_and_positionals() {
    let (options, positional) =
        parse_run_options(&args(&["main.eva", "--max-depth=64", "--quiet"])).unwrap();
    assert_eq!(
        options,
        RunOptions {
            max_depth: Some(64),
            quiet: true
        }
    );
    assert_eq!(positional, args(&["main.eva"]));
}

#[test]
fn no_options_is_default() {
    let (options, positional) = parse_run_options(&[]).unwrap();
    assert_eq!(options, RunOptions::default());
    assert!(positional.is_empty());
}

#[test]
fn bad_options_are_rejected() {
    assert_eq!(
        parse_run_options(&args(&["--max-depth=lots"])),
        Err("invalid value for --max-depth: 'lots'".to_string())
    );
    assert_eq!(
        parse_run_options(&args(&["--verbose"])),
        Err("unknown option '--verbose'".to_string())
    );
}

#[test]
fn max_depth_reaches_the_interpreter() {
    let options = RunOptions {
        max_depth: Some(10),
        quiet: false,
    };
    let mut interp = options.interpreter();
    let result = evaluate(&mut interp, "(def down (n) (down n)) (down 1)");
    assert!(matches!(
        result,
        Err(RunError::Eval(EvalError::RecursionLimit { depth: 10 }))
    ));
}

#[test]
fn evaluate_runs_a_program() {
    let mut interp = test_session();
    let result = evaluate(&mut interp, "(var x 2) (def double (n) (* n 2)) (double x)").unwrap();
    assert_eq!(result, Value::Int(4));
}

#[test]
fn evaluate_separates_parse_and_runtime_errors() {
    let mut interp = test_session();
    assert!(matches!(
        evaluate(&mut interp, "(+ 1 2"),
        Err(RunError::Parse(ParseError::Unclosed { .. }))
    ));
    assert!(matches!(
        evaluate(&mut interp, "nope"),
        Err(RunError::Eval(EvalError::UnboundVariable { .. }))
    ));
}

#[test]
fn parse_error_report_points_at_the_span() {
    let source = "(var x 1)\n(print x))";
    let error = eva_parse::parse(source).unwrap_err();
    let report = render_parse_error("main.eva", source, &error, false);
    assert!(report.contains("unexpected `)`"), "{report}");
    assert!(report.contains("main.eva"), "{report}");
    assert!(report.contains("no matching `(`"), "{report}");
}

#[test]
fn char_range_counts_characters() {
    let source = "\"é\" )";
    assert_eq!(char_range(source, 5..6), 4..5);
    assert_eq!(char_range(source, 0..1), 0..1);
    assert_eq!(char_range(source, 100..200), 5..5);
}

#[test]
fn repl_keeps_definitions_between_entries() {
    let mut repl = Repl::new(test_session());
    assert!(matches!(
        repl.feed("(var x 40)"),
        ReplOutcome::Value(Value::Int(40))
    ));
    assert!(matches!(repl.feed("(+ x 2)"), ReplOutcome::Value(Value::Int(42))));
}

#[test]
fn repl_waits_for_unclosed_lists() {
    let mut repl = Repl::new(test_session());
    assert!(matches!(repl.feed("(def add (a b)"), ReplOutcome::Incomplete));
    assert!(repl.is_continuing());
    assert!(matches!(repl.feed("  (+ a b))"), ReplOutcome::Value(_)));
    assert!(!repl.is_continuing());
    assert!(matches!(repl.feed("(add 1 2)"), ReplOutcome::Value(Value::Int(3))));
}

#[test]
fn repl_survives_errors() {
    let mut repl = Repl::new(test_session());
    assert!(matches!(repl.feed(")"), ReplOutcome::Parse { .. }));
    assert!(!repl.is_continuing());
    match repl.feed("(def f () missing) (f)") {
        ReplOutcome::Eval { error, backtrace } => {
            assert_eq!(error, EvalError::unbound("missing"));
            assert_eq!(backtrace.len(), 1);
        }
        other => panic!("expected runtime error, got {other:?}"),
    }
    assert!(matches!(repl.feed("(f)"), ReplOutcome::Eval { .. }));
    assert!(matches!(repl.feed("1"), ReplOutcome::Value(Value::Int(1))));
}

#[test]
fn repl_blank_lines_are_empty() {
    let mut repl = Repl::new(test_session());
    assert!(matches!(repl.feed(""), ReplOutcome::Empty));
    assert!(matches!(repl.feed("// note"), ReplOutcome::Empty));
}

#[test]
fn repl_print_uses_session_handler() {
    let mut repl = Repl::new(test_session());
    assert!(matches!(
        repl.feed(r#"(print "hi")"#),
        ReplOutcome::Value(Value::Null)
    ));
    assert_eq!(repl.interpreter().print_handler().get_output(), "hi\n");
}
