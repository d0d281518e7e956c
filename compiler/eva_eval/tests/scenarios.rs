//! End-to-end programs through the reader and the interpreter.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use eva_eval::{EvalError, EvalMode, Interpreter, InterpreterBuilder, Value};
use pretty_assertions::assert_eq;

fn session() -> Interpreter {
    InterpreterBuilder::new().mode(EvalMode::TestRun).build()
}

fn run(interp: &mut Interpreter, source: &str) -> Result<Value, EvalError> {
    let program = eva_parse::parse_program(source).unwrap();
    interp.eval_global(&program)
}

#[test]
fn variable_declaration_then_lookup() {
    let mut interp = session();
    run(&mut interp, "(var x 10)").unwrap();
    assert_eq!(run(&mut interp, "x"), Ok(Value::Int(10)));
}

#[test]
fn function_definition_then_call() {
    let mut interp = session();
    run(&mut interp, "(def square (x) (* x x))").unwrap();
    assert_eq!(run(&mut interp, "(square 6)"), Ok(Value::Int(36)));
}

#[test]
fn closure_mutates_outer_scope() {
    let mut interp = session();
    let source = "
        (var count 0)
        (def inc () (set count (+ count 1)))
        (inc)
        (inc)";
    assert_eq!(run(&mut interp, source), Ok(Value::Int(2)));
    assert_eq!(run(&mut interp, "count"), Ok(Value::Int(2)));
}

#[test]
fn conditional_with_string_literals() {
    let mut interp = session();
    assert_eq!(
        run(&mut interp, r#"(if (> 5 3) "yes" "no")"#),
        Ok(Value::string("yes"))
    );
}

#[test]
fn while_loop_counts_to_three() {
    let mut interp = session();
    let source = "
        (var i 0)
        (var runs 0)
        (while (< i 3)
            (begin
                (set i (+ i 1))
                (set runs (+ runs 1))))
        i";
    assert_eq!(run(&mut interp, source), Ok(Value::Int(3)));
    assert_eq!(run(&mut interp, "runs"), Ok(Value::Int(3)));
}

#[test]
fn undefined_name_aborts_the_program() {
    let mut interp = session();
    let result = run(&mut interp, r#"(print "before") undefined_name (print "after")"#);
    assert_eq!(
        result,
        Err(EvalError::UnboundVariable {
            name: "undefined_name".to_string()
        })
    );
    assert_eq!(interp.print_handler().get_output(), "before\n");
}

#[test]
fn session_continues_after_a_failed_evaluation() {
    let mut interp = session();
    run(&mut interp, "(var kept 1)").unwrap();
    assert!(run(&mut interp, "(set kept (+ kept missing))").is_err());
    assert_eq!(run(&mut interp, "kept"), Ok(Value::Int(1)));
}

#[test]
fn fibonacci() {
    let mut interp = session();
    let source = "
        (def fib (n)
            (if (< n 2)
                n
                (+ (fib (- n 1)) (fib (- n 2)))))
        (fib 20)";
    assert_eq!(run(&mut interp, source), Ok(Value::Int(6765)));
}

#[test]
fn counter_objects_do_not_share_state() {
    let mut interp = session();
    let source = "
        (def make_counter ()
            (begin
                (var n 0)
                (lambda () (begin (set n (+ n 1)) n))))
        (var a (make_counter))
        (var b (make_counter))
        (a) (a) (b)
        (print (a) (b))";
    run(&mut interp, source).unwrap();
    assert_eq!(interp.print_handler().get_output(), "3 2\n");
}

#[test]
fn mutual_recursion_through_shared_scope() {
    let mut interp = session();
    let source = "
        (def is_even (n) (if (= n 0) true (is_odd (- n 1))))
        (def is_odd (n) (if (= n 0) false (is_even (- n 1))))
        (is_even 100)";
    assert_eq!(run(&mut interp, source), Ok(Value::Bool(true)));
}

#[test]
fn higher_order_functions() {
    let mut interp = session();
    let source = "
        (def twice (f x) (f (f x)))
        (twice (lambda (v) (* v 3)) 2)";
    assert_eq!(run(&mut interp, source), Ok(Value::Int(18)));
}

#[test]
fn switch_in_a_function() {
    let mut interp = session();
    let source = r#"
        (def classify (x)
            (switch ((< x 0) "negative")
                    ((= x 0) "zero")
                    (else "positive")))
        (print (classify -4) (classify 0) (classify 9))"#;
    run(&mut interp, source).unwrap();
    assert_eq!(
        interp.print_handler().get_output(),
        "negative zero positive\n"
    );
}

#[test]
fn comments_are_ignored() {
    let mut interp = session();
    let source = "
        // running total
        (var total 0)
        /* add two numbers */
        (set total (+ total 41))
        (+ total 1)";
    assert_eq!(run(&mut interp, source), Ok(Value::Int(42)));
}

#[test]
fn version_constant() {
    let mut interp = session();
    assert_eq!(run(&mut interp, "VERSION"), Ok(Value::string("0.1")));
}
