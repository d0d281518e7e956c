//! Built-in bindings of the root scope.
//!
//! Arithmetic is on `i64` and checked: overflow and division by zero are
//! errors rather than wrapping. Division truncates toward zero.

use crate::print_handler::PrintHandlerImpl;
use crate::{Environment, EvalError, EvalResult, Primitive, PrimitiveFn, Value};

/// Value bound to `VERSION`.
pub const VERSION: &str = "0.1";

const PRIMITIVES: &[(&str, PrimitiveFn)] = &[
    ("+", add),
    ("-", sub),
    ("*", mul),
    ("/", div),
    (">", gt),
    ("<", lt),
    (">=", ge),
    ("<=", le),
    ("=", eq),
    ("print", print),
];

/// Create an environment whose root scope holds the constants and
/// primitives. Call once per interpreter session.
pub fn create_root_environment() -> Environment {
    let mut env = Environment::new();
    let root = env.root();
    env.define(root, "null", Value::Null);
    env.define(root, "true", Value::Bool(true));
    env.define(root, "false", Value::Bool(false));
    env.define(root, "VERSION", Value::string(VERSION));
    for &(name, func) in PRIMITIVES {
        env.define(root, name, Value::Primitive(Primitive::new(name, func)));
    }
    env
}

fn binary<'a>(name: &str, args: &'a [Value]) -> Result<(&'a Value, &'a Value), EvalError> {
    match args {
        [a, b] => Ok((a, b)),
        _ => Err(EvalError::arity(name, 2, args.len())),
    }
}

fn int_operands(op: &'static str, args: &[Value]) -> Result<(i64, i64), EvalError> {
    match binary(op, args)? {
        (Value::Int(a), Value::Int(b)) => Ok((*a, *b)),
        _ => Err(EvalError::type_mismatch(op, args)),
    }
}

fn checked(result: Option<i64>, op: &'static str) -> EvalResult {
    result
        .map(Value::Int)
        .ok_or(EvalError::IntegerOverflow { op })
}

fn add(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    match binary("+", args)? {
        (Value::Int(a), Value::Int(b)) => checked(a.checked_add(*b), "addition"),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(&format!("{a}{b}"))),
        _ => Err(EvalError::type_mismatch("+", args)),
    }
}

/// Negation with one argument, subtraction with two.
fn sub(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    match args {
        [Value::Int(a)] => checked(a.checked_neg(), "negation"),
        [_] => Err(EvalError::type_mismatch("-", args)),
        _ => {
            let (a, b) = int_operands("-", args)?;
            checked(a.checked_sub(b), "subtraction")
        }
    }
}

fn mul(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    let (a, b) = int_operands("*", args)?;
    checked(a.checked_mul(b), "multiplication")
}

fn div(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    let (a, b) = int_operands("/", args)?;
    if b == 0 {
        return Err(EvalError::DivisionByZero);
    }
    checked(a.checked_div(b), "division")
}

/// Integers compare numerically, strings lexicographically.
fn compare(
    op: &'static str,
    args: &[Value],
    test: fn(std::cmp::Ordering) -> bool,
) -> EvalResult {
    let ordering = match binary(op, args)? {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Str(a), Value::Str(b)) => a.cmp(b),
        _ => return Err(EvalError::type_mismatch(op, args)),
    };
    Ok(Value::Bool(test(ordering)))
}

fn gt(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    compare(">", args, std::cmp::Ordering::is_gt)
}

fn lt(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    compare("<", args, std::cmp::Ordering::is_lt)
}

fn ge(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    compare(">=", args, std::cmp::Ordering::is_ge)
}

fn le(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    compare("<=", args, std::cmp::Ordering::is_le)
}

/// Strict equality; values of different types are never equal.
fn eq(args: &[Value], _out: &PrintHandlerImpl) -> EvalResult {
    let (a, b) = binary("=", args)?;
    Ok(Value::Bool(a == b))
}

/// Print all arguments separated by spaces, then a newline.
fn print(args: &[Value], out: &PrintHandlerImpl) -> EvalResult {
    let line = args
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    out.println(&line);
    Ok(Value::Null)
}
