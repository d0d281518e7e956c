//! Runtime values.
//!
//! `Value` is the single dynamic type the evaluator produces and consumes.
//! Callables come in two kinds, matched exhaustively at the call site:
//! host primitives (a plain function pointer) and closures.

use std::fmt;
use std::rc::Rc;

use eva_ir::Sexp;

use crate::environment::ScopeId;
use crate::print_handler::PrintHandlerImpl;
use crate::EvalResult;

/// Signature of a host primitive.
///
/// Primitives receive already-evaluated arguments and the session's print
/// sink; they never see the AST or the environment.
pub type PrimitiveFn = fn(&[Value], &PrintHandlerImpl) -> EvalResult;

/// A host-provided callable.
#[derive(Clone, Copy)]
pub struct Primitive {
    name: &'static str,
    func: PrimitiveFn,
}

impl Primitive {
    pub const fn new(name: &'static str, func: PrimitiveFn) -> Self {
        Primitive { name, func }
    }

    /// Name the primitive is bound to in the root scope.
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn call(&self, args: &[Value], out: &PrintHandlerImpl) -> EvalResult {
        (self.func)(args, out)
    }
}

impl fmt::Debug for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Primitive").field(&self.name).finish()
    }
}

/// A user-defined function: parameters, body and the scope it was created in.
///
/// The captured scope is where the `def` or `lambda` was evaluated, not where
/// the closure is later called. It is held by [`ScopeId`]; the environment's
/// collector keeps that scope alive while the closure is reachable.
#[derive(Debug)]
pub struct Closure {
    name: Option<Rc<str>>,
    params: Vec<Rc<str>>,
    body: Sexp,
    env: ScopeId,
}

impl Closure {
    pub fn new(name: Option<Rc<str>>, params: Vec<Rc<str>>, body: Sexp, env: ScopeId) -> Self {
        Closure {
            name,
            params,
            body,
            env,
        }
    }

    /// Name given by `def`; `None` for a `lambda`.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Name for diagnostics and call frames.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("lambda")
    }

    pub fn params(&self) -> &[Rc<str>] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn body(&self) -> &Sexp {
        &self.body
    }

    /// Scope captured at creation.
    pub fn env(&self) -> ScopeId {
        self.env
    }
}

/// A runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Str(Rc<str>),
    Bool(bool),
    Null,
    Primitive(Primitive),
    Closure(Rc<Closure>),
}

impl Value {
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    /// Only `false` and `null` are falsy; `0` and `""` are truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Bool(false) | Value::Null)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Primitive(_) => "primitive",
            Value::Closure(_) => "function",
        }
    }
}

/// Strict equality: same type and same value. Callables compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Primitive(a), Value::Primitive(b)) => a.name == b.name,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Primitive(p) => write!(f, "<primitive {}>", p.name),
            Value::Closure(c) => match c.name() {
                Some(name) => write!(f, "<fn {name}>"),
                None => f.write_str("<lambda>"),
            },
        }
    }
}
