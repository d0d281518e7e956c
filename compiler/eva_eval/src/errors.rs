//! Evaluation errors.
//!
//! Every failure aborts the evaluation in progress and surfaces to the
//! caller of the top-level entry point. Nothing inside the evaluator catches
//! an `EvalError`.

use eva_canon::SwitchError;
use eva_ir::Sexp;
use thiserror::Error;

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A name is not bound anywhere along the scope chain.
    #[error("undefined variable: {name}")]
    UnboundVariable { name: String },

    /// A node matches none of the evaluable shapes.
    #[error("unimplemented form: {form}")]
    UnimplementedForm { form: String },

    #[error("{name} expects {expected} {}, got {got}", arguments(.expected))]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: &'static str },

    #[error("operator `{op}` cannot be applied to {operands}")]
    TypeMismatch { op: &'static str, operands: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {op}")]
    IntegerOverflow { op: &'static str },

    #[error("maximum call depth of {depth} exceeded")]
    RecursionLimit { depth: usize },

    #[error(transparent)]
    InvalidSwitch(#[from] SwitchError),
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror passes fields by reference"
)]
fn arguments(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

impl EvalError {
    pub fn unbound(name: &str) -> Self {
        EvalError::UnboundVariable {
            name: name.to_string(),
        }
    }

    pub fn unimplemented(node: &Sexp) -> Self {
        EvalError::UnimplementedForm {
            form: node.to_string(),
        }
    }

    pub fn arity(name: &str, expected: usize, got: usize) -> Self {
        EvalError::ArityMismatch {
            name: name.to_string(),
            expected,
            got,
        }
    }

    /// Operator applied to operands of the wrong types.
    pub fn type_mismatch(op: &'static str, operands: &[Value]) -> Self {
        let operands = operands
            .iter()
            .map(Value::type_name)
            .collect::<Vec<_>>()
            .join(" and ");
        EvalError::TypeMismatch { op, operands }
    }
}
