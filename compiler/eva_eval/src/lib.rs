//! Eva Eval - tree-walking evaluator for Eva programs.
//!
//! # Architecture
//!
//! - [`Environment`]: arena of lexical scopes addressed by [`ScopeId`]
//! - [`Value`]: the single dynamic type; callables are [`Primitive`] or [`Closure`]
//! - [`Interpreter`]: one evaluation session (environment, print sink, call stack)
//! - [`create_root_environment`]: the global scope with constants and primitives
//!
//! `switch` forms are rewritten by `eva_canon` before evaluation.

mod diagnostics;
mod environment;
mod errors;
mod eval_mode;
pub mod interpreter;
mod primitives;
mod print_handler;
mod value;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{Environment, Scope, ScopeId};
pub use errors::{EvalError, EvalResult};
pub use eval_mode::EvalMode;
pub use interpreter::{Interpreter, InterpreterBuilder};
pub use primitives::{create_root_environment, VERSION};
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use value::{Closure, Primitive, PrimitiveFn, Value};
