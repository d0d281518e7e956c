//! Tree-walking interpreter for Eva.
//!
//! # Architecture
//!
//! Every node goes through `evaluate`, which guards the native stack and
//! dispatches on [`Form`](form::Form). Scopes come from the session's
//! [`Environment`]:
//!
//! - a `begin` block pushes a child of the current scope
//! - a closure call pushes a child of the closure's captured scope
//! - everything else evaluates in the scope it was given
//!
//! Pushed scopes are released when their evaluation ends, on success or
//! failure, so a session stays usable after a failed top-level evaluation.
//! Each public entry point finishes by collecting captured scopes released
//! during the call; the returned value is still held by the caller then.
//!
//! # Body evaluation
//!
//! A closure body and a top-level program are *bodies*: when the node is a
//! `(begin ...)` block its expressions run directly in the given scope
//! instead of a new child. [`Interpreter::eval_global`] relies on this so
//! top-level definitions land in the global scope.

mod builder;
mod form;
mod function_call;

use std::rc::Rc;

use eva_canon::switch_to_if;
use eva_ir::{Keyword, Sexp};
use eva_stack::ensure_sufficient_stack;
use smallvec::SmallVec;

use self::form::Form;
use crate::diagnostics::CallStack;
use crate::{Closure, Environment, EvalMode, EvalResult, ScopeId, SharedPrintHandler, Value};

pub use builder::InterpreterBuilder;

/// One evaluation session.
///
/// Owns its root environment, so independent sessions never share state.
pub struct Interpreter {
    env: Environment,
    print_handler: SharedPrintHandler,
    call_stack: CallStack,
    mode: EvalMode,
    /// Call frames at the most recent failure, newest first.
    backtrace: Vec<Rc<str>>,
}

impl Interpreter {
    /// An `Interpret` mode session with the standard globals.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// The global scope.
    #[inline]
    pub fn global(&self) -> ScopeId {
        self.env.root()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Evaluate `node` in the global scope.
    pub fn eval(&mut self, node: &Sexp) -> EvalResult {
        let global = self.global();
        self.eval_in(node, global)
    }

    /// Evaluate `node` in `scope`.
    pub fn eval_in(&mut self, node: &Sexp, scope: ScopeId) -> EvalResult {
        self.start_evaluation();
        let result = self.evaluate(node, scope);
        self.finish_evaluation();
        result
    }

    /// Evaluate a program body in the global scope.
    ///
    /// A `(begin ...)` node runs its expressions directly in the global
    /// scope; any other node is evaluated as a single expression.
    pub fn eval_global(&mut self, node: &Sexp) -> EvalResult {
        self.start_evaluation();
        let global = self.global();
        let result = self.eval_body(node, global);
        self.finish_evaluation();
        result
    }

    /// Evaluate top-level expressions in order in the global scope.
    ///
    /// Returns the last value, or `null` for an empty program.
    pub fn eval_program(&mut self, exprs: &[Sexp]) -> EvalResult {
        self.start_evaluation();
        let global = self.global();
        let result = self.eval_block(exprs, global);
        self.finish_evaluation();
        result
    }

    /// Call a callable value with already-evaluated arguments.
    pub fn call_value(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        self.start_evaluation();
        let result = self.call(callee, args);
        self.finish_evaluation();
        result
    }

    /// Call frames active when the last evaluation failed, newest first.
    ///
    /// Empty if the failure happened outside any closure call.
    pub fn take_backtrace(&mut self) -> Vec<Rc<str>> {
        std::mem::take(&mut self.backtrace)
    }

    fn start_evaluation(&mut self) {
        if self.call_stack.is_empty() {
            self.backtrace.clear();
        }
    }

    fn finish_evaluation(&mut self) {
        if self.call_stack.is_empty() {
            self.env.collect_released();
        }
    }

    fn evaluate(&mut self, node: &Sexp, scope: ScopeId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_form(node, scope))
    }

    fn eval_form(&mut self, node: &Sexp, scope: ScopeId) -> EvalResult {
        tracing::trace!(node = %node, "eval");
        match Form::classify(node)? {
            Form::Int(n) => Ok(Value::Int(n)),
            Form::Str(content) => Ok(Value::string(content)),
            Form::Block(exprs) => {
                let block = self.env.push_scope(scope);
                let result = self.eval_block(exprs, block);
                self.env.release(block);
                result
            }
            Form::Var { name, value } => {
                let value = self.evaluate(value, scope)?;
                Ok(self.env.define(scope, name, value))
            }
            Form::Ident(name) => self.env.lookup(scope, name),
            Form::Set { name, value } => {
                let value = self.evaluate(value, scope)?;
                self.env.assign(scope, name, value)
            }
            Form::If {
                condition,
                consequent,
                alternate,
            } => {
                if self.evaluate(condition, scope)?.is_truthy() {
                    self.evaluate(consequent, scope)
                } else {
                    self.evaluate(alternate, scope)
                }
            }
            Form::While { condition, body } => {
                let mut result = Value::Null;
                while self.evaluate(condition, scope)?.is_truthy() {
                    result = self.evaluate(body, scope)?;
                }
                Ok(result)
            }
            Form::Def { name, params, body } => {
                let name: Rc<str> = Rc::from(name);
                let closure = self.make_closure(Some(Rc::clone(&name)), params, body, scope);
                Ok(self.env.define(scope, name, closure))
            }
            Form::Switch => {
                let desugared = switch_to_if(node)?;
                self.evaluate(&desugared, scope)
            }
            Form::Lambda { params, body } => Ok(self.make_closure(None, params, body, scope)),
            Form::Apply { callee, args } => {
                let callee = self.evaluate(callee, scope)?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg, scope))
                    .collect::<Result<SmallVec<[Value; 4]>, _>>()?;
                self.call(&callee, &args)
            }
        }
    }

    /// Evaluate `node` as a body in `scope`.
    fn eval_body(&mut self, node: &Sexp, scope: ScopeId) -> EvalResult {
        match node.as_list() {
            Some([head, exprs @ ..]) if head.is_atom(Keyword::Begin.as_str()) => {
                self.eval_block(exprs, scope)
            }
            _ => self.evaluate(node, scope),
        }
    }

    /// Evaluate `exprs` in order in `scope`; the last value, or `null`.
    fn eval_block(&mut self, exprs: &[Sexp], scope: ScopeId) -> EvalResult {
        let mut result = Value::Null;
        for expr in exprs {
            result = self.evaluate(expr, scope)?;
        }
        Ok(result)
    }

    fn make_closure(
        &mut self,
        name: Option<Rc<str>>,
        params: Vec<Rc<str>>,
        body: &Sexp,
        scope: ScopeId,
    ) -> Value {
        let closure = Closure::new(name, params, body.clone(), scope);
        Value::Closure(self.env.capture(closure))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
