//! Function call evaluation.

use std::rc::Rc;

use super::Interpreter;
use crate::diagnostics::CallFrame;
use crate::{Closure, EvalError, EvalResult, Value};

impl Interpreter {
    /// Call `callee` with evaluated arguments.
    pub(super) fn call(&mut self, callee: &Value, args: &[Value]) -> EvalResult {
        match callee {
            Value::Primitive(primitive) => primitive.call(args, &self.print_handler),
            Value::Closure(closure) => self.call_closure(closure, args),
            Value::Int(_) | Value::Str(_) | Value::Bool(_) | Value::Null => {
                Err(EvalError::NotCallable {
                    type_name: callee.type_name(),
                })
            }
        }
    }

    /// Bind arguments in a fresh activation scope under the captured scope
    /// and evaluate the body there.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(name = closure.display_name(), depth = self.call_stack.depth())
    )]
    fn call_closure(&mut self, closure: &Rc<Closure>, args: &[Value]) -> EvalResult {
        if args.len() != closure.arity() {
            return Err(EvalError::arity(
                closure.display_name(),
                closure.arity(),
                args.len(),
            ));
        }
        let frame = CallFrame {
            name: Rc::from(closure.display_name()),
        };
        if let Err(err) = self.call_stack.push(frame) {
            self.record_backtrace();
            return Err(err);
        }

        let activation = self.env.push_scope(closure.env());
        for (param, arg) in closure.params().iter().zip(args) {
            self.env.define(activation, Rc::clone(param), arg.clone());
        }
        let result = self.eval_body(closure.body(), activation);
        if result.is_err() {
            self.record_backtrace();
        }

        self.env.release(activation);
        self.call_stack.pop();
        result
    }

    /// Snapshot the call stack at the innermost failing call.
    fn record_backtrace(&mut self) {
        if self.backtrace.is_empty() {
            self.backtrace = self.call_stack.capture();
        }
    }
}
