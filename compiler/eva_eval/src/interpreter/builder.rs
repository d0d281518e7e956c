//! `InterpreterBuilder` for creating `Interpreter` instances.

use super::Interpreter;
use crate::diagnostics::CallStack;
use crate::{
    buffer_handler, create_root_environment, stdout_handler, Environment, EvalMode,
    SharedPrintHandler,
};

/// Builder for [`Interpreter`].
///
/// Unset options follow the mode: `Interpret` prints to stdout with no call
/// depth limit, `TestRun` buffers output and caps the call depth.
#[derive(Default)]
pub struct InterpreterBuilder {
    env: Option<Environment>,
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Start from `env` instead of a fresh [`create_root_environment`].
    #[must_use]
    pub fn env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// Where `print` writes. Overrides the mode default.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Maximum closure call depth. Overrides the mode default.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        let mode = self.mode;
        let print_handler = self.print_handler.unwrap_or_else(|| {
            if mode.allows_io() {
                stdout_handler()
            } else {
                buffer_handler()
            }
        });
        let max_depth = self.max_call_depth.or(mode.max_recursion_depth());
        Interpreter {
            env: self.env.unwrap_or_else(create_root_environment),
            print_handler,
            call_stack: CallStack::new(max_depth),
            mode,
            backtrace: Vec::new(),
        }
    }
}
