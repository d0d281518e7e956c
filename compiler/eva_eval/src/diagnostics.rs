//! Call-frame tracking.
//!
//! Every closure call pushes a [`CallFrame`]; the depth check lives in
//! [`CallStack::push`]. When a call fails the interpreter snapshots the
//! stack with [`CallStack::capture`] so hosts can print a backtrace.

use std::rc::Rc;

use crate::EvalError;

/// A single frame in the live call stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// `def` name of the callee, or `lambda`.
    pub name: Rc<str>,
}

/// Live call stack for one interpreter session.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(EvalError::RecursionLimit { depth: max });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Frame names, most recent call first.
    pub fn capture(&self) -> Vec<Rc<str>> {
        self.frames.iter().rev().map(|f| Rc::clone(&f.name)).collect()
    }
}
