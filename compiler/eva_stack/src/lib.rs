//! Stack growth for deeply nested s-expressions.
//!
//! Both the reader and the evaluator recurse once per nesting level, and a
//! user-defined recursive function recurses once per call. Wrapping each
//! recursive step in [`ensure_sufficient_stack`] moves the work onto a fresh
//! stack segment before the native stack runs out.
//!
//! - **Red zone**: 100KB. Below this much remaining stack, a new segment is
//!   allocated.
//! - **Segment size**: 1MB per growth.
//!
//! On `wasm32` the closure is called directly.

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, node: &Sexp, scope: ScopeId) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_form(node, scope))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available.
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space allocated per growth.
    const SEGMENT_SIZE: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
