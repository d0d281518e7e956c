//! Evaluation modes.
//!
//! A mode picks the default print sink and the call-depth policy for an
//! interpreter session.

/// Evaluation mode for one interpreter session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Programs run from the command line: output to stdout.
    #[default]
    Interpret,
    /// Tests and embedders: output captured in a buffer, bounded recursion.
    TestRun,
}

impl EvalMode {
    /// Whether `print` writes straight to stdout by default.
    #[inline]
    pub fn allows_io(self) -> bool {
        matches!(self, Self::Interpret)
    }

    /// Maximum closure call depth, or `None` for unlimited.
    ///
    /// - `Interpret`: `None` on native (stacker grows the stack), 200 on WASM
    /// - `TestRun`: always 1000
    #[inline]
    pub fn max_recursion_depth(self) -> Option<usize> {
        match self {
            Self::Interpret => {
                #[cfg(target_arch = "wasm32")]
                {
                    Some(200)
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    None
                }
            }
            Self::TestRun => Some(1000),
        }
    }
}
