//! Desugaring of derived control forms.
//!
//! The evaluator handles a fixed set of core forms. Derived forms are
//! rewritten here into equivalent core ASTs before evaluation, so their
//! semantics are defined entirely by the core forms they expand to.
//!
//! ```text
//! (switch (c1 b1) (c2 b2) (else d))   =>   (if c1 b1 (if c2 b2 d))
//! ```

mod switch;

pub use switch::{switch_to_if, SwitchError};
