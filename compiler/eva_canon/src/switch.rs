//! `switch` to nested `if`.

use eva_ir::{Keyword, Sexp};
use thiserror::Error;

/// Atom marking the default clause.
const ELSE: &str = "else";

/// A `switch` node that can not be rewritten.
///
/// Clause numbers are 1-based positions after the `switch` tag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SwitchError {
    #[error("expected a switch form, found `{form}`")]
    NotASwitch { form: String },

    #[error("switch has no clauses")]
    NoClauses,

    #[error("switch clause {clause} must be a `(condition branch)` pair, found `{form}`")]
    MalformedClause { clause: usize, form: String },

    #[error("switch must end with an `(else branch)` clause")]
    MissingElse,

    #[error("switch clause {clause} is `else` but is not the last clause")]
    ElseNotLast { clause: usize },
}

/// Rewrite `(switch (c1 b1) ... (else d))` into nested `if` forms.
///
/// Conditions keep their order, so evaluating the result runs the branch of
/// the first truthy condition, or `d` when none is truthy. A switch holding
/// only an `else` clause rewrites to its default branch.
pub fn switch_to_if(node: &Sexp) -> Result<Sexp, SwitchError> {
    let clauses = match node.as_list() {
        Some([head, clauses @ ..]) if head.is_atom(Keyword::Switch.as_str()) => clauses,
        _ => {
            return Err(SwitchError::NotASwitch {
                form: node.to_string(),
            })
        }
    };
    let Some((last, conditional)) = clauses.split_last() else {
        return Err(SwitchError::NoClauses);
    };

    let (else_tag, default) = clause_parts(last, clauses.len())?;
    if !else_tag.is_atom(ELSE) {
        return Err(SwitchError::MissingElse);
    }

    let mut desugared = default.clone();
    for (index, clause) in conditional.iter().enumerate().rev() {
        let (condition, branch) = clause_parts(clause, index + 1)?;
        if condition.is_atom(ELSE) {
            return Err(SwitchError::ElseNotLast { clause: index + 1 });
        }
        desugared = Sexp::list(vec![
            Sexp::atom(Keyword::If.as_str()),
            condition.clone(),
            branch.clone(),
            desugared,
        ]);
    }

    tracing::trace!(from = %node, to = %desugared, "desugared switch");
    Ok(desugared)
}

fn clause_parts(clause: &Sexp, number: usize) -> Result<(&Sexp, &Sexp), SwitchError> {
    match clause.as_list() {
        Some([condition, branch]) => Ok((condition, branch)),
        _ => Err(SwitchError::MalformedClause {
            clause: number,
            form: clause.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests;
