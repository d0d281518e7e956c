//! Shape classification of AST nodes.
//!
//! [`Form::classify`] turns a raw [`Sexp`] into one variant per evaluable
//! shape, so the evaluator's dispatch is an exhaustive `match`. Anything that
//! does not fit a shape, including a keyword form with the wrong number of
//! operands, is an `UnimplementedForm` error.

use std::rc::Rc;

use eva_ir::{is_identifier, string_literal, Keyword, Sexp};

use crate::EvalError;

/// Exclusive upper bound of the `f64` values that convert to `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

#[derive(Debug, PartialEq)]
pub(crate) enum Form<'a> {
    Int(i64),
    Str(&'a str),
    Block(&'a [Sexp]),
    Var {
        name: &'a str,
        value: &'a Sexp,
    },
    Ident(&'a str),
    Set {
        name: &'a str,
        value: &'a Sexp,
    },
    If {
        condition: &'a Sexp,
        consequent: &'a Sexp,
        alternate: &'a Sexp,
    },
    While {
        condition: &'a Sexp,
        body: &'a Sexp,
    },
    Def {
        name: &'a str,
        params: Vec<Rc<str>>,
        body: &'a Sexp,
    },
    /// Rewritten to nested `if` before evaluation.
    Switch,
    Lambda {
        params: Vec<Rc<str>>,
        body: &'a Sexp,
    },
    Apply {
        callee: &'a Sexp,
        args: &'a [Sexp],
    },
}

impl<'a> Form<'a> {
    pub(crate) fn classify(node: &'a Sexp) -> Result<Form<'a>, EvalError> {
        match node {
            Sexp::Int(n) => Ok(Form::Int(*n)),
            Sexp::Number(n) => integer(*n).map(Form::Int),
            Sexp::Atom(text) => {
                if let Some(content) = string_literal(text) {
                    Ok(Form::Str(content))
                } else if is_identifier(text) {
                    Ok(Form::Ident(text))
                } else {
                    Err(EvalError::unimplemented(node))
                }
            }
            Sexp::List(items) => classify_list(node, items),
        }
    }
}

fn classify_list<'a>(node: &'a Sexp, items: &'a [Sexp]) -> Result<Form<'a>, EvalError> {
    let Some((head, rest)) = items.split_first() else {
        return Err(EvalError::unimplemented(node));
    };
    let Some(keyword) = head.as_atom().and_then(Keyword::from_atom) else {
        return Ok(Form::Apply {
            callee: head,
            args: rest,
        });
    };

    let form = match (keyword, rest) {
        (Keyword::Begin, exprs) => Some(Form::Block(exprs)),
        (Keyword::Var, [name, value]) => identifier(name).map(|name| Form::Var { name, value }),
        (Keyword::Set, [name, value]) => identifier(name).map(|name| Form::Set { name, value }),
        (Keyword::If, [condition, consequent, alternate]) => Some(Form::If {
            condition,
            consequent,
            alternate,
        }),
        (Keyword::While, [condition, body]) => Some(Form::While { condition, body }),
        (Keyword::Def, [name, params, body]) => identifier(name)
            .zip(parameters(params))
            .map(|(name, params)| Form::Def { name, params, body }),
        (Keyword::Switch, _) => Some(Form::Switch),
        (Keyword::Lambda, [params, body]) => {
            parameters(params).map(|params| Form::Lambda { params, body })
        }
        _ => None,
    };
    form.ok_or_else(|| EvalError::unimplemented(node))
}

fn identifier(node: &Sexp) -> Option<&str> {
    node.as_atom().filter(|text| is_identifier(text))
}

fn parameters(node: &Sexp) -> Option<Vec<Rc<str>>> {
    node.as_list()?
        .iter()
        .map(|param| identifier(param).map(Rc::from))
        .collect()
}

/// Truncate a numeric literal toward zero.
#[allow(
    clippy::cast_possible_truncation,
    reason = "range checked against I64_LIMIT"
)]
fn integer(n: f64) -> Result<i64, EvalError> {
    let truncated = n.trunc();
    if truncated >= -I64_LIMIT && truncated < I64_LIMIT {
        Ok(truncated as i64)
    } else {
        Err(EvalError::IntegerOverflow {
            op: "integer literal",
        })
    }
}

#[cfg(test)]
mod tests;
