use super::*;
use eva_parse::parse_expr;
use pretty_assertions::assert_eq;

fn desugar(source: &str) -> Result<String, SwitchError> {
    let node = parse_expr(source).unwrap_or_else(|e| panic!("bad test source {source:?}: {e}"));
    switch_to_if(&node).map(|n| n.to_string())
}

#[test]
fn chains_conditions_in_order() {
    assert_eq!(
        desugar("(switch ((> x 1) 100) ((= x 1) 200) (else 300))"),
        Ok("(if (> x 1) 100 (if (= x 1) 200 300))".to_string())
    );
}

#[test]
fn single_condition() {
    assert_eq!(
        desugar("(switch (ok \"a\") (else \"b\"))"),
        Ok("(if ok \"a\" \"b\")".to_string())
    );
}

#[test]
fn else_only_is_its_branch() {
    assert_eq!(desugar("(switch (else (+ 1 2)))"), Ok("(+ 1 2)".to_string()));
}

#[test]
fn branches_may_be_blocks() {
    assert_eq!(
        desugar("(switch (c (begin (set x 1) x)) (else null))"),
        Ok("(if c (begin (set x 1) x) null)".to_string())
    );
}

#[test]
fn rejects_non_switch() {
    assert_eq!(
        desugar("(if a b c)"),
        Err(SwitchError::NotASwitch {
            form: "(if a b c)".to_string()
        })
    );
}

#[test]
fn rejects_empty_switch() {
    assert_eq!(desugar("(switch)"), Err(SwitchError::NoClauses));
}

#[test]
fn rejects_missing_else() {
    assert_eq!(desugar("(switch (a 1) (b 2))"), Err(SwitchError::MissingElse));
}

#[test]
fn rejects_early_else() {
    assert_eq!(
        desugar("(switch (a 1) (else 2) (else 3))"),
        Err(SwitchError::ElseNotLast { clause: 2 })
    );
}

#[test]
fn rejects_malformed_clause() {
    assert_eq!(
        desugar("(switch (a 1 2) (else 3))"),
        Err(SwitchError::MalformedClause {
            clause: 1,
            form: "(a 1 2)".to_string()
        })
    );
    assert_eq!(
        desugar("(switch (a 1) oops)"),
        Err(SwitchError::MalformedClause {
            clause: 2,
            form: "oops".to_string()
        })
    );
}
