use super::*;
use crate::parser::{parse_atom, parse_clause, parse_program, parse_rule, parse_term, Statement};

// =============================================================================
// PARSER SEMANTICS
// =============================================================================
//
// Rendering and re-parsing must give back the same structure, and the
// variable/constant split is decided once, from the leading character.

#[test]
fn display_then_parse_is_identity_for_terms() {
    let terms = vec![
        f("f", vec![v("x"), f("g", vec![v("y"), c("A")])]),
        f("Mother", vec![c("John")]),
        f("h", vec![]),
        v("t1"),
        c("America"),
    ];
    for term in terms {
        assert_eq!(parse_term(&term.to_string()).unwrap(), term);
    }
}

#[test]
fn display_then_parse_is_identity_for_clauses() {
    let clause = Clause::new(vec![
        Literal::neg("Eats", vec![c("Anil"), v("x")]),
        Literal::pos("Food", vec![v("x")]),
    ]);
    assert_eq!(parse_clause(&clause.to_string()).unwrap(), clause);
    let canonical = clause.canonical();
    assert_eq!(parse_clause(&canonical.to_string()).unwrap(), canonical);
}

#[test]
fn display_then_parse_is_identity_for_rules() {
    let rule = parse_rule(
        "American(p) ∧ Weapon(q) ∧ Sells(p, q, r) ∧ Hostile(r) => Criminal(p)",
    )
    .unwrap();
    assert_eq!(parse_rule(&rule.to_string()).unwrap(), rule);
    assert_eq!(rule.variables().len(), 3);
}

#[test]
fn nested_arguments_are_not_split_on_inner_commas() {
    let atom = parse_atom("Knows(John, Mother(f(x, y)))").unwrap();
    assert_eq!(atom.arity(), 2);
    assert_eq!(atom.args[1], f("Mother", vec![f("f", vec![v("x"), v("y")])]));
}

#[test]
fn unbalanced_parentheses_are_rejected() {
    assert!(parse_term("f(x, g(y)").is_err());
    assert!(parse_term("f(x))").is_err());
    assert!(parse_term("f(, x)").is_err());
}

#[test]
fn program_with_comments_and_mixed_operators() {
    let stmts = parse_program(
        "// facts\n\
         Missile(M1). // a missile\n\
         Missile(x) -> Weapon(x).\n\
         clause ~Weapon(M1) | Dangerous(M1).\n",
    )
    .unwrap();
    assert_eq!(stmts.len(), 3);
    match &stmts[2] {
        Statement::Clause(clause) => {
            assert_eq!(clause.to_string(), "Dangerous(M1) ∨ ¬Weapon(M1)")
        }
        other => panic!("expected a clause, got {:?}", other),
    }
}
