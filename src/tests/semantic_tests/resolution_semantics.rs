use super::*;
use crate::resolution::{
    prove, refute, resolve, ClauseId, RefutationConfig, RefutationOutcome,
};

// =============================================================================
// RESOLUTION SEMANTICS
// =============================================================================
//
// Refutation is sound on the classic examples, never registers tautologies
// or self-resolvents, and identifies clauses up to literal order and
// variable renaming.

/// The grounded "Anil eats peanuts" example; the last clause is the negated
/// goal `John_likes_peanuts`.
fn anil_clauses() -> Vec<Clause> {
    vec![
        prop_clause(&["Alive_Anil"]),
        prop_clause(&["-Alive_Anil", "NotKilled_Anil"]),
        prop_clause(&["Eats_Anil_Peanuts"]),
        prop_clause(&["-Eats_Anil_Peanuts", "-NotKilled_Anil", "Food_Peanuts"]),
        prop_clause(&["-Food_Peanuts", "John_likes_peanuts"]),
        prop_clause(&["-John_likes_peanuts"]),
    ]
}

#[test]
fn anil_example_reaches_the_empty_clause() {
    let report = refute(&anil_clauses(), &RefutationConfig::default());
    assert_eq!(report.outcome, RefutationOutcome::Contradiction);
    let last = report.derivations.last().map(|row| row.clause.clone());
    assert_eq!(last, Some(Clause::empty()));
    // Input ids are kept; derived ids continue from C7.
    assert_eq!(report.derivations[0].derived, ClauseId(6));
    assert_eq!(report.derivations[0].derived.to_string(), "C7");
}

#[test]
fn anil_example_without_negated_goal_saturates() {
    let mut clauses = anil_clauses();
    clauses.pop();
    let report = refute(&clauses, &RefutationConfig::default());
    assert_eq!(report.outcome, RefutationOutcome::Saturated);
    assert!(report.clauses.contains(&prop_clause(&["John_likes_peanuts"])));
}

#[test]
fn every_derivation_comes_from_registered_parents() {
    let report = refute(&anil_clauses(), &RefutationConfig::default());
    for row in &report.derivations {
        assert!(row.left < row.derived && row.right < row.derived);
        assert!(row.left != row.right);
        assert_eq!(report.clause(row.derived), Some(&row.clause));
    }
}

#[test]
fn no_registered_clause_is_a_tautology() {
    let clauses = vec![
        prop_clause(&["P", "Q"]),
        prop_clause(&["-P", "-Q"]),
        prop_clause(&["P", "-Q"]),
    ];
    let report = refute(&clauses, &RefutationConfig::default());
    assert!(report.clauses.iter().all(|c| !c.is_tautology()));
}

#[test]
fn tautological_input_does_not_lose_literals() {
    // Resolving P ∨ ¬P ∨ Q with ¬Q on Q must keep P ∨ ¬P, a tautology
    // that is dropped; it must never produce the empty clause.
    let clauses = vec![prop_clause(&["P", "-P", "Q"]), prop_clause(&["-Q"])];
    let report = refute(&clauses, &RefutationConfig::default());
    assert_eq!(report.outcome, RefutationOutcome::Saturated);
}

#[test]
fn resolvents_are_symmetric_up_to_pivot() {
    let a = prop_clause(&["-P", "Q"]);
    let b = prop_clause(&["P", "R"]);
    let ab: Vec<Clause> = resolve(&a, &b).into_iter().map(|r| r.clause).collect();
    let ba: Vec<Clause> = resolve(&b, &a).into_iter().map(|r| r.clause).collect();
    assert_eq!(ab, ba);
    assert_eq!(ab, vec![prop_clause(&["Q", "R"])]);
}

#[test]
fn first_order_goal_is_proved() {
    // ∀x Food(x) → Likes(John, x); Food(Apple)  ⊢  Likes(John, Apple)
    let axioms = vec![
        Clause::new(vec![
            Literal::neg("Food", vec![v("x")]),
            Literal::pos("Likes", vec![c("John"), v("x")]),
        ]),
        Clause::new(vec![Literal::pos("Food", vec![c("Apple")])]),
    ];
    let goal = atom("Likes", vec![c("John"), c("Apple")]);
    assert!(prove(&axioms, &goal, &RefutationConfig::default()).is_contradiction());

    // An existential goal: does John like something?
    let some = atom("Likes", vec![c("John"), v("y")]);
    assert!(prove(&axioms, &some, &RefutationConfig::default()).is_contradiction());
}

#[test]
fn small_budget_is_inconclusive_not_wrong() {
    let report = refute(&anil_clauses(), &RefutationConfig { max_steps: 2 });
    assert_eq!(report.outcome, RefutationOutcome::Inconclusive);
    assert_eq!(report.steps, 2);
}

#[test]
fn proof_ends_in_the_empty_clause() {
    let report = refute(&anil_clauses(), &RefutationConfig::default());
    let proof = report.proof();
    assert!(!proof.is_empty());
    assert!(proof.last().map_or(false, |row| row.clause.is_empty()));
    assert!(proof.len() <= report.derivations.len());
}
