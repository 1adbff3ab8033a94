use super::*;
use crate::chain::{ChainConfig, ChainOutcome, KnowledgeBase, GIVEN};

// =============================================================================
// FORWARD CHAINING SEMANTICS
// =============================================================================
//
// The fact set only grows, every derived fact is the instantiated consequent
// of some rule, and a fixed point is stable under re-running.

/// The "Colonel West" knowledge base with the missile named `t1`, which the
/// naming convention makes a variable.
fn criminal_kb() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();
    kb.add_fact(atom("Owns", vec![c("A"), v("t1")]), "existential instantiation");
    kb.add_fact(atom("Missile", vec![v("t1")]), "existential instantiation");
    kb.add_fact(atom("American", vec![c("Robert")]), GIVEN);
    kb.add_fact(atom("Enemy", vec![c("A"), c("America")]), GIVEN);

    kb.add_rule(Rule::new(
        vec![atom("Missile", vec![v("x")])],
        atom("Weapon", vec![v("x")]),
    ));
    kb.add_rule(Rule::new(
        vec![atom("Enemy", vec![v("x"), c("America")])],
        atom("Hostile", vec![v("x")]),
    ));
    kb.add_rule(Rule::new(
        vec![
            atom("Missile", vec![v("x")]),
            atom("Owns", vec![c("A"), v("x")]),
        ],
        atom("Sells", vec![c("Robert"), v("x"), c("A")]),
    ));
    kb.add_rule(Rule::new(
        vec![
            atom("American", vec![v("p")]),
            atom("Weapon", vec![v("q")]),
            atom("Sells", vec![v("p"), v("q"), v("r")]),
            atom("Hostile", vec![v("r")]),
        ],
        atom("Criminal", vec![v("p")]),
    ));
    kb
}

#[test]
fn criminal_query_is_entailed() {
    let mut kb = criminal_kb();
    let query = atom("Criminal", vec![c("Robert")]);
    let report = kb.forward_chain(Some(&query), &ChainConfig::default());
    assert_eq!(report.outcome, ChainOutcome::Entailed);
    assert!(report.rounds <= 4, "took {} rounds", report.rounds);
    assert_eq!(report.witness, Some(query));
}

#[test]
fn fact_set_grows_monotonically() {
    let mut kb = criminal_kb();
    let before: Vec<Atom> = kb.facts().to_vec();
    kb.forward_chain(None, &ChainConfig::default());
    assert!(kb.len() > before.len());
    assert_eq!(&kb.facts()[..before.len()], &before[..]);
}

#[test]
fn fixed_point_is_stable() {
    let mut kb = criminal_kb();
    let first = kb.forward_chain(None, &ChainConfig::default());
    assert_eq!(first.outcome, ChainOutcome::FixedPoint);
    let size = kb.len();
    let second = kb.forward_chain(None, &ChainConfig::default());
    assert_eq!(second.outcome, ChainOutcome::FixedPoint);
    assert!(second.derived.is_empty());
    assert_eq!(kb.len(), size);
}

#[test]
fn every_derived_fact_is_logged_with_its_rule() {
    let mut kb = criminal_kb();
    kb.forward_chain(None, &ChainConfig::default());
    let derived = &kb.log()[4..];
    assert!(!derived.is_empty());
    assert!(derived.iter().all(|line| line.contains("(from rule ")));
    assert!(kb.log()[2] == "Derived fact American(Robert) (given)");
}

#[test]
fn unprovable_query_reaches_fixed_point_first() {
    let mut kb = criminal_kb();
    let query = atom("Criminal", vec![c("Nono")]);
    let report = kb.forward_chain(Some(&query), &ChainConfig::default());
    assert_eq!(report.outcome, ChainOutcome::NotEntailed);
    assert!(!report.budget_exhausted);
    assert!(report.witness.is_none());
}

#[test]
fn zero_budget_only_checks_existing_facts() {
    let mut kb = criminal_kb();
    let report = kb.forward_chain(
        Some(&atom("Criminal", vec![c("Robert")])),
        &ChainConfig { max_iterations: 0 },
    );
    assert_eq!(report.outcome, ChainOutcome::NotEntailed);
    assert!(report.budget_exhausted);
    assert_eq!(report.rounds, 0);

    let known = kb.forward_chain(
        Some(&atom("American", vec![v("who")])),
        &ChainConfig { max_iterations: 0 },
    );
    assert!(known.is_entailed());
}

#[test]
fn rules_agree_with_their_clause_form() {
    // A Horn rule and its clause have the same atoms with opposite signs.
    let rule = Rule::new(
        vec![atom("Missile", vec![v("x")])],
        atom("Weapon", vec![v("x")]),
    );
    let clause = rule.to_clause();
    assert_eq!(clause.len(), 2);
    assert!(clause.is_horn());
    assert_eq!(clause.positive_literals().len(), 1);
}
