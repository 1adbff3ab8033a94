use super::*;
use crate::chain::{ChainConfig, KnowledgeBase};
use crate::unify::Renamer;
use proptest::prelude::*;
use std::collections::HashMap;

// =============================================================================
// PROPERTY-BASED TESTS
// =============================================================================
//
// Lowercase-led names are variables, uppercase-led names are constants.

fn arb_var() -> impl Strategy<Value = Var> {
    "[a-z][a-z0-9]{0,2}".prop_map(Var::new)
}

fn arb_constant() -> impl Strategy<Value = Term> {
    "[A-Z][a-z0-9]{0,2}".prop_map(Term::constant)
}

fn arb_ground_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        arb_constant().boxed()
    } else {
        prop_oneof![
            arb_constant(),
            ("[fgh]", prop::collection::vec(arb_ground_term(depth - 1), 1..=3))
                .prop_map(|(name, args)| Term::app(name, args))
        ]
        .boxed()
    }
}

fn arb_term(depth: u32) -> impl Strategy<Value = Term> {
    if depth == 0 {
        prop_oneof![arb_var().prop_map(Term::Var), arb_constant()].boxed()
    } else {
        prop_oneof![
            arb_var().prop_map(Term::Var),
            arb_constant(),
            ("[fgh]", prop::collection::vec(arb_term(depth - 1), 1..=3))
                .prop_map(|(name, args)| Term::app(name, args))
        ]
        .boxed()
    }
}

fn arb_literal(depth: u32) -> impl Strategy<Value = Literal> {
    (any::<bool>(), "[PQR]", prop::collection::vec(arb_term(depth), 0..=2)).prop_map(
        |(pos, pred, args)| {
            if pos {
                Literal::pos(pred, args)
            } else {
                Literal::neg(pred, args)
            }
        },
    )
}

fn arb_clause(depth: u32) -> impl Strategy<Value = Clause> {
    prop::collection::vec(arb_literal(depth), 0..=4).prop_map(Clause::new)
}

/// Rename the variables of `clause` bijectively to `v0`, `v1`, ... in an
/// order shuffled by `seed`, so relative name order changes too.
fn permute_names(clause: &Clause, seed: u64) -> Clause {
    let mut vars: Vec<Var> = clause.variables().into_iter().collect();
    vars.sort();
    let mut targets: Vec<usize> = (0..vars.len()).collect();
    let mut state = seed;
    for i in (1..targets.len()).rev() {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let j = (state >> 33) as usize % (i + 1);
        targets.swap(i, j);
    }
    let mapping: HashMap<Var, Var> = vars
        .into_iter()
        .zip(targets)
        .map(|(v, t)| (v, Var::new(format!("v{}", t))))
        .collect();
    clause.map_vars(&mut |v| mapping.get(v).cloned().unwrap_or_else(|| v.clone()))
}

// -------------------------------------------------------------------------
//  MGU laws
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn self_unification_succeeds(term in arb_term(2)) {
        let result = unify(&term, &term);
        prop_assert!(result.is_success());
    }

    #[test]
    fn unification_is_symmetric_in_success(t1 in arb_term(2), t2 in arb_term(2)) {
        prop_assert_eq!(unify(&t1, &t2).is_success(), unify(&t2, &t1).is_success());
    }

    #[test]
    fn unifier_makes_terms_equal(t1 in arb_term(2), t2 in arb_term(2)) {
        if let UnifyResult::Success(s) = unify(&t1, &t2) {
            prop_assert_eq!(t1.apply_subst(&s), t2.apply_subst(&s));
        }
    }

    #[test]
    fn unifier_is_idempotent(t1 in arb_term(2), t2 in arb_term(2)) {
        if let UnifyResult::Success(s) = unify(&t1, &t2) {
            let once = t1.apply_subst(&s);
            prop_assert_eq!(once.apply_subst(&s), once);
        }
    }

    #[test]
    fn ground_terms_unify_iff_equal(t1 in arb_ground_term(2), t2 in arb_ground_term(2)) {
        prop_assert_eq!(unify(&t1, &t2).is_success(), t1 == t2);
    }

    #[test]
    fn variable_never_unifies_with_proper_superterm(x in arb_var(), extra in arb_term(1)) {
        let wrapped = Term::app("f", vec![Term::Var(x.clone()), extra]);
        let result = unify(&Term::Var(x), &wrapped);
        prop_assert!(result.is_failure());
    }
}

// -------------------------------------------------------------------------
//  Clauses
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn canonical_form_ignores_renaming(clause in arb_clause(1)) {
        let renamed = Renamer::new().rename_clause(&clause);
        prop_assert_eq!(renamed.canonical(), clause.canonical());
    }

    #[test]
    fn canonical_form_ignores_variable_names(clause in arb_clause(1), seed in any::<u64>()) {
        let renamed = permute_names(&clause, seed);
        prop_assert_eq!(renamed.variables().len(), clause.variables().len());
        prop_assert_eq!(renamed.canonical(), clause.canonical());
    }

    #[test]
    fn canonical_form_is_a_bijective_renaming(clause in arb_clause(1)) {
        let canonical = clause.canonical();
        prop_assert_eq!(canonical.len(), clause.len());
        prop_assert_eq!(canonical.variables().len(), clause.variables().len());
        prop_assert_eq!(canonical.is_tautology(), clause.is_tautology());
    }
}

// -------------------------------------------------------------------------
//  Forward chaining
// -------------------------------------------------------------------------
proptest! {
    #[test]
    fn chaining_never_removes_facts(names in prop::collection::vec("[A-Z][a-z]{0,3}", 0..6)) {
        let mut kb = KnowledgeBase::new();
        let facts: Vec<Atom> = names.iter().map(|n| atom("P", vec![c(n)])).collect();
        kb.add_facts(facts.clone(), "given");
        kb.add_rule(Rule::new(vec![atom("P", vec![v("x")])], atom("Q", vec![v("x")])));

        let report = kb.forward_chain(None, &ChainConfig::default());
        prop_assert!(!report.budget_exhausted);
        for fact in &facts {
            prop_assert!(kb.contains(fact));
            let derived = atom("Q", fact.args.clone());
            prop_assert!(kb.contains(&derived));
        }
    }
}
