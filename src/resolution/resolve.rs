//! Binary resolution of two clauses.

use serde::Serialize;

use crate::syntax::{Atom, Clause, Literal};
use crate::unify::{unify_atoms, Renamer, Substitution, UnifyResult};

/// A clause obtained by resolving two parents on one complementary pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolvent {
    /// The literal of the first parent that was resolved away, instantiated
    /// by the unifier.
    pub pivot: Literal,
    pub clause: Clause,
}

/// All binary resolvents of `a` and `b`.
///
/// `b` is renamed apart from `a` first when the two share variables. For
/// every literal `l` of `a` and every literal of `b` whose atom unifies with
/// `l`'s atom under opposite polarity, the resolvent is the rest of both
/// clauses with the unifier applied. Only the complementary pair itself is
/// removed, so a tautological parent yields a tautological resolvent rather
/// than losing its other literals. Duplicate resolvents are reported once.
pub fn resolve(a: &Clause, b: &Clause) -> Vec<Resolvent> {
    let a_vars = a.variables();
    let b_vars = b.variables();
    let b = if a_vars.is_disjoint(&b_vars) {
        b.clone()
    } else {
        Renamer::above(a_vars.iter().chain(b_vars.iter())).rename_clause(b)
    };

    let mut resolvents: Vec<Resolvent> = Vec::new();
    for left in a.iter() {
        for right in b.iter() {
            if left.positive == right.positive || !left.atom.same_signature(&right.atom) {
                continue;
            }
            let mgu = match unify_atoms(&left.atom, &right.atom, &Substitution::empty()) {
                UnifyResult::Success(mgu) => mgu,
                UnifyResult::Failure(_) => continue,
            };
            let clause: Clause = a
                .iter()
                .filter(|l| *l != left)
                .chain(b.iter().filter(|l| *l != right))
                .map(|l| l.apply_subst(&mgu))
                .collect();
            let resolvent = Resolvent {
                pivot: left.apply_subst(&mgu),
                clause,
            };
            if !resolvents.contains(&resolvent) {
                resolvents.push(resolvent);
            }
        }
    }
    resolvents
}

/// The clause whose refutation proves `goal`: the goal atom negated.
pub fn negate_goal(goal: &Atom) -> Clause {
    Clause::new(vec![Literal::negative(goal.clone())])
}
