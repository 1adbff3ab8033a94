//! Clauses: disjunctions of literals with set semantics.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use super::literal::Literal;
use super::term::{Term, Var};
use crate::unify::Substitution;

/// Most tied literal orderings [`Clause::canonical`] compares.
const MAX_ORDERINGS: usize = 5040;

/// A clause is a disjunction of literals: `L1 ∨ L2 ∨ ... ∨ Ln`.
///
/// Literals are kept in a set, so a clause never holds the same literal
/// twice and two clauses are equal whenever their literal sets are, whatever
/// order the literals were written in.
///
/// Examples (in our syntax):
/// - Unit clause: `Alive_Anil`
/// - Binary: `¬Food(Peanuts) ∨ Likes(John, Peanuts)`
/// - Empty clause: `⊥` (contradiction)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Clause {
    pub literals: BTreeSet<Literal>,
}

impl Clause {
    /// Create a clause from literals; duplicates collapse.
    pub fn new(literals: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            literals: literals.into_iter().collect(),
        }
    }

    /// Create the empty clause (represents contradiction/false).
    pub fn empty() -> Self {
        Clause::default()
    }

    /// Check if this is the empty clause.
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if this is a unit clause (exactly one literal).
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Check if this is a Horn clause (at most one positive literal).
    pub fn is_horn(&self) -> bool {
        self.literals.iter().filter(|l| l.positive).count() <= 1
    }

    /// A clause containing some literal together with its exact negation.
    pub fn is_tautology(&self) -> bool {
        self.literals
            .iter()
            .any(|l| l.positive && self.literals.contains(&l.negated()))
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.literals.contains(literal)
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Collect all variables in this clause.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        for lit in &self.literals {
            for arg in &lit.atom.args {
                arg.collect_variables(&mut set);
            }
        }
        set
    }

    /// Check if this clause is ground (contains no variables).
    pub fn is_ground(&self) -> bool {
        self.literals.iter().all(Literal::is_ground)
    }

    /// Apply a substitution to this clause.
    pub fn apply_subst(&self, subst: &Substitution) -> Clause {
        Clause::new(self.literals.iter().map(|l| l.apply_subst(subst)))
    }

    /// Get all positive literals in this clause.
    pub fn positive_literals(&self) -> Vec<&Literal> {
        self.literals.iter().filter(|l| l.positive).collect()
    }

    /// Get all negative literals in this clause.
    pub fn negative_literals(&self) -> Vec<&Literal> {
        self.literals.iter().filter(|l| !l.positive).collect()
    }

    pub(crate) fn map_vars(&self, rename: &mut impl FnMut(&Var) -> Var) -> Clause {
        Clause::new(self.literals.iter().map(|l| l.map_vars(rename)))
    }

    /// Rename variables to `_0`, `_1`, ... so that alpha-variants coincide.
    ///
    /// Literals are ordered by a key that ignores variable names and numbered
    /// in order of first occurrence. Every order of literals with equal keys
    /// is tried and the least result is kept, so the outcome does not depend
    /// on the original names. Beyond `MAX_ORDERINGS` tied orders only one
    /// order is numbered and some variants may stay distinct.
    pub fn canonical(&self) -> Clause {
        let mut keyed: Vec<(String, &Literal)> =
            self.literals.iter().map(|l| (shape_key(l), l)).collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));

        let mut groups: Vec<Vec<&Literal>> = Vec::new();
        let mut last_key: Option<&str> = None;
        for (key, lit) in &keyed {
            if last_key == Some(key.as_str()) {
                if let Some(group) = groups.last_mut() {
                    group.push(*lit);
                }
            } else {
                groups.push(vec![*lit]);
            }
            last_key = Some(key.as_str());
        }

        let orderings = groups.iter().try_fold(1usize, |acc, group| {
            (1..=group.len()).try_fold(acc, |n, k| n.checked_mul(k))
        });
        if !matches!(orderings, Some(n) if n <= MAX_ORDERINGS) {
            return number_in_order(groups.iter().flatten().copied());
        }

        let mut orders: Vec<Vec<&Literal>> = vec![Vec::new()];
        for group in &groups {
            let perms = permutations(group);
            orders = orders
                .iter()
                .flat_map(|prefix| {
                    perms.iter().map(move |perm| {
                        let mut order = prefix.clone();
                        order.extend(perm.iter().copied());
                        order
                    })
                })
                .collect();
        }
        orders
            .into_iter()
            .map(number_in_order)
            .min_by(|a, b| a.literals.iter().cmp(b.literals.iter()))
            .unwrap_or_default()
    }
}

/// Sort key of a literal with every variable written as `?`.
fn shape_key(literal: &Literal) -> String {
    let mut key = String::new();
    key.push_str(&literal.atom.predicate);
    key.push(if literal.positive { '+' } else { '-' });
    for arg in &literal.atom.args {
        key.push(' ');
        push_shape(&mut key, arg);
    }
    key
}

fn push_shape(key: &mut String, term: &Term) {
    match term {
        Term::Var(_) => key.push('?'),
        Term::Const(c) => key.push_str(c.name()),
        Term::App(sym, args) => {
            key.push_str(&sym.name);
            key.push('(');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    key.push(',');
                }
                push_shape(key, arg);
            }
            key.push(')');
        }
    }
}

fn permutations<'a>(items: &[&'a Literal]) -> Vec<Vec<&'a Literal>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let first = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, first);
            out.push(tail);
        }
    }
    out
}

/// Number variables `_0`, `_1`, ... by first occurrence in `literals`.
fn number_in_order<'a>(literals: impl IntoIterator<Item = &'a Literal>) -> Clause {
    let mut names: HashMap<Var, Var> = HashMap::new();
    literals
        .into_iter()
        .map(|l| {
            l.map_vars(&mut |v| {
                let next = names.len();
                names
                    .entry(v.clone())
                    .or_insert_with(|| Var::new(format!("_{}", next)))
                    .clone()
            })
        })
        .collect()
}

impl FromIterator<Literal> for Clause {
    fn from_iter<I: IntoIterator<Item = Literal>>(iter: I) -> Self {
        Clause::new(iter)
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "⊥");
        }
        for (i, lit) in self.literals.iter().enumerate() {
            if i > 0 {
                write!(f, " ∨ ")?;
            }
            write!(f, "{}", lit)?;
        }
        Ok(())
    }
}
