//! Horn-clause rules for forward chaining.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::literal::{Atom, Literal};
use super::term::Var;
use super::Clause;

/// A definite Horn clause: `A1 ∧ ... ∧ An => C`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    pub antecedents: Vec<Atom>,
    pub consequent: Atom,
}

impl Rule {
    pub fn new(antecedents: Vec<Atom>, consequent: Atom) -> Self {
        Rule {
            antecedents,
            consequent,
        }
    }

    /// Variables of the whole rule, antecedents and consequent together.
    pub fn variables(&self) -> HashSet<Var> {
        let mut vars = self.consequent.variables();
        for ant in &self.antecedents {
            vars.extend(ant.variables());
        }
        vars
    }

    /// Consequent variables that no antecedent binds.
    ///
    /// Forward chaining gives these a fresh generation on every firing.
    pub fn existential_variables(&self) -> HashSet<Var> {
        let mut bound = HashSet::new();
        for ant in &self.antecedents {
            bound.extend(ant.variables());
        }
        self.consequent
            .variables()
            .into_iter()
            .filter(|v| !bound.contains(v))
            .collect()
    }

    /// The rule as a clause: `¬A1 ∨ ... ∨ ¬An ∨ C`.
    pub fn to_clause(&self) -> Clause {
        self.antecedents
            .iter()
            .cloned()
            .map(Literal::negative)
            .chain(std::iter::once(Literal::positive(self.consequent.clone())))
            .collect()
    }

    pub(crate) fn map_vars(&self, rename: &mut impl FnMut(&Var) -> Var) -> Rule {
        Rule {
            antecedents: self.antecedents.iter().map(|a| a.map_vars(rename)).collect(),
            consequent: self.consequent.map_vars(rename),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, ant) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " ∧ ")?;
            }
            write!(f, "{}", ant)?;
        }
        write!(f, " => {}", self.consequent)
    }
}
