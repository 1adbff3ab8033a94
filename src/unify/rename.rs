//! Fresh variable generation for renaming clauses and rules apart.

use std::collections::HashMap;

use crate::syntax::{Atom, Clause, Rule, Var};

/// Source of fresh variable generations.
///
/// Generation 0 belongs to variables written by the user; the renamer hands
/// out 1, 2, 3, ... so a renamed variable can never coincide with a user
/// variable or with a variable from an earlier renaming made by the same
/// renamer. The renamer is owned by whoever drives the inference loop and is
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct Renamer {
    next: u32,
}

impl Renamer {
    pub fn new() -> Self {
        Renamer { next: 1 }
    }

    /// A renamer whose generations are all above those of `vars`.
    pub fn above<'a>(vars: impl IntoIterator<Item = &'a Var>) -> Self {
        let highest = vars.into_iter().map(Var::generation).max().unwrap_or(0);
        Renamer { next: highest + 1 }
    }

    /// A variable with the same name as `var` and an unused generation.
    pub fn fresh(&mut self, var: &Var) -> Var {
        let generation = self.next;
        self.next += 1;
        Var::with_generation(var.name(), generation)
    }

    /// Rename every variable of a rule, consistently across antecedents and
    /// consequent.
    pub fn rename_rule(&mut self, rule: &Rule) -> Rule {
        let mut mapping: HashMap<Var, Var> = HashMap::new();
        rule.map_vars(&mut |v| {
            mapping
                .entry(v.clone())
                .or_insert_with(|| self.fresh(v))
                .clone()
        })
    }

    /// Rename every variable of a clause.
    pub fn rename_clause(&mut self, clause: &Clause) -> Clause {
        let mut mapping: HashMap<Var, Var> = HashMap::new();
        clause.map_vars(&mut |v| {
            mapping
                .entry(v.clone())
                .or_insert_with(|| self.fresh(v))
                .clone()
        })
    }

    /// Rename every variable of an atom.
    pub fn rename_atom(&mut self, atom: &Atom) -> Atom {
        let mut mapping: HashMap<Var, Var> = HashMap::new();
        atom.map_vars(&mut |v| {
            mapping
                .entry(v.clone())
                .or_insert_with(|| self.fresh(v))
                .clone()
        })
    }

    /// Number of generations handed out so far.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

impl Default for Renamer {
    fn default() -> Self {
        Self::new()
    }
}
