//! Signature: the predicate arities a program commits to.

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use super::{Atom, Clause, Rule, Term};

/// A predicate was used with a different number of arguments than declared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("predicate {predicate} has arity {declared} but was given {found} argument(s)")]
pub struct ArityError {
    pub predicate: String,
    pub declared: usize,
    pub found: usize,
}

/// Signature of a knowledge base or clause set.
///
/// Predicates map to their arity; the first use of a predicate declares it.
/// Function symbols and constants are collected for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub predicates: BTreeMap<String, usize>,
    pub functions: HashSet<String>,
    pub constants: HashSet<String>,
}

impl Signature {
    pub fn empty() -> Self {
        Signature::default()
    }

    /// Declare `predicate/arity`; re-declaring with the same arity is a no-op.
    pub fn declare(&mut self, predicate: &str, arity: usize) -> Result<(), ArityError> {
        match self.predicates.get(predicate) {
            Some(&declared) if declared != arity => Err(ArityError {
                predicate: predicate.to_string(),
                declared,
                found: arity,
            }),
            Some(_) => Ok(()),
            None => {
                self.predicates.insert(predicate.to_string(), arity);
                Ok(())
            }
        }
    }

    pub fn arity(&self, predicate: &str) -> Option<usize> {
        self.predicates.get(predicate).copied()
    }

    /// Build an atom, checking it against the declared arity.
    ///
    /// Undeclared predicates are declared by this call.
    pub fn atom(&mut self, predicate: &str, args: Vec<Term>) -> Result<Atom, ArityError> {
        self.declare(predicate, args.len())?;
        let atom = Atom::new(predicate, args);
        self.collect_atom_symbols(&atom);
        Ok(atom)
    }

    /// Check (and record) every predicate occurrence of an atom.
    pub fn check_atom(&mut self, atom: &Atom) -> Result<(), ArityError> {
        self.declare(&atom.predicate, atom.arity())?;
        self.collect_atom_symbols(atom);
        Ok(())
    }

    pub fn check_rule(&mut self, rule: &Rule) -> Result<(), ArityError> {
        for ant in &rule.antecedents {
            self.check_atom(ant)?;
        }
        self.check_atom(&rule.consequent)
    }

    pub fn check_clause(&mut self, clause: &Clause) -> Result<(), ArityError> {
        for lit in clause.iter() {
            self.check_atom(&lit.atom)?;
        }
        Ok(())
    }

    /// Merge another signature into this one.
    pub fn extend(&mut self, other: &Signature) -> Result<(), ArityError> {
        for (pred, &arity) in &other.predicates {
            self.declare(pred, arity)?;
        }
        self.functions.extend(other.functions.iter().cloned());
        self.constants.extend(other.constants.iter().cloned());
        Ok(())
    }

    fn collect_atom_symbols(&mut self, atom: &Atom) {
        let mut stack: Vec<&Term> = atom.args.iter().collect();
        while let Some(term) = stack.pop() {
            match term {
                Term::Var(_) => {}
                Term::Const(c) => {
                    self.constants.insert(c.name().to_string());
                }
                Term::App(sym, args) => {
                    self.functions.insert(sym.name.clone());
                    stack.extend(args.iter());
                }
            }
        }
    }
}
