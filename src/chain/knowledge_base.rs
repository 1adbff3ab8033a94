//! Knowledge base: a monotone fact set plus Horn rules.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::syntax::{Atom, Rule};
use crate::unify::{unify_atoms, Renamer, Substitution};

/// Where a fact came from.
pub const GIVEN: &str = "given";

/// Facts and rules for forward chaining.
///
/// Facts are only ever added. Insertion order is kept so that derivations
/// and listings are reproducible; a hash set answers membership by
/// structural equality, and an index by predicate symbol and arity supplies
/// the candidates for each rule antecedent.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    pub(super) facts: Vec<Atom>,
    fact_set: HashSet<Atom>,
    by_predicate: HashMap<(String, usize), Vec<usize>>,
    pub(super) rules: Vec<Rule>,
    log: Vec<String>,
    pub(super) renamer: Renamer,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        KnowledgeBase::default()
    }

    /// Insert a fact unless an identical one is present.
    ///
    /// Returns whether the fact was new. New facts get a log entry naming
    /// their source.
    pub fn add_fact(&mut self, atom: Atom, source: impl AsRef<str>) -> bool {
        if self.fact_set.contains(&atom) {
            return false;
        }
        let entry = format!("Derived fact {} ({})", atom, source.as_ref());
        debug!("{}", entry);
        self.log.push(entry);

        let index = self.facts.len();
        self.by_predicate
            .entry((atom.predicate.clone(), atom.arity()))
            .or_default()
            .push(index);
        self.fact_set.insert(atom.clone());
        self.facts.push(atom);
        true
    }

    /// Seed several facts with the same source; returns how many were new.
    pub fn add_facts(&mut self, atoms: impl IntoIterator<Item = Atom>, source: &str) -> usize {
        atoms
            .into_iter()
            .filter(|atom| self.add_fact(atom.clone(), source))
            .count()
    }

    pub fn add_rule(&mut self, rule: Rule) {
        debug!("Adding rule {}", rule);
        self.rules.push(rule);
    }

    pub fn contains(&self, atom: &Atom) -> bool {
        self.fact_set.contains(atom)
    }

    /// Facts in insertion order.
    pub fn facts(&self) -> &[Atom] {
        &self.facts
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Derivation log, one line per added fact.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Indices of the facts sharing predicate symbol and arity with `atom`.
    pub(super) fn candidates(&self, atom: &Atom) -> Vec<usize> {
        self.by_predicate
            .get(&(atom.predicate.clone(), atom.arity()))
            .cloned()
            .unwrap_or_default()
    }

    /// First fact (in insertion order) that unifies with `query`.
    pub fn find_match(&self, query: &Atom) -> Option<&Atom> {
        self.candidates(query)
            .into_iter()
            .map(|i| &self.facts[i])
            .find(|fact| match_query(fact, query).is_some())
    }

    /// Every answer to `query` present in the fact set, as bindings of the
    /// query's variables.
    pub fn answers(&self, query: &Atom) -> Vec<Substitution> {
        let vars = query.variables();
        self.candidates(query)
            .into_iter()
            .filter_map(|i| match_query(&self.facts[i], query))
            .map(|s| s.restrict(&vars))
            .collect()
    }
}

/// Unify `query` with a copy of `fact` renamed apart from the query.
pub(super) fn match_query(fact: &Atom, query: &Atom) -> Option<Substitution> {
    let query_vars = query.variables();
    let fact = Renamer::above(&query_vars).rename_atom(fact);
    unify_atoms(query, &fact, &Substitution::empty())
        .into_result()
        .ok()
}
