//! Append-only registry assigning stable identifiers to distinct clauses.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::syntax::Clause;

/// Identifier of a registered clause, displayed 1-based as `C1`, `C2`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClauseId(pub usize);

impl ClauseId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ClauseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0 + 1)
    }
}

/// Distinct clauses in registration order.
///
/// Two clauses count as the same when their canonical forms (literal set
/// with variables renamed by first occurrence) are equal. The clause is
/// stored as it was registered.
#[derive(Debug, Clone, Default)]
pub struct ClauseRegistry {
    clauses: Vec<Clause>,
    index: HashMap<Clause, ClauseId>,
}

impl ClauseRegistry {
    pub fn new() -> Self {
        ClauseRegistry::default()
    }

    /// Register a clause; returns its id and whether it was new.
    pub fn register(&mut self, clause: Clause) -> (ClauseId, bool) {
        let key = clause.canonical();
        if let Some(&id) = self.index.get(&key) {
            return (id, false);
        }
        let id = ClauseId(self.clauses.len());
        self.clauses.push(clause);
        self.index.insert(key, id);
        (id, true)
    }

    pub fn id_of(&self, clause: &Clause) -> Option<ClauseId> {
        self.index.get(&clause.canonical()).copied()
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.id_of(clause).is_some()
    }

    pub fn get(&self, id: ClauseId) -> Option<&Clause> {
        self.clauses.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses.iter().enumerate().map(|(i, c)| (ClauseId(i), c))
    }

    pub fn into_clauses(self) -> Vec<Clause> {
        self.clauses
    }
}
