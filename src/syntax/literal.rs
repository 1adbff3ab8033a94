//! Atoms and literals.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::term::{write_args, Term, Var};
use crate::unify::Substitution;

/// An atom (predicate application).
///
/// In prefix-functional syntax: `Predicate(arg1, arg2, ...)`
/// Examples:
/// - `American(Robert)` - unary predicate
/// - `Owns(A, t1)` - binary predicate
/// - `Alive_Anil` - 0-ary predicate (proposition)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Atom {
    pub predicate: String,
    pub args: Vec<Term>,
}

impl Atom {
    pub fn new(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Atom {
            predicate: predicate.into(),
            args,
        }
    }

    /// Create a 0-ary atom (proposition).
    pub fn prop(predicate: impl Into<String>) -> Self {
        Atom::new(predicate, vec![])
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// True if both atoms share predicate symbol and arity.
    pub fn same_signature(&self, other: &Atom) -> bool {
        self.predicate == other.predicate && self.args.len() == other.args.len()
    }

    /// Collect all variables in this atom.
    pub fn variables(&self) -> HashSet<Var> {
        let mut set = HashSet::new();
        for arg in &self.args {
            arg.collect_variables(&mut set);
        }
        set
    }

    /// Check if this atom is ground (contains no variables).
    pub fn is_ground(&self) -> bool {
        self.args.iter().all(Term::is_ground)
    }

    /// Apply a substitution to this atom.
    pub fn apply_subst(&self, subst: &Substitution) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|a| subst.apply_to_term(a)).collect(),
        }
    }

    pub(crate) fn map_vars(&self, rename: &mut impl FnMut(&Var) -> Var) -> Atom {
        Atom {
            predicate: self.predicate.clone(),
            args: self.args.iter().map(|a| a.map_vars(rename)).collect(),
        }
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.predicate);
        }
        write!(f, "{}(", self.predicate)?;
        write_args(f, &self.args)?;
        write!(f, ")")
    }
}

/// A literal is a signed atom.
///
/// - Positive literal: `Food(Peanuts)`
/// - Negative literal: `¬Food(Peanuts)`
///
/// Literals order by atom first, so clauses list their literals grouped by
/// predicate regardless of sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Literal {
    /// The underlying atom
    pub atom: Atom,
    /// True if positive, false if negated
    pub positive: bool,
}

impl Literal {
    /// Create a positive literal.
    pub fn positive(atom: Atom) -> Self {
        Literal {
            atom,
            positive: true,
        }
    }

    /// Create a negative literal.
    pub fn negative(atom: Atom) -> Self {
        Literal {
            atom,
            positive: false,
        }
    }

    /// Create a positive literal from predicate and args.
    pub fn pos(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal::positive(Atom::new(predicate, args))
    }

    /// Create a negative literal from predicate and args.
    pub fn neg(predicate: impl Into<String>, args: Vec<Term>) -> Self {
        Literal::negative(Atom::new(predicate, args))
    }

    /// Return the negation of this literal.
    pub fn negated(&self) -> Literal {
        Literal {
            atom: self.atom.clone(),
            positive: !self.positive,
        }
    }

    /// Two literals are complementary if they have the same atom but opposite signs.
    pub fn is_complementary(&self, other: &Literal) -> bool {
        self.positive != other.positive && self.atom == other.atom
    }

    /// Collect all variables in this literal.
    pub fn variables(&self) -> HashSet<Var> {
        self.atom.variables()
    }

    pub fn is_ground(&self) -> bool {
        self.atom.is_ground()
    }

    /// Apply a substitution to this literal.
    pub fn apply_subst(&self, subst: &Substitution) -> Literal {
        Literal {
            atom: self.atom.apply_subst(subst),
            positive: self.positive,
        }
    }

    pub(crate) fn map_vars(&self, rename: &mut impl FnMut(&Var) -> Var) -> Literal {
        Literal {
            atom: self.atom.map_vars(rename),
            positive: self.positive,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.positive {
            write!(f, "{}", self.atom)
        } else {
            write!(f, "¬{}", self.atom)
        }
    }
}
