//! Substitution: mapping variables to terms.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::UnifyError;
use crate::syntax::{FnSym, Term, Var};

/// A substitution mapping variables to terms.
///
/// Bindings are stored triangularly: a bound term may mention variables that
/// are themselves bound (`x → y, y → f(A)`). Every read goes through
/// [`Substitution::walk`] or [`Substitution::apply_to_term`], which follow such
/// chains to the end, so `x` is seen as `f(A)`.
///
/// Bindings are only ever added through [`Substitution::bind`] or the
/// unifier, both of which run the occurs-check first. A substitution
/// therefore never contains a cycle and dereferencing always terminates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Substitution {
    bindings: HashMap<Var, Term>,
}

impl Substitution {
    /// Create an empty substitution (identity).
    pub fn empty() -> Self {
        Substitution {
            bindings: HashMap::new(),
        }
    }

    /// Bind `var` to `term`.
    ///
    /// Binding an already bound variable unifies the old value with `term`
    /// instead of overwriting it. Fails with [`UnifyError::OccursCheck`] if
    /// the binding would make a term contain itself.
    pub fn bind(&mut self, var: Var, term: Term) -> Result<(), UnifyError> {
        let next = super::unify::unify_with(&Term::Var(var), &term, self).into_result()?;
        *self = next;
        Ok(())
    }

    /// Record a binding without checks; callers have run the occurs-check.
    pub(crate) fn insert(&mut self, var: Var, term: Term) {
        self.bindings.insert(var, term);
    }

    /// Look up the direct binding of a variable.
    pub fn lookup(&self, var: &Var) -> Option<&Term> {
        self.bindings.get(var)
    }

    /// Dereference a term: follow variable bindings until reaching a
    /// non-variable or an unbound variable. Arguments are not touched.
    pub fn walk<'a>(&'a self, term: &'a Term) -> &'a Term {
        let mut current = term;
        while let Term::Var(var) = current {
            match self.bindings.get(var) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Apply this substitution to a term, resolving binding chains fully.
    ///
    /// Uses an explicit work stack, so deeply nested terms do not grow the
    /// call stack.
    pub fn apply_to_term(&self, term: &Term) -> Term {
        enum Frame<'a> {
            Visit(&'a Term),
            Build(&'a FnSym, usize),
        }

        let mut work = vec![Frame::Visit(term)];
        let mut done: Vec<Term> = Vec::new();
        while let Some(frame) = work.pop() {
            match frame {
                Frame::Visit(t) => match self.walk(t) {
                    Term::App(sym, args) => {
                        work.push(Frame::Build(sym, args.len()));
                        work.extend(args.iter().rev().map(Frame::Visit));
                    }
                    leaf => done.push(leaf.clone()),
                },
                Frame::Build(sym, arity) => {
                    let args = done.split_off(done.len() - arity);
                    done.push(Term::App(sym.clone(), args));
                }
            }
        }
        done.pop().unwrap_or_else(|| term.clone())
    }

    /// Does `var` occur in `term` once `term` is dereferenced through this
    /// substitution?
    pub fn occurs(&self, var: &Var, term: &Term) -> bool {
        let mut stack = vec![term];
        while let Some(t) = stack.pop() {
            match self.walk(t) {
                Term::Var(v) => {
                    if v == var {
                        return true;
                    }
                }
                Term::Const(_) => {}
                Term::App(_, args) => stack.extend(args.iter()),
            }
        }
        false
    }

    /// The bindings with every chain resolved, sorted by variable.
    ///
    /// This is the idempotent view of the substitution: applying it once has
    /// the same effect as applying the triangular form.
    pub fn resolved(&self) -> Vec<(Var, Term)> {
        let mut pairs: Vec<(Var, Term)> = self
            .bindings
            .iter()
            .map(|(var, term)| (var.clone(), self.apply_to_term(term)))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        pairs
    }

    /// Restrict to the given variables, resolving their values fully.
    pub fn restrict(&self, vars: &HashSet<Var>) -> Substitution {
        let mut result = Substitution::empty();
        for var in vars {
            if self.bindings.contains_key(var) {
                let value = self.apply_to_term(&Term::Var(var.clone()));
                result.bindings.insert(var.clone(), value);
            }
        }
        result
    }

    /// Get the domain of this substitution (variables that are mapped).
    pub fn domain(&self) -> HashSet<&Var> {
        self.bindings.keys().collect()
    }

    /// Iterate over the raw (triangular) bindings.
    pub fn bindings(&self) -> impl Iterator<Item = (&Var, &Term)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if this substitution is empty (has no bindings).
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Display for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (var, term)) in self.resolved().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} ↦ {}", var, term)?;
        }
        write!(f, "}}")
    }
}
