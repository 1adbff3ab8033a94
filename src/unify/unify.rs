//! Unification algorithm: Robinson's algorithm for computing MGU.

use thiserror::Error;

use super::trace::{Trace, TraceStep};
use super::Substitution;
use crate::syntax::{Atom, Literal, Term, Var};

/// Result of a unification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnifyResult {
    /// Unification succeeded with the given most general unifier.
    Success(Substitution),
    /// Unification failed.
    Failure(UnifyError),
}

impl UnifyResult {
    pub fn is_success(&self) -> bool {
        matches!(self, UnifyResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, UnifyResult::Failure(_))
    }

    pub fn substitution(&self) -> Option<&Substitution> {
        match self {
            UnifyResult::Success(s) => Some(s),
            UnifyResult::Failure(_) => None,
        }
    }

    pub fn into_result(self) -> Result<Substitution, UnifyError> {
        match self {
            UnifyResult::Success(s) => Ok(s),
            UnifyResult::Failure(e) => Err(e),
        }
    }
}

/// Reasons why unification can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnifyError {
    /// Occurs check failed: variable would occur in its own binding.
    #[error("occurs check: {var} appears in {term}")]
    OccursCheck { var: Var, term: Term },
    /// Constant, function or predicate symbols don't match.
    #[error("symbol clash: {expected} vs {found}")]
    SymbolClash { expected: String, found: String },
    /// Same function symbol applied to a different number of arguments.
    #[error("arity mismatch for {symbol}: {expected} vs {found}")]
    ArityMismatch {
        symbol: String,
        expected: usize,
        found: usize,
    },
    /// A constant met a compound term.
    #[error("cannot unify {left} with {right}")]
    ShapeMismatch { left: Term, right: Term },
}

impl UnifyError {
    pub fn is_occurs_check(&self) -> bool {
        matches!(self, UnifyError::OccursCheck { .. })
    }
}

/// Compute the most general unifier of two terms.
///
/// Uses Robinson's unification algorithm with occurs check.
pub fn unify(t1: &Term, t2: &Term) -> UnifyResult {
    unify_with(t1, t2, &Substitution::empty())
}

/// Unify two terms, extending an existing substitution.
pub fn unify_with(t1: &Term, t2: &Term, subst: &Substitution) -> UnifyResult {
    Unifier::new(subst.clone(), None).run(vec![(t1.clone(), t2.clone())])
}

/// Unify two terms and record every decision taken along the way.
pub fn unify_traced(t1: &Term, t2: &Term, subst: &Substitution) -> (UnifyResult, Trace) {
    let mut trace = Trace::default();
    let result = Unifier::new(subst.clone(), Some(&mut trace)).run(vec![(t1.clone(), t2.clone())]);
    (result, trace)
}

/// Unify two atoms under `subst`.
///
/// An atom behaves as a compound term whose functor is its predicate.
pub fn unify_atoms(a1: &Atom, a2: &Atom, subst: &Substitution) -> UnifyResult {
    if a1.predicate != a2.predicate {
        return UnifyResult::Failure(UnifyError::SymbolClash {
            expected: a1.predicate.clone(),
            found: a2.predicate.clone(),
        });
    }
    if a1.args.len() != a2.args.len() {
        return UnifyResult::Failure(UnifyError::ArityMismatch {
            symbol: a1.predicate.clone(),
            expected: a1.args.len(),
            found: a2.args.len(),
        });
    }
    let pairs = a1.args.iter().cloned().zip(a2.args.iter().cloned()).collect();
    Unifier::new(subst.clone(), None).run(pairs)
}

/// Compute the MGU of two literals (atoms must match, ignoring sign).
///
/// For resolution, we often unify complementary literals.
/// This function unifies the atoms of two literals.
pub fn unify_literals(l1: &Literal, l2: &Literal) -> UnifyResult {
    unify_atoms(&l1.atom, &l2.atom, &Substitution::empty())
}

/// Simultaneous unification of multiple term pairs.
///
/// Finds a substitution σ such that σ(t1ᵢ) = σ(t2ᵢ) for all pairs.
pub fn unify_many(pairs: &[(Term, Term)]) -> UnifyResult {
    Unifier::new(Substitution::empty(), None).run(pairs.to_vec())
}

/// One run of the algorithm: a growing substitution and an optional trace.
struct Unifier<'t> {
    subst: Substitution,
    trace: Option<&'t mut Trace>,
}

impl<'t> Unifier<'t> {
    fn new(subst: Substitution, trace: Option<&'t mut Trace>) -> Self {
        Unifier { subst, trace }
    }

    fn record(&mut self, step: impl FnOnce() -> TraceStep) {
        if let Some(trace) = self.trace.as_deref_mut() {
            trace.push(step());
        }
    }

    /// Solve the pairs left to right, stopping at the first failure.
    fn run(mut self, pairs: Vec<(Term, Term)>) -> UnifyResult {
        let mut pending: Vec<(Term, Term)> = pairs.into_iter().rev().collect();

        while let Some((left, right)) = pending.pop() {
            self.record(|| TraceStep::Attempt {
                left: left.clone(),
                right: right.clone(),
            });
            let left = self.deref(left);
            let right = self.deref(right);

            if left == right {
                self.record(|| TraceStep::Identical);
                continue;
            }

            let outcome = match (left, right) {
                (Term::Var(var), other) | (other, Term::Var(var)) => self.bind_var(var, other),
                (Term::Const(a), Term::Const(b)) => Err(UnifyError::SymbolClash {
                    expected: a.name().to_string(),
                    found: b.name().to_string(),
                }),
                (Term::App(f, fargs), Term::App(g, gargs)) => {
                    if f.name != g.name {
                        Err(UnifyError::SymbolClash {
                            expected: f.name,
                            found: g.name,
                        })
                    } else if fargs.len() != gargs.len() {
                        Err(UnifyError::ArityMismatch {
                            symbol: f.name,
                            expected: fargs.len(),
                            found: gargs.len(),
                        })
                    } else {
                        pending.extend(fargs.into_iter().zip(gargs).rev());
                        Ok(())
                    }
                }
                (left, right) => Err(UnifyError::ShapeMismatch { left, right }),
            };

            if let Err(err) = outcome {
                self.record(|| TraceStep::Conflict(err.clone()));
                return UnifyResult::Failure(err);
            }
        }

        UnifyResult::Success(self.subst)
    }

    /// Dereference through the current substitution, noting bound variables.
    fn deref(&mut self, term: Term) -> Term {
        let value = self.subst.walk(&term).clone();
        if let Term::Var(var) = term {
            if value != Term::Var(var.clone()) {
                self.record(|| TraceStep::AlreadyBound {
                    var,
                    value: value.clone(),
                });
            }
        }
        value
    }

    fn bind_var(&mut self, var: Var, term: Term) -> Result<(), UnifyError> {
        if self.subst.occurs(&var, &term) {
            return Err(UnifyError::OccursCheck { var, term });
        }
        self.record(|| TraceStep::Bind {
            var: var.clone(),
            term: term.clone(),
        });
        self.subst.insert(var, term);
        Ok(())
    }
}
