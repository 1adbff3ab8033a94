//! Human-readable record of the decisions a unification run made.

use std::fmt;

use super::UnifyError;
use crate::syntax::{Term, Var};

/// One decision of the unifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceStep {
    /// A pair of terms was taken off the work list.
    Attempt { left: Term, right: Term },
    /// A variable was already bound and was replaced by its value.
    AlreadyBound { var: Var, value: Term },
    /// Both sides were identical after dereferencing.
    Identical,
    /// A new binding was recorded.
    Bind { var: Var, term: Term },
    /// The run stopped here.
    Conflict(UnifyError),
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceStep::Attempt { left, right } => write!(f, "unify {} with {}", left, right),
            TraceStep::AlreadyBound { var, value } => {
                write!(f, "  {} already bound to {}", var, value)
            }
            TraceStep::Identical => write!(f, "  identical, no substitution needed"),
            TraceStep::Bind { var, term } => write!(f, "  bind {} → {}", var, term),
            TraceStep::Conflict(err) => write!(f, "  ✗ {}", err),
        }
    }
}

/// Ordered list of unifier decisions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The trace rendered one line per step.
    pub fn lines(&self) -> Vec<String> {
        self.steps.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}
