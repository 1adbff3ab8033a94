//! Unification: computing most general unifiers for first-order terms.

mod rename;
mod substitution;
mod trace;
mod unify;

pub use rename::Renamer;
pub use substitution::Substitution;
pub use trace::{Trace, TraceStep};
pub use unify::{
    unify, unify_atoms, unify_literals, unify_many, unify_traced, unify_with, UnifyError,
    UnifyResult,
};
