//! Syntax types for first-order logic terms, atoms, rules, and clauses.

mod clause;
mod literal;
mod rule;
mod signature;
mod term;

pub use clause::Clause;
pub use literal::{Atom, Literal};
pub use rule::Rule;
pub use signature::{ArityError, Signature};
pub use term::{Constant, FnSym, Term, Var};
