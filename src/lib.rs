//! folog: a small first-order logic toolkit.
//!
//! Terms, atoms and clauses ([`syntax`]), Robinson unification with an
//! occurs check and an optional decision trace ([`unify`]), forward chaining
//! over Horn rules ([`chain`]) and saturation-style resolution refutation
//! ([`resolution`]). [`parser`], [`session`] and [`repl`] provide a textual
//! front end.

pub mod chain;
pub mod parser;
pub mod repl;
pub mod resolution;
pub mod session;
pub mod syntax;
pub mod unify;
