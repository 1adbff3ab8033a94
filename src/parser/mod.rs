//! Parser for the program surface syntax.
//!
//! A program is a sequence of statements, each ending with `.`:
//!
//! ```text
//! American(Robert).                               // fact
//! Missile(x) ∧ Owns(Nono, x) => Sells(West, x).   // rule
//! clause ¬Food(x) ∨ Likes(John, x).               // clause
//! ?- Criminal(Robert).                            // query
//! :unify f(x, A) = f(B, y).                       // directive
//! ```
//!
//! Bare names starting with a lowercase letter or `_` are variables; a name
//! followed by `(` is a function or predicate symbol; other names are
//! constants.

mod ast;
mod lexer;
mod parser;

pub use ast::{Directive, Setting, Statement};
pub use parser::{
    is_variable_name, parse_atom, parse_clause, parse_program, parse_program_with, parse_rule,
    parse_term, ParseError,
};
