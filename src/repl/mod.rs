//! Line-oriented interactive front end.
#[allow(clippy::module_inception)]
mod repl;

pub use repl::{Repl, ReplError};
