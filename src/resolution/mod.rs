//! Resolution refutation over clauses in conjunctive normal form.
mod registry;
mod report;
mod refute;
mod resolve;

pub use refute::{
    prove, refute, DerivationRow, RefutationConfig, RefutationOutcome, RefutationReport,
};
pub use registry::{ClauseId, ClauseRegistry};
pub use report::derivation_table;
pub use resolve::{negate_goal, resolve, Resolvent};
