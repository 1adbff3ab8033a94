//! Forward chaining over Horn rules.

mod forward;
mod knowledge_base;

pub use forward::{ChainConfig, ChainOutcome, ChainReport};
pub use knowledge_base::{KnowledgeBase, GIVEN};
