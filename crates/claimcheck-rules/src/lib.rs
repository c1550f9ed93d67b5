//! Rule evaluation: classification, the four survey checks, per-case verdicts
//! and the institution rollup.

pub mod classifier;
pub mod core_elements;
pub mod delay;
pub mod evaluator;
pub mod mandatory;
pub mod overlap;
mod rulebook;
pub mod summary;

pub use evaluator::{CaseEvaluation, CaseEvaluator};
pub use rulebook::{Rulebook, RulebookError};
pub use summary::summarize;
