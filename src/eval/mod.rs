//! Card evaluators behind the bot's decisions.
//!
//! - [`pair_table`]: static two-card strength lookup used for raise sizing
//! - [`discard`]: per-candidate risk scoring for the draw streets

pub mod discard;
pub mod pair_table;

pub use discard::{CandidateScore, DiscardConfig, DiscardEvaluator, DiscardStrategy};
pub use pair_table::PairStrengthTable;
