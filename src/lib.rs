//! # drawbot
//!
//! Decision core for a heads-up three-card-draw poker bot.
//!
//! Each turn the engine hands the bot a read-only [`RoundSnapshot`] and the
//! bot answers with exactly one [`Action`]. On the draw streets it also
//! chooses which of its three hole cards to throw.
//!
//! ## Quick Start
//!
//! ```
//! use drawbot::{ActionPolicy, RoundSnapshot};
//! use rand::SeedableRng;
//!
//! let snapshot: RoundSnapshot = serde_json::from_str(r#"{
//!     "active": 0, "street": 0,
//!     "hands": [["As", "Ad", "7c"], []],
//!     "pips": [10, 20], "stacks": [390, 380],
//!     "legal": ["fold", "call", "raise"],
//!     "raise_bounds": [20, 200]
//! }"#).unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let action = ActionPolicy::new().decide(&snapshot, &mut rng).unwrap();
//! assert_eq!(action.code(), "R200");
//! ```
//!
//! ## Modules
//!
//! - [`cards`]: Card, board, street and deck types
//! - [`eval`]: The pair-strength table and the discard evaluator
//! - [`bot`]: Actions, snapshots, configuration, the policy and the bot
//! - [`sim`]: Synthetic turns and parallel policy profiling
//!
//! ## Architecture
//!
//! ```text
//!   engine ──► PokerBot::get_action(snapshot)
//!                     │
//!                     ▼
//!              ActionPolicy::decide ──────────────┐
//!               │ discard legal?                  │ raise legal?
//!               ▼                                 ▼
//!        DiscardEvaluator                 PairStrengthTable
//!   (flush / straight / high card /      (13x13 static lookup)
//!    opponent tell / noise)
//! ```

#![warn(missing_docs)]

/// Card primitives.
pub mod cards;

/// Card evaluators.
pub mod eval;

/// Actions, snapshots, configuration and the decision policy.
pub mod bot;

/// Synthetic turns and offline profiling.
pub mod sim;

// Re-export commonly used types at crate root for convenience
pub use bot::{Action, ActionKind, ActionPolicy, BotConfig, DrawBot, PokerBot, PolicyError, RoundSnapshot};
pub use cards::{Board, Card, Rank, Street, Suit};
pub use eval::{DiscardEvaluator, PairStrengthTable};
