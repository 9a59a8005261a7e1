//! The decision layer between the engine and the evaluators.
//!
//! ## Modules
//!
//! - `action`: Actions, action kinds and legal-action sets
//! - `snapshot`: Read-only round views supplied by the engine
//! - `config`: JSON configuration for the policy and discard weights
//! - `policy`: The per-turn decision function
//! - `player`: The `PokerBot` callback trait and its implementation

pub mod action;
pub mod config;
pub mod player;
pub mod policy;
pub mod snapshot;

pub use action::{Action, ActionKind, LegalActions};
pub use config::{BotConfig, ConfigError, PolicyConfig, TableConfig};
pub use player::{DrawBot, PokerBot};
pub use policy::{ActionPolicy, PolicyError};
pub use snapshot::{RoundEnd, RoundSnapshot, RoundStart};
