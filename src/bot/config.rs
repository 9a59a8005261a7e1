//! Bot configuration loaded from JSON.
//!
//! Every tunable the policy and the discard evaluator use lives here, so
//! thresholds can be recalibrated without recompiling. Each section is
//! `#[serde(default)]`, so a config file only needs the fields it changes:
//!
//! ```
//! use drawbot::bot::BotConfig;
//!
//! let config = BotConfig::from_json_str(r#"{ "seed": 7, "policy": { "fold_probability": 0.1 } }"#).unwrap();
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.policy.strong_threshold, 0.6);
//! ```

use crate::eval::{DiscardConfig, DiscardStrategy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Widest kicker gap that can still fire (deuce pair, ace kicker).
const MAX_KICKER_GAP: u8 = 12;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Name shown in logs and profiles.
    pub name: String,
    /// Seed for the decision RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Match constants of the engine.
    pub table: TableConfig,
    /// Betting thresholds.
    pub policy: PolicyConfig,
    /// Discard weights.
    pub discard: DiscardConfig,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "drawbot".to_string(),
            seed: None,
            table: TableConfig::default(),
            policy: PolicyConfig::default(),
            discard: DiscardConfig::default(),
        }
    }
}

/// Match constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Chips each seat starts a round with.
    pub starting_stack: u32,
    /// Big blind size.
    pub big_blind: u32,
    /// Small blind size.
    pub small_blind: u32,
    /// Rounds per match.
    pub num_rounds: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 400,
            big_blind: 2,
            small_blind: 1,
            num_rounds: 1000,
        }
    }
}

/// Betting thresholds for the action policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Pair score above which the first two hole cards count as strong.
    pub strong_threshold: f64,
    /// Strong hands raise to this multiple of the minimum raise (capped at the maximum).
    pub strong_raise_multiplier: u32,
    /// Probability of a minimum raise with a weak hand.
    pub bluff_raise_probability: f64,
    /// Probability of folding when facing a bet that cannot be checked.
    pub fold_probability: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            strong_threshold: 0.6,
            strong_raise_multiplier: 10,
            bluff_raise_probability: 0.5,
            fold_probability: 0.25,
        }
    }
}

impl BotConfig {
    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set the discard strategy.
    pub fn with_discard_strategy(mut self, strategy: DiscardStrategy) -> Self {
        self.discard.strategy = strategy;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("bluff_raise_probability", self.policy.bluff_raise_probability),
            ("fold_probability", self.policy.fold_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability(name, value));
            }
        }

        if !self.policy.strong_threshold.is_finite() || self.policy.strong_threshold < 0.0 {
            return Err(ConfigError::InvalidWeight("strong_threshold", self.policy.strong_threshold));
        }

        if self.policy.strong_raise_multiplier == 0 {
            return Err(ConfigError::InvalidMultiplier(self.policy.strong_raise_multiplier));
        }

        if self.discard.kicker_gap > MAX_KICKER_GAP {
            return Err(ConfigError::InvalidKickerGap(self.discard.kicker_gap));
        }

        let weights = [
            ("flush_three", self.discard.flush_three),
            ("flush_two", self.discard.flush_two),
            ("straight_run", self.discard.straight_run),
            ("high_card_multiplier", self.discard.high_card_multiplier),
            ("opponent_pair", self.discard.opponent_pair),
            ("noise_max", self.discard.noise_max),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight(name, value));
            }
        }

        let table = &self.table;
        if table.big_blind == 0 || table.small_blind > table.big_blind {
            return Err(ConfigError::InvalidBlinds {
                sb: table.small_blind,
                bb: table.big_blind,
            });
        }
        if table.starting_stack < table.big_blind {
            return Err(ConfigError::InvalidStack(table.starting_stack));
        }

        Ok(())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// The config file could not be read.
    IoError(String),
    /// The JSON could not be parsed.
    ParseError(String),
    /// A probability is outside [0, 1].
    InvalidProbability(&'static str, f64),
    /// A weight or threshold is negative or not finite.
    InvalidWeight(&'static str, f64),
    /// The strong raise multiplier is zero.
    InvalidMultiplier(u32),
    /// Kicker gap wider than the rank range.
    InvalidKickerGap(u8),
    /// Blinds are zero or inverted.
    InvalidBlinds {
        /// Small blind.
        sb: u32,
        /// Big blind.
        bb: u32,
    },
    /// Starting stack is smaller than the big blind.
    InvalidStack(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {}", e),
            Self::ParseError(e) => write!(f, "Parse error: {}", e),
            Self::InvalidProbability(name, v) => {
                write!(f, "{} {} is out of range [0, 1]", name, v)
            }
            Self::InvalidWeight(name, v) => write!(f, "{} {} must be finite and non-negative", name, v),
            Self::InvalidMultiplier(m) => write!(f, "Strong raise multiplier {} must be positive", m),
            Self::InvalidKickerGap(g) => write!(f, "Kicker gap {} exceeds {}", g, MAX_KICKER_GAP),
            Self::InvalidBlinds { sb, bb } => write!(f, "Invalid blinds: SB={}, BB={}", sb, bb),
            Self::InvalidStack(s) => write!(f, "Starting stack {} is smaller than the big blind", s),
        }
    }
}

impl std::error::Error for ConfigError {}
