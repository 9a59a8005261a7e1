//! The bot as the engine sees it.
//!
//! [`PokerBot`] is the callback surface a match runner drives: one call per
//! round start, one per turn, one per round end. [`DrawBot`] implements it
//! by forwarding turns to [`ActionPolicy`] with its own seeded RNG. The
//! round hooks only log; nothing is remembered between rounds.

use super::action::Action;
use super::config::BotConfig;
use super::policy::{ActionPolicy, PolicyError};
use super::snapshot::{RoundEnd, RoundSnapshot, RoundStart};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Callbacks invoked by the match runner.
pub trait PokerBot {
    /// Called when a new round starts.
    fn handle_new_round(&mut self, start: &RoundStart);

    /// Called when a round ends.
    fn handle_round_over(&mut self, end: &RoundEnd);

    /// Called whenever the engine needs an action from this bot.
    fn get_action(&mut self, snapshot: &RoundSnapshot) -> Result<Action, PolicyError>;
}

/// Three-card-draw bot driven by [`ActionPolicy`].
#[derive(Debug, Clone)]
pub struct DrawBot {
    name: String,
    policy: ActionPolicy,
    rng: StdRng,
}

impl DrawBot {
    /// Create a bot from configuration, seeding the RNG from
    /// `config.seed` or from entropy.
    pub fn new(config: &BotConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            name: config.name.clone(),
            policy: ActionPolicy::with_config(config.policy.clone(), config.discard.clone()),
            rng,
        }
    }

    /// Bot name from its configuration.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The policy this bot plays.
    pub fn policy(&self) -> &ActionPolicy {
        &self.policy
    }
}

impl Default for DrawBot {
    fn default() -> Self {
        Self::new(&BotConfig::default())
    }
}

impl PokerBot for DrawBot {
    fn handle_new_round(&mut self, start: &RoundStart) {
        debug!(
            "{}: round {} starts, bankroll {}, clock {:.1}s, cards {:?}, big blind {}",
            self.name, start.round_num, start.bankroll, start.game_clock, start.my_cards, start.big_blind
        );
    }

    fn handle_round_over(&mut self, end: &RoundEnd) {
        info!(
            "{}: round over on {} with delta {} ({:?} vs {:?})",
            self.name, end.street, end.delta, end.my_cards, end.opponent_cards
        );
    }

    fn get_action(&mut self, snapshot: &RoundSnapshot) -> Result<Action, PolicyError> {
        let action = self.policy.decide(snapshot, &mut self.rng)?;
        debug!("{}: {} {:?} -> {}", self.name, snapshot.street, snapshot.legal, action);
        Ok(action)
    }
}
