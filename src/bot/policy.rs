//! Turn-by-turn action selection.
//!
//! [`ActionPolicy::decide`] walks a fixed branch order and returns the
//! first action that applies:
//!
//! 1. discard, when the engine allows it
//! 2. raise, big with a strong starting pair or small on a coin flip
//! 3. check
//! 4. fold or call, weighted towards calling
//!
//! The policy holds only configuration; all randomness comes from the
//! caller's RNG, so a seeded RNG replays the same decisions.

use super::action::{Action, ActionKind};
use super::config::PolicyConfig;
use super::snapshot::RoundSnapshot;
use crate::eval::{DiscardConfig, DiscardEvaluator, PairStrengthTable};
use log::debug;
use rand::Rng;
use std::fmt;

/// Chooses one legal action per turn.
#[derive(Debug, Clone, Default)]
pub struct ActionPolicy {
    config: PolicyConfig,
    discard: DiscardEvaluator,
}

impl ActionPolicy {
    /// Create with default thresholds and discard weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration.
    pub fn with_config(config: PolicyConfig, discard: DiscardConfig) -> Self {
        Self {
            config,
            discard: DiscardEvaluator::with_config(discard),
        }
    }

    /// Get the betting configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Get the discard evaluator.
    pub fn discard_evaluator(&self) -> &DiscardEvaluator {
        &self.discard
    }

    /// Choose the action for this turn.
    ///
    /// Errors only when the snapshot breaks the engine contract, e.g. a
    /// discard is offered without three hole cards, or there is nothing to
    /// fall back on once raising and checking are ruled out.
    pub fn decide<R: Rng + ?Sized>(&self, snapshot: &RoundSnapshot, rng: &mut R) -> Result<Action, PolicyError> {
        if snapshot.active > 1 {
            return Err(PolicyError::InvalidSeat(snapshot.active));
        }

        if snapshot.is_legal(ActionKind::Discard) {
            let hand = snapshot
                .three_cards()
                .ok_or(PolicyError::DiscardNeedsThreeCards(snapshot.my_hand().len()))?;
            let index = self.discard.evaluate(&hand, snapshot.board.cards(), rng);
            debug!("discarding {} from {:?} on {:?}", hand[index], hand, snapshot.board);
            return Ok(Action::Discard(index as u8));
        }

        if snapshot.is_legal(ActionKind::Raise) {
            if let Some(action) = self.raise(snapshot, rng)? {
                return Ok(action);
            }
        }

        if snapshot.is_legal(ActionKind::Check) {
            return Ok(Action::Check);
        }

        if !snapshot.is_legal(ActionKind::Call) {
            return Err(PolicyError::NoFallbackAction);
        }
        let roll = rng.gen::<f64>();
        if roll < self.config.fold_probability && snapshot.is_legal(ActionKind::Fold) {
            debug!("folding to {} (roll {:.3})", snapshot.continue_cost(), roll);
            Ok(Action::Fold)
        } else {
            Ok(Action::Call)
        }
    }

    /// Raise decision; `None` means fall through to check/call.
    fn raise<R: Rng + ?Sized>(&self, snapshot: &RoundSnapshot, rng: &mut R) -> Result<Option<Action>, PolicyError> {
        let (min_raise, max_raise) = snapshot.raise_bounds.ok_or(PolicyError::MissingRaiseBounds)?;
        let hand = snapshot.my_hand();
        if hand.len() < 2 {
            return Err(PolicyError::NotEnoughHoleCards(hand.len()));
        }

        let score = PairStrengthTable::score_pair(hand[0], hand[1]);
        if score > self.config.strong_threshold {
            let amount = min_raise
                .saturating_mul(self.config.strong_raise_multiplier)
                .min(max_raise);
            debug!("strong pair {}{} scores {:.2}, raising to {}", hand[0], hand[1], score, amount);
            return Ok(Some(Action::Raise(amount)));
        }

        let roll = rng.gen::<f64>();
        if roll < self.config.bluff_raise_probability {
            debug!("weak pair {}{} scores {:.2}, min-raising (roll {:.3})", hand[0], hand[1], score, roll);
            Ok(Some(Action::Raise(min_raise)))
        } else {
            Ok(None)
        }
    }
}

/// Engine-contract violations detected while deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// Seat index other than 0 or 1.
    InvalidSeat(usize),
    /// Discard offered but we do not hold exactly three cards.
    DiscardNeedsThreeCards(usize),
    /// Raise offered without raise bounds.
    MissingRaiseBounds,
    /// Raise offered with fewer than two hole cards to score.
    NotEnoughHoleCards(usize),
    /// Neither raise, check nor call is available.
    NoFallbackAction,
}

impl fmt::Display for PolicyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSeat(seat) => write!(f, "Invalid seat index {}", seat),
            Self::DiscardNeedsThreeCards(n) => {
                write!(f, "Discard is legal but the hand holds {} cards (expected 3)", n)
            }
            Self::MissingRaiseBounds => write!(f, "Raise is legal but no raise bounds were given"),
            Self::NotEnoughHoleCards(n) => write!(f, "Cannot score a hand of {} cards", n),
            Self::NoFallbackAction => write!(f, "Neither raise, check nor call is legal"),
        }
    }
}

impl std::error::Error for PolicyError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Board, Street};
    use crate::bot::action::LegalActions;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every draw returns 0.0.
    fn low_rolls() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every draw returns just under 1.0.
    fn high_rolls() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn snapshot(hand: &str, board: &str, legal: &[ActionKind], bounds: Option<(u32, u32)>) -> RoundSnapshot {
        RoundSnapshot {
            active: 0,
            street: Street::Preflop,
            hands: [parse_cards(hand).unwrap(), vec![]],
            board: board.parse::<Board>().unwrap(),
            pips: [10, 20],
            stacks: [390, 380],
            legal: legal.iter().copied().collect::<LegalActions>(),
            raise_bounds: bounds,
        }
    }

    #[test]
    fn test_strong_pair_raises_big() {
        let policy = ActionPolicy::new();
        let mut state = snapshot("AsAd", "", &[ActionKind::Call, ActionKind::Raise], Some((20, 200)));
        state.pips = [10, 20];
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Raise(200)));

        // capped at the maximum
        let state = snapshot("KsKd7c", "", &[ActionKind::Check, ActionKind::Raise], Some((4, 30)));
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Raise(30)));

        // multiplier applies below the cap
        let state = snapshot("AsKs2d", "", &[ActionKind::Check, ActionKind::Raise], Some((4, 400)));
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Raise(40)));
    }

    #[test]
    fn test_weak_hand_min_raises_on_low_roll() {
        let policy = ActionPolicy::new();
        let state = snapshot("7c2d9h", "", &[ActionKind::Check, ActionKind::Raise], Some((4, 400)));
        assert_eq!(policy.decide(&state, &mut low_rolls()), Ok(Action::Raise(4)));
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Check));
    }

    #[test]
    fn test_weak_hand_falls_through_to_call_or_fold() {
        let policy = ActionPolicy::new();
        let legal = [ActionKind::Fold, ActionKind::Call, ActionKind::Raise];
        let state = snapshot("7c2d9h", "", &legal, Some((40, 380)));
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Call));

        let state = snapshot("7c2d9h", "", &[ActionKind::Fold, ActionKind::Call], None);
        assert_eq!(policy.decide(&state, &mut low_rolls()), Ok(Action::Fold));
        assert_eq!(policy.decide(&state, &mut high_rolls()), Ok(Action::Call));
    }

    #[test]
    fn test_discard_takes_priority() {
        let policy = ActionPolicy::new();
        let legal = [ActionKind::Discard, ActionKind::Check, ActionKind::Raise];
        let mut state = snapshot("3h9cKs", "4h7h", &legal, Some((2, 380)));
        state.street = Street::Flop;
        assert_eq!(policy.decide(&state, &mut low_rolls()), Ok(Action::Discard(1)));
    }

    #[test]
    fn test_contract_violations() {
        let policy = ActionPolicy::new();

        let state = snapshot("3h9c", "4h7h", &[ActionKind::Discard], None);
        assert_eq!(policy.decide(&state, &mut low_rolls()), Err(PolicyError::DiscardNeedsThreeCards(2)));

        let state = snapshot("3h9c", "", &[ActionKind::Raise], None);
        assert_eq!(policy.decide(&state, &mut low_rolls()), Err(PolicyError::MissingRaiseBounds));

        let state = snapshot("3h9c", "", &[ActionKind::Fold], None);
        assert_eq!(policy.decide(&state, &mut low_rolls()), Err(PolicyError::NoFallbackAction));

        let mut state = snapshot("3h9c", "", &[ActionKind::Check], None);
        state.active = 2;
        assert_eq!(policy.decide(&state, &mut low_rolls()), Err(PolicyError::InvalidSeat(2)));
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let policy = ActionPolicy::new();
        let states = [
            snapshot("7c2d9h", "", &[ActionKind::Check, ActionKind::Raise], Some((4, 400))),
            snapshot("7c2d9h", "", &[ActionKind::Fold, ActionKind::Call], None),
            snapshot("3h9cKs", "4h7h", &[ActionKind::Discard, ActionKind::Check], None),
        ];
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|i| policy.decide(&states[i % states.len()], &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }

    #[test]
    fn test_raise_always_within_bounds() {
        let policy = ActionPolicy::new();
        let mut rng = StdRng::seed_from_u64(17);
        let hands = ["AsAd", "7c2d", "KsQs", "9h8h", "5c5d"];
        for hand in hands {
            for (min, max) in [(2, 2), (2, 400), (50, 120), (400, 400)] {
                let state = snapshot(hand, "", &[ActionKind::Check, ActionKind::Raise], Some((min, max)));
                for _ in 0..20 {
                    if let Action::Raise(amount) = policy.decide(&state, &mut rng).unwrap() {
                        assert!(amount >= min && amount <= max, "{} not in [{}, {}]", amount, min, max);
                    }
                }
            }
        }
    }
}
