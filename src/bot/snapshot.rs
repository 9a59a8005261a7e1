//! Read-only views the engine hands to the bot.
//!
//! The engine owns all round state. Each call into the bot receives a
//! [`RoundSnapshot`] describing the current turn; the lifecycle hooks
//! receive [`RoundStart`] and [`RoundEnd`]. All three deserialize from JSON
//! so recorded turns can be replayed through the `decide` binary.

use super::action::{ActionKind, LegalActions};
use crate::cards::{Board, Card, Street};
use serde::{Deserialize, Serialize};

/// State of the current betting round as seen by one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Our seat index (0 or 1). Seat 1 is the big blind.
    pub active: usize,
    /// Current street.
    pub street: Street,
    /// Hole cards per seat; the opponent's entry is empty unless revealed.
    pub hands: [Vec<Card>; 2],
    /// Community cards in deal order.
    #[serde(default)]
    pub board: Board,
    /// Chips each seat has put in during this betting round.
    pub pips: [u32; 2],
    /// Chips each seat has behind.
    pub stacks: [u32; 2],
    /// Action kinds the engine will accept.
    pub legal: LegalActions,
    /// `(min, max)` total raise size, present only when raising is legal.
    #[serde(default)]
    pub raise_bounds: Option<(u32, u32)>,
}

impl RoundSnapshot {
    fn opponent(&self) -> usize {
        1 - self.active
    }

    /// Our hole cards.
    pub fn my_hand(&self) -> &[Card] {
        &self.hands[self.active]
    }

    /// The opponent's hole cards, empty unless revealed.
    pub fn opponent_hand(&self) -> &[Card] {
        &self.hands[self.opponent()]
    }

    /// Our hole cards as a three-card array, if we still hold three.
    pub fn three_cards(&self) -> Option<[Card; 3]> {
        match self.my_hand() {
            &[a, b, c] => Some([a, b, c]),
            _ => None,
        }
    }

    /// Check if an action kind is legal.
    pub fn is_legal(&self, kind: ActionKind) -> bool {
        self.legal.contains(kind)
    }

    /// Our pip.
    pub fn my_pip(&self) -> u32 {
        self.pips[self.active]
    }

    /// The opponent's pip.
    pub fn opponent_pip(&self) -> u32 {
        self.pips[self.opponent()]
    }

    /// Our remaining stack.
    pub fn my_stack(&self) -> u32 {
        self.stacks[self.active]
    }

    /// The opponent's remaining stack.
    pub fn opponent_stack(&self) -> u32 {
        self.stacks[self.opponent()]
    }

    /// Chips needed to stay in the pot.
    pub fn continue_cost(&self) -> u32 {
        self.opponent_pip().saturating_sub(self.my_pip())
    }

    /// Chips we have put into the pot this round, given the starting stack.
    pub fn my_contribution(&self, starting_stack: u32) -> u32 {
        starting_stack.saturating_sub(self.my_stack())
    }

    /// Chips the opponent has put into the pot this round.
    pub fn opponent_contribution(&self, starting_stack: u32) -> u32 {
        starting_stack.saturating_sub(self.opponent_stack())
    }

    /// Total pot, given the starting stack.
    pub fn pot(&self, starting_stack: u32) -> u32 {
        self.my_contribution(starting_stack) + self.opponent_contribution(starting_stack)
    }

    /// Whether we are the big blind this round.
    pub fn is_big_blind(&self) -> bool {
        self.active == 1
    }
}

/// Delivered when a new round starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundStart {
    /// Chips won or lost over the match so far.
    pub bankroll: i64,
    /// Seconds left on the match clock.
    pub game_clock: f64,
    /// Round number, starting at 1.
    pub round_num: u32,
    /// Our three hole cards.
    pub my_cards: Vec<Card>,
    /// Whether we post the big blind.
    pub big_blind: bool,
}

/// Delivered when a round ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEnd {
    /// Our bankroll change for the round.
    pub delta: i64,
    /// Street the round ended on.
    pub street: Street,
    /// Our hole cards at the end of the round.
    pub my_cards: Vec<Card>,
    /// The opponent's cards, empty if not revealed.
    #[serde(default)]
    pub opponent_cards: Vec<Card>,
}
