//! Discard selection for the draw streets.
//!
//! On a draw street the bot throws one of its three hole cards, and the
//! discarded card is later shown to the opponent. The default
//! [`DiscardStrategy::Defensive`] strategy scores every candidate by how
//! much danger it would add to the board:
//!
//! - flush danger from suits already on the board
//! - straight danger from runs of consecutive ranks
//! - high-card exposure
//! - pairing the card the opponent already discarded
//!
//! plus a small random term so the choice is hard to model. A paired hand
//! with a much stronger kicker short-circuits the scoring and throws a
//! pair card.

use crate::cards::{Card, Rank};
use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the discard is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscardStrategy {
    /// Score each candidate against board danger (default).
    #[default]
    Defensive,
    /// Always throw the lowest ranked card.
    LowestRank,
}

/// Tunable weights for the defensive discard score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscardConfig {
    /// Which strategy to run.
    pub strategy: DiscardStrategy,
    /// Kicker must exceed the pair rank by more than this many ranks
    /// before a pair card is thrown.
    pub kicker_gap: u8,
    /// Penalty when the future board holds 3+ cards of the candidate's suit.
    pub flush_three: f64,
    /// Penalty when the future board holds exactly 2 cards of the candidate's suit.
    pub flush_two: f64,
    /// Penalty added at each step of the sorted rank scan where a run of
    /// three or more consecutive ranks is seen.
    pub straight_run: f64,
    /// Multiplier on the candidate's rank value.
    pub high_card_multiplier: f64,
    /// Penalty for matching the rank of the opponent's exposed discard.
    pub opponent_pair: f64,
    /// Upper bound (exclusive) of the uniform noise term.
    pub noise_max: f64,
}

impl Default for DiscardConfig {
    fn default() -> Self {
        Self {
            strategy: DiscardStrategy::Defensive,
            kicker_gap: 4,
            flush_three: 100.0,
            flush_two: 20.0,
            straight_run: 50.0,
            high_card_multiplier: 1.5,
            opponent_pair: 25.0,
            noise_max: 5.0,
        }
    }
}

/// Score breakdown for one discard candidate. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CandidateScore {
    /// Flush danger penalty.
    pub flush: f64,
    /// Straight danger penalty.
    pub straight: f64,
    /// High-card exposure penalty.
    pub high_card: f64,
    /// Penalty for pairing the opponent's discard.
    pub tell: f64,
    /// Random tie-break term.
    pub noise: f64,
}

impl CandidateScore {
    /// Sum of all terms.
    pub fn total(&self) -> f64 {
        self.flush + self.straight + self.high_card + self.tell + self.noise
    }
}

impl fmt::Display for CandidateScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} (flush {:.0}, straight {:.0}, high {:.1}, tell {:.0}, noise {:.2})",
            self.total(),
            self.flush,
            self.straight,
            self.high_card,
            self.tell,
            self.noise
        )
    }
}

/// Picks which of three hole cards to discard.
#[derive(Debug, Clone, Default)]
pub struct DiscardEvaluator {
    config: DiscardConfig,
}

impl DiscardEvaluator {
    /// Create with default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom weights.
    pub fn with_config(config: DiscardConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &DiscardConfig {
        &self.config
    }

    /// Index (0, 1 or 2) of the hole card to discard.
    ///
    /// The defensive strategy draws three values from `rng` unless the
    /// pair/kicker shortcut fires, in which case nothing is drawn.
    pub fn evaluate<R: Rng + ?Sized>(&self, hand: &[Card; 3], board: &[Card], rng: &mut R) -> usize {
        match self.config.strategy {
            DiscardStrategy::LowestRank => lowest_rank(hand),
            DiscardStrategy::Defensive => {
                if let Some(index) = self.split_pair(hand) {
                    trace!("discard shortcut: throwing pair card {}", hand[index]);
                    return index;
                }
                let scores = self.score_candidates(hand, board, rng);
                for (card, score) in hand.iter().zip(scores.iter()) {
                    trace!("discard candidate {}: {}", card, score);
                }
                first_minimum(&scores)
            }
        }
    }

    /// Index of the first pair card when the hand is a low pair with a
    /// kicker more than `kicker_gap` ranks above it.
    pub fn split_pair(&self, hand: &[Card; 3]) -> Option<usize> {
        let [a, b, c] = hand.map(|card| card.rank());
        let (pair, kicker) = if a == b && b != c {
            (a, c)
        } else if a == c && a != b {
            (a, b)
        } else if b == c && a != b {
            (b, a)
        } else {
            return None;
        };

        if u16::from(kicker.value()) > u16::from(pair.value()) + u16::from(self.config.kicker_gap) {
            hand.iter().position(|card| card.rank() == pair)
        } else {
            None
        }
    }

    /// Danger scores for discarding each of the three hole cards.
    ///
    /// Draws exactly one noise value per candidate, in hand order.
    pub fn score_candidates<R: Rng + ?Sized>(
        &self,
        hand: &[Card; 3],
        board: &[Card],
        rng: &mut R,
    ) -> [CandidateScore; 3] {
        let exposed = match board.len() {
            3 => Some(board[2].rank()),
            _ => None,
        };

        hand.map(|candidate| {
            let mut future = Vec::with_capacity(board.len() + 1);
            future.extend_from_slice(board);
            future.push(candidate);

            CandidateScore {
                flush: self.flush_danger(&future, candidate),
                straight: self.straight_danger(&future),
                high_card: self.config.high_card_multiplier * f64::from(candidate.rank().value()),
                tell: match exposed {
                    Some(rank) if rank == candidate.rank() => self.config.opponent_pair,
                    _ => 0.0,
                },
                noise: rng.gen::<f64>() * self.config.noise_max,
            }
        })
    }

    fn flush_danger(&self, future: &[Card], candidate: Card) -> f64 {
        match future.iter().filter(|c| c.suit() == candidate.suit()).count() {
            n if n >= 3 => self.config.flush_three,
            2 => self.config.flush_two,
            _ => 0.0,
        }
    }

    /// Adds `straight_run` at every scan step where the current run of
    /// consecutive ranks is three or longer, so a four-card run is charged
    /// twice.
    fn straight_danger(&self, future: &[Card]) -> f64 {
        let ranks = distinct_sorted_ranks(future);
        let mut run = 0u32;
        let mut danger = 0.0;
        for pair in ranks.windows(2) {
            if pair[1].value() == pair[0].value() + 1 {
                run += 1;
            } else {
                run = 0;
            }
            if run >= 2 {
                danger += self.config.straight_run;
            }
        }
        danger
    }
}

fn distinct_sorted_ranks(cards: &[Card]) -> Vec<Rank> {
    let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank()).collect();
    ranks.sort_unstable();
    ranks.dedup();
    ranks
}

fn lowest_rank(hand: &[Card; 3]) -> usize {
    let mut best = 0;
    for (i, card) in hand.iter().enumerate().skip(1) {
        if card.rank() < hand[best].rank() {
            best = i;
        }
    }
    best
}

fn first_minimum(scores: &[CandidateScore; 3]) -> usize {
    let mut best = 0;
    for i in 1..scores.len() {
        if scores[i].total() < scores[best].total() {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{parse_cards, Board};
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    /// Fails the test if the evaluator asks for randomness.
    struct NoDraw;

    impl RngCore for NoDraw {
        fn next_u32(&mut self) -> u32 {
            panic!("unexpected random draw")
        }
        fn next_u64(&mut self) -> u64 {
            panic!("unexpected random draw")
        }
        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            panic!("unexpected random draw")
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
            panic!("unexpected random draw")
        }
    }

    fn hand(s: &str) -> [Card; 3] {
        let cards = parse_cards(s).unwrap();
        [cards[0], cards[1], cards[2]]
    }

    fn zero_noise() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_pair_kicker_shortcut() {
        let eval = DiscardEvaluator::new();
        assert_eq!(eval.evaluate(&hand("2c2dAs"), &[], &mut NoDraw), 0);
        assert_eq!(eval.evaluate(&hand("As2c2d"), &[], &mut NoDraw), 1);
        assert_eq!(eval.evaluate(&hand("2cAs2d"), &[], &mut NoDraw), 0);
    }

    #[test]
    fn test_shortcut_needs_gap_above_threshold() {
        let eval = DiscardEvaluator::new();
        // 2 -> 7 is a gap of exactly 5 (fires), 2 -> 6 is 4 (does not)
        assert_eq!(eval.split_pair(&hand("2c2d7s")), Some(0));
        assert_eq!(eval.split_pair(&hand("2c2d6s")), None);
        // kicker below the pair never fires
        assert_eq!(eval.split_pair(&hand("KcKd2s")), None);
        // trips and three distinct ranks never fire
        assert_eq!(eval.split_pair(&hand("5c5d5s")), None);
        assert_eq!(eval.split_pair(&hand("5c9dKs")), None);
    }

    #[test]
    fn test_flush_danger_scenario() {
        let eval = DiscardEvaluator::new();
        let hand = hand("3h9cKs");
        let board = parse_cards("4h7h").unwrap();

        let scores = eval.score_candidates(&hand, &board, &mut zero_noise());
        assert_eq!(scores[0].flush, 100.0);
        assert_eq!(scores[1].flush, 0.0);
        assert_eq!(scores[2].flush, 0.0);
        assert_eq!(scores[0].total(), 101.5);
        assert_eq!(scores[1].total(), 10.5);
        assert_eq!(scores[2].total(), 16.5);

        assert_eq!(eval.evaluate(&hand, &board, &mut zero_noise()), 1);
    }

    #[test]
    fn test_flush_two_penalty() {
        let eval = DiscardEvaluator::new();
        let scores = eval.score_candidates(&hand("3h9cKs"), &parse_cards("4h").unwrap(), &mut zero_noise());
        assert_eq!(scores[0].flush, 20.0);
        assert_eq!(scores[1].flush, 0.0);
    }

    #[test]
    fn test_straight_run_counts_every_step() {
        let eval = DiscardEvaluator::new();
        // Throwing the 8 makes 5,6,7,8: charged at the 7 and again at the 8.
        let scores = eval.score_candidates(&hand("8cKd2s"), &parse_cards("5h6d7c").unwrap(), &mut zero_noise());
        assert_eq!(scores[0].straight, 100.0);
        // K or 2 leaves only the 5,6,7 run.
        assert_eq!(scores[1].straight, 50.0);
        assert_eq!(scores[2].straight, 50.0);
    }

    #[test]
    fn test_straight_run_resets_on_gap() {
        let eval = DiscardEvaluator::new();
        let scores = eval.score_candidates(&hand("9cKd2s"), &parse_cards("5h6d").unwrap(), &mut zero_noise());
        // 5,6,9: run of two only
        assert_eq!(scores[0].straight, 0.0);
        // duplicate ranks collapse before scanning: 2,5,6
        let scores = eval.score_candidates(&hand("6cKd2s"), &parse_cards("5h6d").unwrap(), &mut zero_noise());
        assert_eq!(scores[0].straight, 0.0);
    }

    #[test]
    fn test_opponent_tell() {
        let eval = DiscardEvaluator::new();
        let scores = eval.score_candidates(&hand("Qc3d8s"), &parse_cards("4h7dQh").unwrap(), &mut zero_noise());
        assert_eq!(scores[0].tell, 25.0);
        assert_eq!(scores[1].tell, 0.0);

        // Same rank but board is not exactly three cards: no tell.
        let scores = eval.score_candidates(&hand("Qc3d8s"), &parse_cards("4h7dQhJs").unwrap(), &mut zero_noise());
        assert_eq!(scores[0].tell, 0.0);
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let config = DiscardConfig {
            high_card_multiplier: 0.0,
            ..Default::default()
        };
        let eval = DiscardEvaluator::with_config(config);
        assert_eq!(eval.evaluate(&hand("2c9dKs"), &[], &mut zero_noise()), 0);
    }

    #[test]
    fn test_noise_consumes_three_draws() {
        let eval = DiscardEvaluator::new();
        let mut rng = StdRng::seed_from_u64(11);
        let mut reference = rng.clone();
        let scores = eval.score_candidates(&hand("3h9cKs"), &[], &mut rng);
        for score in scores {
            assert!(score.noise >= 0.0 && score.noise < 5.0);
        }
        for _ in 0..3 {
            reference.gen::<f64>();
        }
        assert_eq!(rng.next_u64(), reference.next_u64());
    }

    #[test]
    fn test_index_always_in_range() {
        let eval = DiscardEvaluator::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            let mut deck = crate::cards::Deck::new();
            deck.shuffle(&mut rng);
            let cards = deck.deal_n(3);
            let board_len = rng.gen_range(0..=Board::MAX);
            let board = deck.deal_n(board_len);
            let index = eval.evaluate(&[cards[0], cards[1], cards[2]], &board, &mut rng);
            assert!(index < 3);
        }
    }

    #[test]
    fn test_five_card_board() {
        let eval = DiscardEvaluator::new();
        let board = parse_cards("4h7h5c6dJs").unwrap();
        let scores = eval.score_candidates(&hand("8hKd2h"), &board, &mut zero_noise());
        // 8h: three hearts, and 4,5,6,7,8 charges at 6, 7 and 8
        assert_eq!(scores[0].flush, 100.0);
        assert_eq!(scores[0].straight, 150.0);
        // Kd: lone diamond beside the 6d, 4..7 charged at 6 and 7
        assert_eq!(scores[1].flush, 20.0);
        assert_eq!(scores[1].straight, 100.0);
        // 2h: three hearts, 2 does not touch the run
        assert_eq!(scores[2].flush, 100.0);
        assert_eq!(scores[2].straight, 100.0);
        // no tell off a five-card board
        assert!(scores.iter().all(|s| s.tell == 0.0));
        // 259 / 136.5 / 200
        assert_eq!(eval.evaluate(&hand("8hKd2h"), &board, &mut zero_noise()), 1);
    }

    #[test]
    fn test_wide_kicker_gap_never_fires() {
        let eval = DiscardEvaluator::with_config(DiscardConfig {
            kicker_gap: u8::MAX,
            ..Default::default()
        });
        assert_eq!(eval.split_pair(&hand("KcKdAs")), None);
        assert_eq!(eval.split_pair(&hand("2c2dAs")), None);
    }

    #[test]
    fn test_lowest_rank_strategy() {
        let eval = DiscardEvaluator::with_config(DiscardConfig {
            strategy: DiscardStrategy::LowestRank,
            ..Default::default()
        });
        assert_eq!(eval.evaluate(&hand("Kc4dTs"), &[], &mut NoDraw), 1);
        assert_eq!(eval.evaluate(&hand("4c4dTs"), &[], &mut NoDraw), 0);
        assert_eq!(eval.evaluate(&hand("AcKd2s"), &[], &mut NoDraw), 2);
    }
}
