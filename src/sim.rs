//! Synthetic turns for profiling the policy offline.
//!
//! [`SnapshotGenerator`] deals random but internally consistent
//! [`RoundSnapshot`]s: board size follows the street, the hand shrinks to
//! two cards after the draw streets, and the legal action set and raise
//! bounds follow the usual no-limit rules. [`profile`] runs the policy over
//! many such turns in parallel and tallies what it chose.

use crate::bot::{Action, ActionKind, ActionPolicy, BotConfig, LegalActions, RoundSnapshot, TableConfig};
use crate::cards::{Board, Deck, Street};
use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fs::File;
use std::io::Write;

const STREETS: [Street; 5] = [Street::Preflop, Street::Flop, Street::Draw, Street::Turn, Street::River];

/// Action kinds the engine allows for the seat to act.
///
/// With nothing to call the seat may check, and bet unless either player
/// is all in. Facing a bet it may fold or call, and raise unless calling
/// already commits its whole stack or the opponent is all in.
pub fn legal_actions(pips: [u32; 2], stacks: [u32; 2], active: usize) -> LegalActions {
    let opponent = 1 - active;
    let continue_cost = pips[opponent].saturating_sub(pips[active]);
    let mut legal = LegalActions::empty();
    if continue_cost == 0 {
        legal.insert(ActionKind::Check);
        if stacks[0] > 0 && stacks[1] > 0 {
            legal.insert(ActionKind::Raise);
        }
    } else {
        legal.insert(ActionKind::Fold);
        legal.insert(ActionKind::Call);
        if continue_cost < stacks[active] && stacks[opponent] > 0 {
            legal.insert(ActionKind::Raise);
        }
    }
    legal
}

/// `(min, max)` total pip for a raise by the seat to act.
pub fn raise_bounds(pips: [u32; 2], stacks: [u32; 2], active: usize, big_blind: u32) -> (u32, u32) {
    let opponent = 1 - active;
    let continue_cost = pips[opponent].saturating_sub(pips[active]);
    let max_contribution = stacks[active].min(stacks[opponent] + continue_cost);
    let min_contribution = max_contribution.min(continue_cost + continue_cost.max(big_blind));
    (pips[active] + min_contribution, pips[active] + max_contribution)
}

/// Deals random turns consistent with the table configuration.
#[derive(Debug, Clone, Default)]
pub struct SnapshotGenerator {
    table: TableConfig,
}

impl SnapshotGenerator {
    /// Create a generator for the given table.
    pub fn new(table: TableConfig) -> Self {
        Self { table }
    }

    /// Deal one turn.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundSnapshot {
        let street = STREETS[rng.gen_range(0..STREETS.len())];
        self.generate_on(street, rng)
    }

    /// Deal one turn on a specific street.
    ///
    /// Board size equals the street code (capped at five). Draw streets
    /// hold three cards and offer only discard or check; later streets
    /// hold two.
    pub fn generate_on<R: Rng + ?Sized>(&self, street: Street, rng: &mut R) -> RoundSnapshot {
        let mut deck = Deck::new();
        deck.shuffle(rng);

        let active = rng.gen_range(0..2usize);
        let hand_size = match street {
            Street::Preflop | Street::Flop | Street::Draw => 3,
            _ => 2,
        };
        let mut hands = [Vec::new(), Vec::new()];
        hands[active] = deck.deal_n(hand_size);
        let board = Board::from_cards(deck.deal_n(usize::from(street.code()).min(Board::MAX)));

        let TableConfig { starting_stack, big_blind, small_blind, .. } = self.table;

        let (pips, committed) = match street {
            // seat 1 posts the big blind
            Street::Preflop => ([small_blind, big_blind], [0, 0]),
            _ => {
                let committed = rng.gen_range(big_blind..=(starting_stack / 4).max(big_blind));
                let pips = if street.is_discard_street() || rng.gen_bool(0.5) {
                    [0, 0]
                } else {
                    let mut pips = [0, 0];
                    let headroom = starting_stack - committed;
                    pips[1 - active] = rng.gen_range(big_blind.min(headroom)..=headroom);
                    pips
                };
                (pips, [committed, committed])
            }
        };
        let stacks = [
            starting_stack - committed[0] - pips[0],
            starting_stack - committed[1] - pips[1],
        ];

        let legal = if street.is_discard_street() {
            LegalActions::empty().with(ActionKind::Discard).with(ActionKind::Check)
        } else {
            legal_actions(pips, stacks, active)
        };
        let bounds = match legal.contains(ActionKind::Raise) {
            true => Some(raise_bounds(pips, stacks, active, big_blind)),
            false => None,
        };

        RoundSnapshot {
            active,
            street,
            hands,
            board,
            pips,
            stacks,
            legal,
            raise_bounds: bounds,
        }
    }
}

/// Tally of decisions made over generated turns.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Profile {
    /// Number of turns decided (including errors).
    pub decisions: u64,
    /// Count per chosen action kind.
    pub actions: FxHashMap<ActionKind, u64>,
    /// How often each hole card index was discarded.
    pub discard_indices: [u64; 3],
    /// Sum of all raise amounts.
    pub raise_total: u64,
    /// Turns on which the policy reported a contract violation.
    pub errors: u64,
}

impl Profile {
    /// Record one action.
    pub fn record(&mut self, action: &Action) {
        self.decisions += 1;
        *self.actions.entry(action.kind()).or_insert(0) += 1;
        match action {
            Action::Raise(amount) => self.raise_total += u64::from(*amount),
            Action::Discard(index) => self.discard_indices[usize::from(*index).min(2)] += 1,
            _ => {}
        }
    }

    /// Record a failed decision.
    pub fn record_error(&mut self) {
        self.decisions += 1;
        self.errors += 1;
    }

    /// Combine two tallies.
    pub fn merge(mut self, other: Profile) -> Profile {
        self.decisions += other.decisions;
        for (kind, count) in other.actions {
            *self.actions.entry(kind).or_insert(0) += count;
        }
        for (mine, theirs) in self.discard_indices.iter_mut().zip(other.discard_indices) {
            *mine += theirs;
        }
        self.raise_total += other.raise_total;
        self.errors += other.errors;
        self
    }

    /// Times an action kind was chosen.
    pub fn count(&self, kind: ActionKind) -> u64 {
        self.actions.get(&kind).copied().unwrap_or(0)
    }

    /// Share of decisions that chose an action kind.
    pub fn frequency(&self, kind: ActionKind) -> f64 {
        match self.decisions {
            0 => 0.0,
            n => self.count(kind) as f64 / n as f64,
        }
    }

    /// Average raise size, if any raise was made.
    pub fn mean_raise(&self) -> Option<f64> {
        match self.count(ActionKind::Raise) {
            0 => None,
            n => Some(self.raise_total as f64 / n as f64),
        }
    }

    /// Print a human-readable summary.
    pub fn print_summary(&self) {
        println!("Decisions: {}", self.decisions);
        for kind in ActionKind::ALL {
            println!("  {:<8} {:>10}  ({:.1}%)", kind.to_string(), self.count(kind), self.frequency(kind) * 100.0);
        }
        println!("  discards by index: {:?}", self.discard_indices);
        if let Some(mean) = self.mean_raise() {
            println!("  mean raise: {:.1}", mean);
        }
        if self.errors > 0 {
            println!("  errors: {}", self.errors);
        }
    }

    /// Save the tally as pretty JSON.
    pub fn save_json(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Run the configured policy over `decisions` generated turns.
///
/// Work is split into `batches` independently seeded batches (batch `i`
/// uses `seed + i`) that run in parallel; the result is the same for the
/// same arguments regardless of thread count. `on_batch` is called with
/// each finished batch's size, e.g. to advance a progress bar.
pub fn profile<F>(config: &BotConfig, decisions: u64, batches: usize, seed: u64, on_batch: F) -> Profile
where
    F: Fn(u64) + Sync,
{
    let policy = ActionPolicy::with_config(config.policy.clone(), config.discard.clone());
    let generator = SnapshotGenerator::new(config.table.clone());
    let batches = batches.max(1) as u64;
    let per_batch = decisions / batches;
    let remainder = decisions % batches;

    (0..batches)
        .into_par_iter()
        .map(|batch| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(batch));
            let size = per_batch + u64::from(batch < remainder);
            let mut tally = Profile::default();
            for _ in 0..size {
                let snapshot = generator.generate(&mut rng);
                match policy.decide(&snapshot, &mut rng) {
                    Ok(action) => tally.record(&action),
                    Err(e) => {
                        warn!("policy rejected generated turn: {}", e);
                        tally.record_error();
                    }
                }
            }
            on_batch(size);
            tally
        })
        .reduce(Profile::default, Profile::merge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_legal_actions_rules() {
        // nothing to call
        let legal = legal_actions([0, 0], [100, 100], 0);
        assert_eq!(legal.iter().collect::<Vec<_>>(), vec![ActionKind::Check, ActionKind::Raise]);

        // opponent all in
        let legal = legal_actions([0, 0], [100, 0], 0);
        assert_eq!(legal.iter().collect::<Vec<_>>(), vec![ActionKind::Check]);

        // facing a bet
        let legal = legal_actions([1, 2], [399, 398], 0);
        assert_eq!(
            legal.iter().collect::<Vec<_>>(),
            vec![ActionKind::Fold, ActionKind::Call, ActionKind::Raise]
        );

        // calling commits the whole stack
        let legal = legal_actions([0, 50], [40, 300], 0);
        assert!(!legal.contains(ActionKind::Raise));
    }

    #[test]
    fn test_raise_bounds() {
        // small blind opening: min raise to 4, max all in
        assert_eq!(raise_bounds([1, 2], [399, 398], 0, 2), (4, 400));
        // open bet postflop: min one big blind
        assert_eq!(raise_bounds([0, 0], [300, 300], 1, 2), (2, 300));
        // facing a bet of 30: min raise to 60
        assert_eq!(raise_bounds([0, 30], [300, 270], 0, 2), (60, 300));
        // capped by the opponent's stack
        assert_eq!(raise_bounds([0, 30], [300, 20], 0, 2), (50, 50));
    }

    #[test]
    fn test_generated_snapshots_are_consistent() {
        let generator = SnapshotGenerator::default();
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..2000 {
            let snapshot = generator.generate(&mut rng);
            assert_eq!(snapshot.board.len(), usize::from(snapshot.street.code()).min(5));
            assert!(!snapshot.legal.is_empty());
            assert_eq!(snapshot.raise_bounds.is_some(), snapshot.is_legal(ActionKind::Raise));
            if let Some((min, max)) = snapshot.raise_bounds {
                assert!(min <= max);
            }
            if snapshot.is_legal(ActionKind::Discard) {
                assert_eq!(snapshot.my_hand().len(), 3);
            }
            assert!(snapshot.opponent_hand().is_empty());
        }
    }

    #[test]
    fn test_policy_accepts_every_generated_turn() {
        let generator = SnapshotGenerator::default();
        let policy = ActionPolicy::new();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..2000 {
            let snapshot = generator.generate(&mut rng);
            let action = policy.decide(&snapshot, &mut rng).unwrap();
            assert!(snapshot.legal.allows(&action), "{} not in {:?}", action, snapshot.legal);
            if let (Action::Raise(amount), Some((min, max))) = (action, snapshot.raise_bounds) {
                assert!(amount >= min && amount <= max);
            }
        }
    }

    #[test]
    fn test_profile_is_deterministic() {
        let config = BotConfig::default();
        let seen = AtomicU64::new(0);
        let a = profile(&config, 1003, 4, 77, |n| {
            seen.fetch_add(n, Ordering::Relaxed);
        });
        let b = profile(&config, 1003, 4, 77, |_| {});

        assert_eq!(seen.load(Ordering::Relaxed), 1003);
        assert_eq!(a.decisions, 1003);
        assert_eq!(a.errors, 0);
        assert_eq!(a.actions, b.actions);
        assert_eq!(a.discard_indices, b.discard_indices);
        assert_eq!(a.raise_total, b.raise_total);
        let total: u64 = ActionKind::ALL.iter().map(|&k| a.count(k)).sum();
        assert_eq!(total, 1003);
    }

    #[test]
    fn test_profile_merge() {
        let mut left = Profile::default();
        left.record(&Action::Raise(10));
        left.record(&Action::Discard(2));
        let mut right = Profile::default();
        right.record(&Action::Raise(30));
        right.record_error();

        let merged = left.merge(right);
        assert_eq!(merged.decisions, 4);
        assert_eq!(merged.count(ActionKind::Raise), 2);
        assert_eq!(merged.mean_raise(), Some(20.0));
        assert_eq!(merged.discard_indices, [0, 0, 1]);
        assert_eq!(merged.errors, 1);
        assert_eq!(merged.frequency(ActionKind::Discard), 0.25);
    }
}
