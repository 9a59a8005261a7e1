//! Static two-card strength lookup.
//!
//! The table encodes how strong a two-card holding is before any board
//! cards are known. Rows and columns are indexed by [`Rank::table_index`]
//! (A,K,Q,...,2). The diagonal holds pocket pairs; for two different ranks
//! the two mirrored entries are the suited and offsuit readings, and
//! [`PairStrengthTable::score_pair`] picks between them by suit.

use crate::cards::{Card, Rank};

/// Raw strength values, rows and columns ordered A,K,Q,J,T,9,8,7,6,5,4,3,2.
const PAIR_STRENGTH: [[f64; 13]; 13] = [
    //  A     K     Q     J     T     9     8     7     6     5     4     3     2
    [9.95, 3.96, 2.90, 2.32, 1.97, 1.53, 1.35, 1.23, 1.06, 1.16, 1.05, 0.95, 0.85], // A
    [3.19, 8.17, 2.07, 1.73, 1.52, 1.14, 0.91, 0.81, 0.71, 0.60, 0.52, 0.45, 0.39], // K
    [2.06, 1.29, 6.58, 1.53, 1.38, 1.05, 0.78, 0.53, 0.46, 0.39, 0.34, 0.27, 0.22], // Q
    [1.49, 0.94, 0.80, 5.21, 1.34, 1.02, 0.79, 0.51, 0.29, 0.25, 0.21, 0.19, 0.16], // J
    [1.13, 0.73, 0.63, 0.63, 4.08, 1.03, 0.85, 0.58, 0.33, 0.20, 0.18, 0.16, 0.13], // T
    [0.70, 0.37, 0.33, 0.33, 0.36, 3.15, 0.89, 0.68, 0.44, 0.19, 0.13, 0.11, 0.08], // 9
    [0.53, 0.27, 0.22, 0.22, 0.25, 0.26, 2.43, 0.77, 0.59, 0.32, 0.14, 0.07, 0.05], // 8
    [0.41, 0.22, 0.13, 0.13, 0.16, 0.18, 0.19, 1.86, 0.66, 0.43, 0.20, 0.09, 0.01], // 7
    [0.33, 0.16, 0.08, 0.04, 0.07, 0.09, 0.11, 0.14, 1.49, 0.57, 0.37, 0.13, 0.03], // 6
    [0.33, 0.12, 0.05, 0.02, 0.00, 0.01, 0.03, 0.07, 0.09, 1.19, 0.53, 0.32, 0.08], // 5
    [0.28, 0.08, 0.03, 0.00, 0.00, 0.00, 0.00, 0.00, 0.03, 0.06, 0.97, 0.23, 0.06], // 4
    [0.25, 0.05, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.78, 0.02], // 3
    [0.20, 0.02, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.00, 0.61], // 2
];

/// Two-card strength scorer backed by a constant 13x13 matrix.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairStrengthTable;

impl PairStrengthTable {
    /// Raw table entry at (`row`, `col`), both in table order.
    #[inline]
    pub fn entry(row: Rank, col: Rank) -> f64 {
        PAIR_STRENGTH[row.table_index()][col.table_index()]
    }

    /// Strength of a pocket pair of `rank`.
    #[inline]
    pub fn pocket_pair(rank: Rank) -> f64 {
        Self::entry(rank, rank)
    }

    /// Score two hole cards.
    ///
    /// Pairs read the diagonal regardless of suit. Otherwise both mirrored
    /// entries are read; suited cards get the higher one and offsuit cards
    /// the lower, so the result does not depend on argument order.
    pub fn score_pair(a: Card, b: Card) -> f64 {
        if a.rank() == b.rank() {
            return Self::pocket_pair(a.rank());
        }

        let score1 = Self::entry(a.rank(), b.rank());
        let score2 = Self::entry(b.rank(), a.rank());
        if a.suit() == b.suit() {
            score1.max(score2)
        } else {
            score1.min(score2)
        }
    }
}
