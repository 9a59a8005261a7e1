//! Card primitives shared by the evaluators and the policy.
//!
//! - `card`: Rank, suit, card, board, street and deck representations

pub mod card;

pub use card::{parse_cards, Board, BoardSizeError, Card, CardParseError, Deck, Rank, Street, StreetError, Suit};
