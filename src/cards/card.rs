//! Card representation for three-card draw.
//!
//! This module provides the fundamental card types used by the bot:
//! - `Rank` and `Suit`: the two halves of a card
//! - `Card`: A single playing card with rank and suit
//! - `Board`: Community cards (0-5 cards)
//! - `Street`: The engine's street code
//! - `Deck`: A deck of 52 cards with dealing functionality

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rank characters for display, indexed by `Rank::value`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Rank of a card.
///
/// The discriminant is the rank's *value* (2 = 0, Ace = 12), which is the
/// ordering used for rank arithmetic. The strength table uses the reversed
/// ordering, see [`Rank::table_index`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Two = 0,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// All ranks from Two to Ace.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Rank value 0-12 (2-A).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Index into the strength table, which runs A,K,Q,...,2 (Ace = 0).
    #[inline]
    pub fn table_index(self) -> usize {
        12 - self as usize
    }

    /// Rank from its value (0-12).
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Parse a rank character ('2'-'9', 'T', 'J', 'Q', 'K', 'A').
    pub fn from_char(c: char) -> Option<Self> {
        RANK_CHARS
            .iter()
            .position(|&r| r == c.to_ascii_uppercase())
            .and_then(|i| Self::from_value(i as u8))
    }

    /// Rank character for display.
    pub fn to_char(self) -> char {
        RANK_CHARS[self as usize]
    }
}

/// Suit of a card, written `c d h s`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs = 0,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Parse a suit character ('c', 'd', 'h', 's').
    pub fn from_char(c: char) -> Option<Self> {
        SUIT_CHARS
            .iter()
            .position(|&s| s == c.to_ascii_lowercase())
            .map(|i| Self::ALL[i])
    }

    /// Suit character for display.
    pub fn to_char(self) -> char {
        SUIT_CHARS[self as usize]
    }
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a new card.
    #[inline]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Create a card from its ID (0-51): rank value * 4 + suit.
    pub fn from_id(id: u8) -> Option<Self> {
        let rank = Rank::from_value(id / 4)?;
        Some(Self::new(rank, Suit::ALL[(id % 4) as usize]))
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.rank.value() * 4 + self.suit as u8
    }

    /// Get the card's rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

/// Error returned when a card string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardParseError(pub String);

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid card: {:?} (expected e.g. \"As\", \"Td\")", self.0)
    }
}

impl std::error::Error for CardParseError {}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parse a card from string like "As", "Kh", "2c".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(su), None) => {
                let rank = Rank::from_char(r).ok_or_else(|| CardParseError(s.to_string()))?;
                let suit = Suit::from_char(su).ok_or_else(|| CardParseError(s.to_string()))?;
                Ok(Self::new(rank, suit))
            }
            _ => Err(CardParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.to_char(), self.suit.to_char())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Parse a run of cards like "AhKsQd" or "Ah Ks Qd".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    let s: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    if s.len() % 2 != 0 {
        return Err(CardParseError(s));
    }
    s.as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).parse())
        .collect()
}

/// Community cards on the board.
///
/// Append-only within a round. On a discard street a length of exactly 3
/// means the opponent has discarded and their card sits at index 2.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// Maximum number of board cards.
    pub const MAX: usize = 5;

    /// Create an empty board.
    pub fn new() -> Self {
        Self { cards: Vec::with_capacity(Self::MAX) }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        debug_assert!(cards.len() <= Self::MAX);
        Self { cards }
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Add a card to the board.
    pub fn add(&mut self, card: Card) {
        debug_assert!(self.cards.len() < Self::MAX);
        self.cards.push(card);
    }

    /// The card the opponent exposed by discarding first, if any.
    pub fn opponent_discard(&self) -> Option<Card> {
        match self.cards.len() {
            3 => Some(self.cards[2]),
            _ => None,
        }
    }
}

impl FromStr for Board {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        if cards.len() > Self::MAX {
            return Err(CardParseError(s.to_string()));
        }
        Ok(Self::from_cards(cards))
    }
}

/// More than [`Board::MAX`] cards were supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSizeError(pub usize);

impl fmt::Display for BoardSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board holds {} cards (at most {})", self.0, Board::MAX)
    }
}

impl std::error::Error for BoardSizeError {}

impl TryFrom<Vec<Card>> for Board {
    type Error = BoardSizeError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        if cards.len() > Self::MAX {
            return Err(BoardSizeError(cards.len()));
        }
        Ok(Self { cards })
    }
}

impl From<Board> for Vec<Card> {
    fn from(board: Board) -> Self {
        board.cards
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Street as reported by the engine.
///
/// Codes 2 and 3 are the draw streets on which each player may discard
/// one of their three hole cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Street {
    /// Hole cards only.
    Preflop = 0,
    /// Two board cards; first discard.
    Flop = 2,
    /// Second discard.
    Draw = 3,
    /// Fourth board card.
    Turn = 4,
    /// Fifth board card.
    River = 5,
    /// Hands are shown.
    Showdown = 6,
}

/// Error for an unknown street code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreetError(pub u8);

impl fmt::Display for StreetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid street code {} (expected 0, 2, 3, 4, 5 or 6)", self.0)
    }
}

impl std::error::Error for StreetError {}

impl Street {
    /// Get the engine code.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Check if a discard may be legal on this street.
    pub fn is_discard_street(&self) -> bool {
        matches!(self, Street::Flop | Street::Draw)
    }

    /// Get the next street.
    pub fn next(&self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Draw),
            Street::Draw => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }
}

impl TryFrom<u8> for Street {
    type Error = StreetError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Street::Preflop),
            2 => Ok(Street::Flop),
            3 => Ok(Street::Draw),
            4 => Ok(Street::Turn),
            5 => Ok(Street::River),
            6 => Ok(Street::Showdown),
            other => Err(StreetError(other)),
        }
    }
}

impl From<Street> for u8 {
    fn from(street: Street) -> Self {
        street.code()
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Street::Preflop => write!(f, "Preflop"),
            Street::Flop => write!(f, "Flop"),
            Street::Draw => write!(f, "Draw"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
        }
    }
}

/// A deck of 52 playing cards.
#[derive(Clone)]
pub struct Deck {
    cards: Vec<Card>,
    /// Index of next card to deal.
    index: usize,
}

impl Deck {
    /// Create a new deck in standard order.
    pub fn new() -> Self {
        let cards = Rank::ALL
            .iter()
            .flat_map(|&rank| Suit::ALL.iter().map(move |&suit| Card::new(rank, suit)))
            .collect();
        Self { cards, index: 0 }
    }

    /// Shuffle the remaining cards in the deck.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards[self.index..].shuffle(rng);
    }

    /// Deal the next card from the deck.
    pub fn deal(&mut self) -> Option<Card> {
        let card = self.cards.get(self.index).copied()?;
        self.index += 1;
        Some(card)
    }

    /// Deal multiple cards.
    pub fn deal_n(&mut self, n: usize) -> Vec<Card> {
        let end = (self.index + n).min(self.cards.len());
        let cards = self.cards[self.index..end].to_vec();
        self.index = end;
        cards
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.index
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
