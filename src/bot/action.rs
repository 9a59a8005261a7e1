//! Actions the bot can return to the engine.
//!
//! This module defines the five action constructors, the kinds the engine
//! reports as legal, and the compact codes used in logs and on the CLI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete action for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Fold the hand, forfeiting any chips invested.
    Fold,
    /// Match the opponent's pip.
    Call,
    /// Pass when there is nothing to call.
    Check,
    /// Raise to a total pip of this many chips.
    Raise(u32),
    /// Throw the hole card at this index (0-2).
    Discard(u8),
}

impl Action {
    /// The kind of this action.
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Fold => ActionKind::Fold,
            Action::Call => ActionKind::Call,
            Action::Check => ActionKind::Check,
            Action::Raise(_) => ActionKind::Raise,
            Action::Discard(_) => ActionKind::Discard,
        }
    }

    /// Raise amount if applicable.
    pub fn amount(&self) -> Option<u32> {
        match self {
            Action::Raise(amt) => Some(*amt),
            _ => None,
        }
    }

    /// Discard index if applicable.
    pub fn discard_index(&self) -> Option<u8> {
        match self {
            Action::Discard(index) => Some(*index),
            _ => None,
        }
    }

    /// Get a short code for this action.
    pub fn code(&self) -> String {
        match self {
            Action::Fold => "F".to_string(),
            Action::Call => "C".to_string(),
            Action::Check => "K".to_string(),
            Action::Raise(amt) => format!("R{}", amt),
            Action::Discard(index) => format!("D{}", index),
        }
    }

    /// Parse an action from its short code.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let head = chars.next()?;
        let rest = chars.as_str();
        match (head, rest.is_empty()) {
            ('F', true) => Some(Action::Fold),
            ('C', true) => Some(Action::Call),
            ('K', true) => Some(Action::Check),
            ('R', false) => rest.parse::<u32>().ok().map(Action::Raise),
            ('D', false) => match rest.parse::<u8>().ok()? {
                index @ 0..=2 => Some(Action::Discard(index)),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => write!(f, "Fold"),
            Action::Call => write!(f, "Call"),
            Action::Check => write!(f, "Check"),
            Action::Raise(amt) => write!(f, "Raise to {}", amt),
            Action::Discard(index) => write!(f, "Discard #{}", index),
        }
    }
}

/// Kind of action, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// [`Action::Fold`]
    Fold = 0,
    /// [`Action::Call`]
    Call,
    /// [`Action::Check`]
    Check,
    /// [`Action::Raise`]
    Raise,
    /// [`Action::Discard`]
    Discard,
}

impl ActionKind {
    /// All kinds in a fixed order.
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Fold,
        ActionKind::Call,
        ActionKind::Check,
        ActionKind::Raise,
        ActionKind::Discard,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Fold => "fold",
            ActionKind::Call => "call",
            ActionKind::Check => "check",
            ActionKind::Raise => "raise",
            ActionKind::Discard => "discard",
        };
        write!(f, "{}", name)
    }
}

/// Set of action kinds the engine currently allows.
///
/// Serialized as a list of kind names, e.g. `["check", "raise"]`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ActionKind>", into = "Vec<ActionKind>")]
pub struct LegalActions {
    bits: u8,
}

impl LegalActions {
    /// Create an empty set.
    pub fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Add a kind to the set.
    pub fn insert(&mut self, kind: ActionKind) {
        self.bits |= kind.bit();
    }

    /// Builder form of [`LegalActions::insert`].
    pub fn with(mut self, kind: ActionKind) -> Self {
        self.insert(kind);
        self
    }

    /// Check if a kind is legal.
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.bits & kind.bit() != 0
    }

    /// Check if an action's kind is legal.
    pub fn allows(&self, action: &Action) -> bool {
        self.contains(action.kind())
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterate over the legal kinds in [`ActionKind::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        ActionKind::ALL.into_iter().filter(move |&k| self.contains(k))
    }
}

impl FromIterator<ActionKind> for LegalActions {
    fn from_iter<I: IntoIterator<Item = ActionKind>>(iter: I) -> Self {
        let mut set = Self::empty();
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl From<Vec<ActionKind>> for LegalActions {
    fn from(kinds: Vec<ActionKind>) -> Self {
        kinds.into_iter().collect()
    }
}

impl From<LegalActions> for Vec<ActionKind> {
    fn from(set: LegalActions) -> Self {
        set.iter().collect()
    }
}

impl fmt::Debug for LegalActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
