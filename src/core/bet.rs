//! Bet representation.
//!
//! A bet is the public claim "at least `count` dice showing `face` exist
//! across all hands". Whether a bet may be placed is decided by
//! [`crate::rules`]; this type only carries the values, so a rejected
//! candidate (face 9, count 0) is still representable and can be reported.

use serde::{Deserialize, Serialize};

use super::player::ParticipantId;

/// A claim about the dice on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bet {
    /// How many dice are claimed.
    pub count: u32,
    /// Which face they show.
    pub face: u8,
}

impl Bet {
    /// Create a new bet.
    #[must_use]
    pub const fn new(count: u32, face: u8) -> Self {
        Self { count, face }
    }
}

impl std::fmt::Display for Bet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x {}", self.count, self.face)
    }
}

/// An accepted bet with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetRecord {
    /// Who placed the bet.
    pub participant: ParticipantId,
    /// The bet placed.
    pub bet: Bet,
    /// Round in which it was placed (starts at 1).
    pub round: u32,
}
