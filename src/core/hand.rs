//! A participant's privately held dice.
//!
//! Values are an unordered multiset: which physical die is lost on a failed
//! bet or call does not matter, only how many of each face remain.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rng::GameRng;

/// Lowest face on a die.
pub const MIN_FACE: u8 = 1;

/// Highest face on a die.
pub const MAX_FACE: u8 = 6;

/// The face that counts as any other face under wild mode.
pub const WILD_FACE: u8 = 1;

/// Dice held by one participant.
///
/// The size only ever shrinks during a session: `roll` replaces values but
/// keeps the size, `lose_one` drops a single die.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceHand {
    /// Current face values. Five dice fit inline without heap allocation.
    dice: SmallVec<[u8; 5]>,
}

impl DiceHand {
    /// Create a hand of `count` dice and roll it.
    #[must_use]
    pub fn rolled(count: u32, rng: &mut GameRng) -> Self {
        let mut hand = Self {
            dice: SmallVec::from_elem(MIN_FACE, count as usize),
        };
        hand.roll(rng);
        hand
    }

    /// Create a hand holding exactly the given faces.
    ///
    /// Panics if any face is outside 1..=6.
    #[must_use]
    pub fn from_faces(faces: &[u8]) -> Self {
        assert!(
            faces.iter().all(|f| (MIN_FACE..=MAX_FACE).contains(f)),
            "Die faces must be in 1..=6, got {:?}",
            faces
        );
        Self {
            dice: SmallVec::from_slice(faces),
        }
    }

    /// Re-roll every held die. The size is unchanged.
    pub fn roll(&mut self, rng: &mut GameRng) {
        for die in self.dice.iter_mut() {
            *die = rng.roll_die();
        }
    }

    /// Remove one die. Returns `false` (and does nothing) if the hand is empty.
    ///
    /// The owner of the table total must decrement it by the same amount.
    pub fn lose_one(&mut self) -> bool {
        self.dice.pop().is_some()
    }

    /// Number of held dice showing exactly `face`.
    #[must_use]
    pub fn count_of(&self, face: u8) -> u32 {
        self.dice.iter().filter(|&&d| d == face).count() as u32
    }

    /// Number of held dice that satisfy a bet on `face`.
    ///
    /// Under wild mode ones also match any other face. A bet on ones itself
    /// counts each one once.
    #[must_use]
    pub fn matching(&self, face: u8, wild_mode: bool) -> u32 {
        let literal = self.count_of(face);
        if wild_mode && face != WILD_FACE {
            literal + self.count_of(WILD_FACE)
        } else {
            literal
        }
    }

    /// Number of dice held.
    #[must_use]
    pub fn len(&self) -> u32 {
        self.dice.len() as u32
    }

    /// Check if the hand has no dice left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Current face values, in roll order.
    #[must_use]
    pub fn faces(&self) -> &[u8] {
        &self.dice
    }
}
