//! Participant identification.
//!
//! ## ParticipantId
//!
//! Seat identifier assigned when a participant joins a session. Ids are
//! stable for the whole session: eliminating a participant removes it from
//! the active list but never renumbers the others.

use serde::{Deserialize, Serialize};

/// Seat identifier supporting up to 255 participants.
///
/// Seat indices are 0-based: the first participant to join is `ParticipantId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}
