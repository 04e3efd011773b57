//! Game event types.
//!
//! Events are the only output the engine produces for presentation. The
//! engine never formats text; adapters render these however they like.
//! Participants are referenced by seat id; `SessionStarted` carries the
//! id-to-name mapping.

use serde::{Deserialize, Serialize};

use crate::core::{Bet, ParticipantId};
use crate::rules::LossReason;
use crate::strategy::Rejection;

/// One seat at the table, as announced when the session starts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub participant: ParticipantId,
    pub name: String,
    pub automated: bool,
    pub dice: u32,
}

/// One participant's dice, shown after a challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandReveal {
    pub participant: ParticipantId,
    pub faces: Vec<u8>,
}

/// Something that happened at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Seating for the session, in turn order.
    SessionStarted { seats: Vec<SeatInfo> },

    /// A round began; `starter` places the opening bet.
    RoundStarted {
        round: u32,
        starter: ParticipantId,
        total_dice: u32,
    },

    /// A bet was accepted.
    BetPlaced { participant: ParticipantId, bet: Bet },

    /// A manual participant's bet was refused and will be asked for again.
    BetRejected {
        participant: ParticipantId,
        rejection: Rejection,
    },

    /// `challenger` called `bettor`'s bet.
    Challenged {
        challenger: ParticipantId,
        bettor: ParticipantId,
        bet: Bet,
    },

    /// Every active hand, revealed after a challenge.
    HandsRevealed { hands: Vec<HandReveal> },

    /// The challenge was settled.
    Resolved {
        bet: Bet,
        actual: u32,
        wild_mode: bool,
        losers: Vec<ParticipantId>,
        reason: LossReason,
    },

    /// A participant ran out of dice and left the table.
    Eliminated { participant: ParticipantId },

    /// One participant remains.
    Victory { winner: ParticipantId },
}

impl GameEvent {
    /// Short name of the event kind, matching its serialized tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            GameEvent::SessionStarted { .. } => "session_started",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::BetPlaced { .. } => "bet_placed",
            GameEvent::BetRejected { .. } => "bet_rejected",
            GameEvent::Challenged { .. } => "challenged",
            GameEvent::HandsRevealed { .. } => "hands_revealed",
            GameEvent::Resolved { .. } => "resolved",
            GameEvent::Eliminated { .. } => "eliminated",
            GameEvent::Victory { .. } => "victory",
        }
    }
}
