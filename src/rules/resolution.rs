//! Challenge resolution: counting the table and deciding who pays.

use serde::{Deserialize, Serialize};

use crate::core::{Bet, CallPenalty, DiceHand, ParticipantId};

/// Why a participant lost a die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossReason {
    /// The challenged bet was false; its maker pays.
    BetWasFalse,
    /// The challenged bet held; the challenger (or everyone else) pays.
    CallWasWrong,
}

/// Count dice on the table that satisfy a bet on `face`.
///
/// Under wild mode each one is added once for non-one faces.
pub fn count_on_table<'a, I>(hands: I, face: u8, wild_mode: bool) -> u32
where
    I: IntoIterator<Item = &'a DiceHand>,
{
    hands.into_iter().map(|hand| hand.matching(face, wild_mode)).sum()
}

/// Whether a bet holds given the actual count.
#[must_use]
pub fn bet_holds(bet: Bet, actual: u32) -> bool {
    actual >= bet.count
}

/// Participants who lose a die after a challenge, and why.
///
/// `seating` is the active participants in turn order.
#[must_use]
pub fn losers(
    bet_held: bool,
    bettor: ParticipantId,
    challenger: ParticipantId,
    penalty: CallPenalty,
    seating: &[ParticipantId],
) -> (Vec<ParticipantId>, LossReason) {
    if !bet_held {
        return (vec![bettor], LossReason::BetWasFalse);
    }

    let losers = match penalty {
        CallPenalty::Challenger => vec![challenger],
        CallPenalty::AllButBettor => seating.iter().copied().filter(|&p| p != bettor).collect(),
    };
    (losers, LossReason::CallWasWrong)
}
