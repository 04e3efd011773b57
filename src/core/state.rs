//! Table state shared by every participant.
//!
//! ## TableState
//!
//! Owned exclusively by the session and lent to the round engine:
//! - Total dice across all active hands (the invariant every legality and
//!   odds query reads)
//! - Wild mode (fixed for the session)
//! - Current bet, current and previous turn
//! - Bets accepted this round
//!
//! ## TableView
//!
//! The immutable snapshot handed to a participant when it must decide or
//! bet. Participants never see `TableState` itself.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::bet::{Bet, BetRecord};
use super::player::ParticipantId;

/// What a participant may observe when asked to act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    /// Round number (starts at 1).
    pub round: u32,
    /// Last accepted bet, or `None` when the opening bet is being asked for.
    pub previous_bet: Option<Bet>,
    /// Dice across all active hands.
    pub total_dice: u32,
    /// Whether ones are wild.
    pub wild_mode: bool,
}

/// Session-wide table state.
///
/// Uses an `im` vector for the bet history so round outcomes can hand out
/// the history without copying it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TableState {
    total_dice: u32,
    wild_mode: bool,
    current_bet: Option<Bet>,
    current: ParticipantId,
    previous: Option<ParticipantId>,
    history: Vector<BetRecord>,
}

impl TableState {
    /// Create table state for a fresh session.
    #[must_use]
    pub fn new(total_dice: u32, wild_mode: bool, starter: ParticipantId) -> Self {
        Self {
            total_dice,
            wild_mode,
            current_bet: None,
            current: starter,
            previous: None,
            history: Vector::new(),
        }
    }

    /// Dice across all active hands.
    #[must_use]
    pub fn total_dice(&self) -> u32 {
        self.total_dice
    }

    /// Whether ones are wild.
    #[must_use]
    pub fn wild_mode(&self) -> bool {
        self.wild_mode
    }

    /// Last accepted bet this round.
    #[must_use]
    pub fn current_bet(&self) -> Option<Bet> {
        self.current_bet
    }

    /// Participant whose turn it is.
    #[must_use]
    pub fn current(&self) -> ParticipantId {
        self.current
    }

    /// Participant who placed the current bet.
    #[must_use]
    pub fn previous(&self) -> Option<ParticipantId> {
        self.previous
    }

    /// Bets accepted this round, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<BetRecord> {
        &self.history
    }

    /// Snapshot for the participant about to act.
    #[must_use]
    pub fn view(&self, round: u32) -> TableView {
        TableView {
            round,
            previous_bet: self.current_bet,
            total_dice: self.total_dice,
            wild_mode: self.wild_mode,
        }
    }

    // === Mutation ===

    /// Accept a bet from the current participant and pass the turn.
    pub fn record_bet(&mut self, bet: Bet, round: u32, next: ParticipantId) {
        self.history.push_back(BetRecord {
            participant: self.current,
            bet,
            round,
        });
        self.current_bet = Some(bet);
        self.previous = Some(self.current);
        self.current = next;
    }

    /// Remove one die from the table total.
    ///
    /// Panics if the total is already zero.
    pub fn remove_die(&mut self) {
        assert!(self.total_dice > 0, "Table total would go negative");
        self.total_dice -= 1;
    }

    /// Clear the bet and turn history for a new round.
    pub fn reset_round(&mut self, starter: ParticipantId) {
        self.current_bet = None;
        self.current = starter;
        self.previous = None;
        self.history.clear();
    }
}
