//! Participants: a named seat, its dice, and how it plays.
//!
//! Exactly two strategies exist, so they form a closed enum rather than a
//! trait object hierarchy. Only the manual variant reaches outside the
//! engine, through its `Actor`.

use tracing::debug;

use crate::core::{Bet, DiceHand, GameRng, ParticipantId, TableView};
use crate::error::EngineError;
use crate::events::EventSink;
use crate::rules;

use super::actor::{Actor, Decision};
use super::automated::AutomatedStrategy;
use super::manual;

/// How a participant produces decisions and bets.
pub enum Strategy {
    /// Answers come from an external actor (a human, a script).
    Manual(Box<dyn Actor>),
    /// Answers come from the odds model.
    Automated(AutomatedStrategy),
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Manual(_) => write!(f, "Manual"),
            Strategy::Automated(s) => f.debug_tuple("Automated").field(s).finish(),
        }
    }
}

/// A seat at the table.
#[derive(Debug)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    hand: DiceHand,
    strategy: Strategy,
}

impl Participant {
    /// Create a participant holding `hand`.
    #[must_use]
    pub fn new(
        id: ParticipantId,
        name: impl Into<String>,
        hand: DiceHand,
        strategy: Strategy,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            hand,
            strategy,
        }
    }

    /// Create a participant driven by an actor.
    #[must_use]
    pub fn manual(
        id: ParticipantId,
        name: impl Into<String>,
        hand: DiceHand,
        actor: impl Actor + 'static,
    ) -> Self {
        Self::new(id, name, hand, Strategy::Manual(Box::new(actor)))
    }

    /// Create a computer-controlled participant.
    #[must_use]
    pub fn automated(
        id: ParticipantId,
        name: impl Into<String>,
        hand: DiceHand,
        strategy: AutomatedStrategy,
    ) -> Self {
        Self::new(id, name, hand, Strategy::Automated(strategy))
    }

    // === Accessors ===

    /// Seat id.
    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Display name, unique within a session.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current dice.
    #[must_use]
    pub fn hand(&self) -> &DiceHand {
        &self.hand
    }

    /// Mutable access to the dice, for rolling and die loss.
    pub fn hand_mut(&mut self) -> &mut DiceHand {
        &mut self.hand
    }

    /// Check if this participant is computer-controlled.
    #[must_use]
    pub fn is_automated(&self) -> bool {
        matches!(self.strategy, Strategy::Automated(_))
    }

    /// Check if this participant still has dice.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.hand.is_empty()
    }

    // === Turns ===

    /// Decide whether to escalate or challenge the current bet.
    ///
    /// When no legal raise exists the decision is forced to `Call` without
    /// consulting the strategy.
    pub fn produce_decision(&mut self, view: &TableView) -> Result<Decision, EngineError> {
        let cornered = !rules::has_legal_raise(view.previous_bet, view.total_dice);
        if view.previous_bet.is_some() && cornered {
            debug!(participant = %self.name, "no legal raise left, forced call");
            return Ok(Decision::Call);
        }

        match &mut self.strategy {
            Strategy::Manual(actor) => Ok(actor.decide(view, &self.hand)?),
            Strategy::Automated(strategy) => Ok(strategy.decide(view, &self.hand)),
        }
    }

    /// Produce a legal bet over `view.previous_bet`.
    pub fn produce_bet(
        &mut self,
        view: &TableView,
        rng: &mut GameRng,
        sink: &mut dyn EventSink,
    ) -> Result<Bet, EngineError> {
        match &mut self.strategy {
            Strategy::Manual(actor) => {
                manual::request_bet(actor.as_mut(), self.id, view, &self.hand, sink)
            }
            Strategy::Automated(strategy) => strategy.propose_bet(view, &self.hand, rng),
        }
    }
}
