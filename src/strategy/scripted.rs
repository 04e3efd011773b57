//! Scripted actor for tests and replays.
//!
//! Answers come from two queues filled up front. Running out of answers is
//! an `ActorError::Exhausted`, which ends the round with an error rather
//! than hanging.

use std::collections::VecDeque;

use crate::core::{DiceHand, TableView};

use super::actor::{Actor, ActorError, BetInput, Decision, Rejection};

/// An actor that replays queued answers in order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActor {
    decisions: VecDeque<Decision>,
    bets: VecDeque<BetInput>,
    rejections: Vec<Rejection>,
}

impl ScriptedActor {
    /// Create an actor with no answers queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a decision.
    #[must_use]
    pub fn with_decision(mut self, decision: Decision) -> Self {
        self.decisions.push_back(decision);
        self
    }

    /// Queue a bet proposal.
    #[must_use]
    pub fn with_bet(mut self, bet: BetInput) -> Self {
        self.bets.push_back(bet);
        self
    }

    /// Rejections received so far.
    #[must_use]
    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }
}

impl Actor for ScriptedActor {
    fn decide(&mut self, _view: &TableView, _hand: &DiceHand) -> Result<Decision, ActorError> {
        self.decisions.pop_front().ok_or(ActorError::Exhausted)
    }

    fn propose_bet(
        &mut self,
        _view: &TableView,
        _hand: &DiceHand,
        rejection: Option<&Rejection>,
    ) -> Result<BetInput, ActorError> {
        if let Some(rejection) = rejection {
            self.rejections.push(rejection.clone());
        }
        self.bets.pop_front().ok_or(ActorError::Exhausted)
    }
}
