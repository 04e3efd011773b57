//! The actor port: how a manual participant gets its answers.
//!
//! The engine calls an `Actor` and blocks until it answers. A console
//! adapter prompts a human; tests plug in a [`super::ScriptedActor`].
//! Actors return raw text for bets so the engine owns parsing and can
//! report malformed input like any other rejection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Bet, DiceHand, TableView};
use crate::rules::BetViolation;

/// What a participant chooses on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Escalate with a new bet.
    Bet,
    /// Challenge the current bet.
    Call,
}

/// Why a proposed bet was sent back to the actor.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    #[error("{input:?} is not a whole number")]
    Malformed { input: String },
    #[error(transparent)]
    Illegal(#[from] BetViolation),
}

/// The actor could not answer at all.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ActorError {
    #[error("input failed: {0}")]
    Input(String),
    #[error("actor has no more answers")]
    Exhausted,
}

/// A bet as typed by an actor, before parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BetInput {
    pub count: String,
    pub face: String,
}

impl BetInput {
    /// Create input from raw text fields.
    pub fn new(count: impl Into<String>, face: impl Into<String>) -> Self {
        Self {
            count: count.into(),
            face: face.into(),
        }
    }

    /// Create input from numbers.
    #[must_use]
    pub fn numbers(count: u32, face: u8) -> Self {
        Self::new(count.to_string(), face.to_string())
    }

    /// Parse both fields.
    ///
    /// Only checks the text is numeric; range and escalation are checked by
    /// the rules.
    pub fn parse(&self) -> Result<Bet, Rejection> {
        let count = parse_field::<u32>(&self.count)?;
        let face = parse_field::<u8>(&self.face)?;
        Ok(Bet::new(count, face))
    }
}

fn parse_field<T: std::str::FromStr>(input: &str) -> Result<T, Rejection> {
    input.trim().parse().map_err(|_| Rejection::Malformed {
        input: input.to_string(),
    })
}

/// Supplies decisions and bets for a manual participant.
pub trait Actor {
    /// Bet or call, given the table and the actor's own hand.
    fn decide(&mut self, view: &TableView, hand: &DiceHand) -> Result<Decision, ActorError>;

    /// Propose a bet. `rejection` explains why the previous proposal was
    /// refused, or is `None` on the first attempt.
    fn propose_bet(
        &mut self,
        view: &TableView,
        hand: &DiceHand,
        rejection: Option<&Rejection>,
    ) -> Result<BetInput, ActorError>;
}
