//! Engine errors.
//!
//! Recoverable input problems (malformed or illegal bets) never surface
//! here: they are reported back to the actor and asked again. These are
//! the failures that stop a round.

use thiserror::Error;

use crate::core::{Bet, ConfigError};
use crate::strategy::ActorError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("actor failed to answer: {0}")]
    Actor(#[from] ActorError),
    #[error("no legal raise exists over {previous:?} with {total_dice} dice on the table")]
    NoLegalRaise { previous: Option<Bet>, total_dice: u32 },
    #[error("the game is already over")]
    GameOver,
}
