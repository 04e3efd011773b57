//! Core engine types: ids, dice, bets, configuration, RNG, table state.
//!
//! Everything here is plain data. Rules, odds, strategies and the round
//! engine build on top of these types.

pub mod player;
pub mod rng;
pub mod hand;
pub mod bet;
pub mod config;
pub mod state;

pub use player::ParticipantId;
pub use rng::{GameRng, GameRngState};
pub use hand::{DiceHand, MAX_FACE, MIN_FACE, WILD_FACE};
pub use bet::{Bet, BetRecord};
pub use config::{
    AutomatedConfig, CallPenalty, ConfigError, SessionConfig, BOT_ROSTER, DEFAULT_STARTING_DICE,
    MAX_AUTOMATED, MAX_PARTICIPANTS, MAX_STARTING_DICE, MIN_AUTOMATED, MIN_PARTICIPANTS,
};
pub use state::{TableState, TableView};
