//! # liars-dice
//!
//! A Liar's Dice game engine with odds-driven computer opponents.
//!
//! ## Design Principles
//!
//! 1. **Engine Owns the Rules**: Participants only propose. Every bet is
//!    parsed and checked by the engine; illegal proposals are reported back
//!    and asked for again.
//!
//! 2. **No Presentation in the Core**: The engine emits `GameEvent`s into an
//!    `EventSink`. Console output, logs and replays are adapters.
//!
//! 3. **Deterministic by Seed**: Dice, roster draws and automated bluffs
//!    come from named ChaCha8 streams derived from one seed.
//!
//! ## Modules
//!
//! - `core`: participant ids, dice hands, bets, configuration, RNG, table state
//! - `rules`: bet legality and challenge resolution
//! - `odds`: binomial tail and the bet-truth probability model
//! - `strategy`: participants, the actor port, the automated strategy
//! - `events`: presentation events and sinks
//! - `engine`: the round state machine and the game session
//! - `error`: engine errors

pub mod core;
pub mod engine;
pub mod error;
pub mod events;
pub mod odds;
pub mod rules;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    AutomatedConfig, Bet, BetRecord, CallPenalty, ConfigError, DiceHand, GameRng, GameRngState,
    ParticipantId, SessionConfig, TableState, TableView,
};

pub use crate::rules::{BetViolation, LossReason};

pub use crate::odds::probability_bet_is_true;

pub use crate::strategy::{
    Actor, ActorError, AutomatedStrategy, BetInput, Decision, Participant, Rejection,
    ScriptedActor, Strategy,
};

pub use crate::events::{EventLog, EventSink, GameEvent, HandReveal, SeatInfo};

pub use crate::engine::{
    GameSession, RoundEngine, RoundOutcome, RoundPhase, SessionBuilder, SessionRngState,
};

pub use crate::error::EngineError;
