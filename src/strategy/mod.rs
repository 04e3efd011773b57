//! Participants and how they choose.
//!
//! - `participant`: the `Participant` seat and its closed `Strategy` enum
//! - `actor`: the port manual participants answer through
//! - `automated`: odds-driven decisions and bet perturbation
//! - `manual`: validation loop around an actor's proposals
//! - `scripted`: queued-answer actor for tests

pub mod actor;
pub mod automated;
mod manual;
pub mod participant;
pub mod scripted;

pub use actor::{Actor, ActorError, BetInput, Decision, Rejection};
pub use automated::AutomatedStrategy;
pub use participant::{Participant, Strategy};
pub use scripted::ScriptedActor;
