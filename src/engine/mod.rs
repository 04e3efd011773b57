//! Game flow.
//!
//! - `session`: seating, round sequencing, the winner
//! - `round`: the bet/call state machine for one round

pub mod round;
pub mod session;

pub use round::{RoundEngine, RoundOutcome, RoundPhase};
pub use session::{GameSession, SessionBuilder, SessionRngState};
