//! Game rules as pure functions.
//!
//! - `legality`: whether a bet may follow the previous one
//! - `resolution`: counting the table after a challenge and choosing losers
//!
//! Nothing here mutates state; the round engine applies the results.

pub mod legality;
pub mod resolution;

pub use legality::{check, has_legal_raise, is_legal, minimal_raise, BetViolation};
pub use resolution::{bet_holds, count_on_table, losers, LossReason};
