//! Bet legality.
//!
//! A new bet must pass two independent checks:
//!
//! 1. **Range**: face in 1..=6, count in 1..=total dice on the table.
//! 2. **Escalation**: relative to the previous bet, the new bet names a
//!    strictly higher face (any count), or a strictly higher count at a face
//!    no lower than the previous one. The opening bet of a round has no
//!    previous bet and only needs to be in range.
//!
//! Raising the face alone always escalates; raising the count alone only
//! escalates if the face does not drop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Bet, MAX_FACE, MIN_FACE};

/// Why a bet was refused.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum BetViolation {
    #[error(
        "{bet} is out of range: the face must be 1-6 \
         and the count 1-{total_dice} (dice on the table)"
    )]
    OutOfRange { bet: Bet, total_dice: u32 },
    #[error(
        "{bet} does not raise {previous}: name a higher face, \
         or a higher count of a face at least as high"
    )]
    NotEscalating { bet: Bet, previous: Bet },
}

/// Check a bet against the previous bet and the table total.
///
/// The range check runs first, so a bet that fails both reports
/// `OutOfRange`.
pub fn check(bet: Bet, previous: Option<Bet>, total_dice: u32) -> Result<(), BetViolation> {
    let face_ok = (MIN_FACE..=MAX_FACE).contains(&bet.face);
    let count_ok = (1..=total_dice).contains(&bet.count);
    if !face_ok || !count_ok {
        return Err(BetViolation::OutOfRange { bet, total_dice });
    }

    if let Some(previous) = previous {
        let not_higher = bet.count <= previous.count && bet.face <= previous.face;
        if not_higher || bet.face < previous.face {
            return Err(BetViolation::NotEscalating { bet, previous });
        }
    }

    Ok(())
}

/// Whether `bet` may follow `previous` with `total_dice` on the table.
#[must_use]
pub fn is_legal(bet: Bet, previous: Option<Bet>, total_dice: u32) -> bool {
    check(bet, previous, total_dice).is_ok()
}

/// The smallest legal raise over `previous`, if any exists.
///
/// Prefers one more die at the same face, then a single die of the next
/// face. Returns `None` once the previous bet claims every die on the table
/// at face 6, or when the table is empty.
#[must_use]
pub fn minimal_raise(previous: Option<Bet>, total_dice: u32) -> Option<Bet> {
    if total_dice == 0 {
        return None;
    }

    let raise = match previous {
        None => Bet::new(1, MIN_FACE),
        Some(prev) if prev.count < total_dice => Bet::new(prev.count + 1, prev.face.max(MIN_FACE)),
        Some(prev) if prev.face < MAX_FACE => Bet::new(1, prev.face + 1),
        Some(_) => return None,
    };

    debug_assert!(is_legal(raise, previous, total_dice));
    Some(raise)
}

/// Whether any bet could legally follow `previous`.
#[must_use]
pub fn has_legal_raise(previous: Option<Bet>, total_dice: u32) -> bool {
    minimal_raise(previous, total_dice).is_some()
}
