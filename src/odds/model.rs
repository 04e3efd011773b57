//! Probability that a bet is true from one participant's point of view.
//!
//! The participant knows its own dice exactly. Every other die on the table
//! is hidden and matches the bet independently with probability 1/6, or 2/6
//! under wild mode (the named face or a one). The bet is true when the
//! hidden dice supply at least the matches the own hand is missing.

use crate::core::{Bet, DiceHand, WILD_FACE};

use super::binomial::binomial_tail;

/// Chance that one hidden die satisfies a bet on `face`.
#[must_use]
pub fn match_probability(face: u8, wild_mode: bool) -> f64 {
    if wild_mode && face != WILD_FACE {
        2.0 / 6.0
    } else {
        1.0 / 6.0
    }
}

/// Probability that `bet` is true given `own_hand` and the table total.
///
/// Exactly 1 when the own hand already covers the bet, exactly 0 when the
/// hidden dice could not cover it even if all matched, strictly between
/// otherwise.
#[must_use]
pub fn probability_bet_is_true(
    bet: Bet,
    own_hand: &DiceHand,
    total_dice: u32,
    wild_mode: bool,
) -> f64 {
    debug_assert!(
        total_dice >= own_hand.len(),
        "table total {} below own hand {}",
        total_dice,
        own_hand.len()
    );

    let hidden = total_dice.saturating_sub(own_hand.len());
    let own = own_hand.matching(bet.face, wild_mode);
    if bet.count <= own {
        return 1.0;
    }

    let needed = bet.count - own;
    if needed > hidden {
        return 0.0;
    }

    binomial_tail(hidden, needed, match_probability(bet.face, wild_mode))
}
