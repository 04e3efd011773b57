//! Automated strategy.
//!
//! ## Deciding
//!
//! Challenge when the probability of the current bet, seen from the own
//! hand, falls below `call_threshold`; otherwise escalate.
//!
//! ## Betting
//!
//! Start from the most frequent face in the own hand (ties go to the lower
//! face; under wild mode ones add to every other face, and an all-ones pick
//! becomes a random face 2-6). If that candidate is not a legal raise,
//! perturb it until it is:
//! - with `bluff_probability`, jump to a random face at or above the
//!   previous face and nudge the count by -1..=1
//! - otherwise keep the previous face and raise the count by 1..=2
//!
//! Counts are clamped to the table total. After `max_perturbations` failed
//! tries the minimal legal raise is used, so betting always terminates.

use tracing::{debug, trace};

use crate::core::{
    AutomatedConfig, Bet, DiceHand, GameRng, TableView, MAX_FACE, MIN_FACE, WILD_FACE,
};
use crate::error::EngineError;
use crate::odds::probability_bet_is_true;
use crate::rules;

use super::actor::Decision;

/// Odds-driven strategy for computer-controlled participants.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AutomatedStrategy {
    config: AutomatedConfig,
}

impl AutomatedStrategy {
    /// Create a strategy with the given constants.
    #[must_use]
    pub fn new(config: AutomatedConfig) -> Self {
        Self { config }
    }

    /// Bet or call on the current bet.
    #[must_use]
    pub fn decide(&self, view: &TableView, hand: &DiceHand) -> Decision {
        let Some(bet) = view.previous_bet else {
            return Decision::Bet;
        };

        let probability = probability_bet_is_true(bet, hand, view.total_dice, view.wild_mode);
        let decision = if probability < self.config.call_threshold {
            Decision::Call
        } else {
            Decision::Bet
        };

        debug!(
            bet.count = bet.count,
            bet.face = bet.face,
            probability,
            ?decision,
            "automated decision"
        );
        decision
    }

    /// Produce a legal bet over `view.previous_bet`.
    pub fn propose_bet(
        &self,
        view: &TableView,
        hand: &DiceHand,
        rng: &mut GameRng,
    ) -> Result<Bet, EngineError> {
        let previous = view.previous_bet;
        let total = view.total_dice;

        let mut candidate = preferred_bet(hand, view.wild_mode, rng);
        let mut attempts = 0;
        while !rules::is_legal(candidate, previous, total) {
            if attempts == self.config.max_perturbations {
                let fallback = rules::minimal_raise(previous, total)
                    .ok_or(EngineError::NoLegalRaise { previous, total_dice: total })?;
                debug!(attempts, bet = %fallback, "perturbation exhausted, using minimal raise");
                return Ok(fallback);
            }
            candidate = self.perturb(previous, total, rng);
            trace!(attempts, bet = %candidate, "perturbed candidate");
            attempts += 1;
        }

        Ok(candidate)
    }

    fn perturb(&self, previous: Option<Bet>, total: u32, rng: &mut GameRng) -> Bet {
        let (prev_count, prev_face) = previous.map_or((0, MIN_FACE), |b| (b.count, b.face));
        let floor_face = prev_face.clamp(MIN_FACE, MAX_FACE);

        let (face, count) = if rng.gen_bool(self.config.bluff_probability) {
            let face = rng.gen_face(floor_face..=MAX_FACE);
            (face, i64::from(prev_count) + rng.gen_offset(-1..=1))
        } else {
            (floor_face, i64::from(prev_count) + rng.gen_offset(1..=2))
        };

        let count = count.clamp(1, i64::from(total.max(1))) as u32;
        Bet::new(count, face)
    }
}

/// The bet the own hand supports best.
///
/// Scans faces 1..=6 and keeps the first with the highest frequency.
fn preferred_bet(hand: &DiceHand, wild_mode: bool, rng: &mut GameRng) -> Bet {
    let mut best = Bet::new(0, MIN_FACE);
    for face in MIN_FACE..=MAX_FACE {
        let frequency = hand.matching(face, wild_mode);
        if frequency > best.count {
            best = Bet::new(frequency, face);
        }
    }

    if wild_mode && best.face == WILD_FACE {
        best.face = rng.gen_face(WILD_FACE + 1..=MAX_FACE);
    }
    best
}
