//! Manual strategy: defer to an external actor, validate what it says.

use tracing::debug;

use crate::core::{Bet, DiceHand, ParticipantId, TableView};
use crate::error::EngineError;
use crate::events::{EventSink, GameEvent};
use crate::rules;

use super::actor::{Actor, Rejection};

/// Ask `actor` for bets until one is legal.
///
/// Malformed and illegal proposals are reported to the actor and to the
/// sink, then asked for again. Only an actor failure ends the loop early.
pub(crate) fn request_bet(
    actor: &mut dyn Actor,
    participant: ParticipantId,
    view: &TableView,
    hand: &DiceHand,
    sink: &mut dyn EventSink,
) -> Result<Bet, EngineError> {
    let mut rejection: Option<Rejection> = None;
    loop {
        let input = actor.propose_bet(view, hand, rejection.as_ref())?;
        let checked = input.parse().and_then(|bet| {
            rules::check(bet, view.previous_bet, view.total_dice)
                .map(|()| bet)
                .map_err(Rejection::from)
        });

        match checked {
            Ok(bet) => return Ok(bet),
            Err(refused) => {
                debug!(%participant, reason = %refused, "bet rejected");
                sink.emit(GameEvent::BetRejected {
                    participant,
                    rejection: refused.clone(),
                });
                rejection = Some(refused);
            }
        }
    }
}
