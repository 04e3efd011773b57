//! One betting round as a state machine.
//!
//! ```text
//! AwaitingOpeningBet ──bet──▶ AwaitingTurn ──bet──▶ AwaitingTurn
//!                                   │
//!                                 call
//!                                   ▼
//!                               Resolved
//! ```
//!
//! The engine borrows the session's participants, table and RNG for the
//! length of the round. Resolution reveals every hand, counts the bet face
//! (plus ones under wild mode), takes dice from the losers, removes empty
//! hands and picks who opens the next round.
//!
//! Dice are rolled by the session, not here, so a round can be driven
//! against fixed hands.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::core::{Bet, BetRecord, CallPenalty, GameRng, ParticipantId, TableState};
use crate::error::EngineError;
use crate::events::{EventSink, GameEvent, HandReveal};
use crate::rules::{self, LossReason};
use crate::strategy::{Decision, Participant};

/// Everything that followed from a challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Round number (starts at 1).
    pub round: u32,
    /// The challenged bet.
    pub bet: Bet,
    /// Who placed it.
    pub bettor: ParticipantId,
    /// Who called it.
    pub challenger: ParticipantId,
    /// Dice on the table that satisfied it.
    pub actual: u32,
    /// Why the losers lost.
    pub reason: LossReason,
    /// Participants who lost one die each.
    pub losers: Vec<ParticipantId>,
    /// Participants left without dice, in seating order.
    pub eliminated: Vec<ParticipantId>,
    /// Who opens the next round (the winner, if the game is over).
    pub next_starter: ParticipantId,
    /// Set when one participant remains.
    pub winner: Option<ParticipantId>,
    /// Bets accepted this round, oldest first.
    pub bets: Vector<BetRecord>,
}

/// Where the round currently is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// The starter has not bet yet.
    AwaitingOpeningBet,
    /// The current participant must bet or call.
    AwaitingTurn,
    /// A call was settled.
    Resolved(RoundOutcome),
}

/// Drives one round over borrowed session state.
pub struct RoundEngine<'a> {
    round: u32,
    participants: &'a mut Vec<Participant>,
    table: &'a mut TableState,
    rng: &'a mut GameRng,
    penalty: CallPenalty,
    sink: &'a mut dyn EventSink,
    phase: RoundPhase,
}

impl<'a> RoundEngine<'a> {
    /// Start a round. `table.current()` opens it.
    ///
    /// Panics if fewer than two participants are seated, if a bet is
    /// already on the table, or if the table total disagrees with the hands.
    pub fn new(
        round: u32,
        participants: &'a mut Vec<Participant>,
        table: &'a mut TableState,
        rng: &'a mut GameRng,
        penalty: CallPenalty,
        sink: &'a mut dyn EventSink,
    ) -> Self {
        assert!(participants.len() >= 2, "A round needs at least two participants");
        assert!(table.current_bet().is_none(), "A round must start without a bet");

        let engine = Self {
            round,
            participants,
            table,
            rng,
            penalty,
            sink,
            phase: RoundPhase::AwaitingOpeningBet,
        };
        engine.assert_consistent();
        engine
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> &RoundPhase {
        &self.phase
    }

    /// Check if the round has been settled.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, RoundPhase::Resolved(_))
    }

    /// Advance by one turn. Does nothing once resolved.
    pub fn step(&mut self) -> Result<(), EngineError> {
        match self.phase {
            RoundPhase::AwaitingOpeningBet => {
                let bet = self.request_bet()?;
                self.accept_bet(bet);
                self.phase = RoundPhase::AwaitingTurn;
            }
            RoundPhase::AwaitingTurn => {
                let idx = self.index_of(self.table.current());
                let view = self.table.view(self.round);
                let decision = self.participants[idx].produce_decision(&view)?;
                match decision {
                    Decision::Bet => {
                        let bet = self.request_bet()?;
                        self.accept_bet(bet);
                    }
                    Decision::Call => {
                        let outcome = self.resolve(idx);
                        self.phase = RoundPhase::Resolved(outcome);
                    }
                }
            }
            RoundPhase::Resolved(_) => {}
        }
        Ok(())
    }

    /// Play turns until a call is settled.
    pub fn run(mut self) -> Result<RoundOutcome, EngineError> {
        let span = info_span!("round", round = self.round);
        let _guard = span.enter();

        while !self.is_resolved() {
            self.step()?;
        }

        match self.phase {
            RoundPhase::Resolved(outcome) => Ok(outcome),
            _ => unreachable!("loop exits only once resolved"),
        }
    }

    // === Turns ===

    fn request_bet(&mut self) -> Result<Bet, EngineError> {
        let idx = self.index_of(self.table.current());
        let view = self.table.view(self.round);
        self.participants[idx].produce_bet(&view, &mut *self.rng, &mut *self.sink)
    }

    fn accept_bet(&mut self, bet: Bet) {
        let idx = self.index_of(self.table.current());
        let bettor = &self.participants[idx];
        let participant = bettor.id();
        debug!(participant = bettor.name(), %bet, "bet placed");

        let next = self.participants[(idx + 1) % self.participants.len()].id();
        self.table.record_bet(bet, self.round, next);
        self.sink.emit(GameEvent::BetPlaced { participant, bet });
    }

    // === Resolution ===

    fn resolve(&mut self, challenger_idx: usize) -> RoundOutcome {
        let (Some(bet), Some(bettor)) = (self.table.current_bet(), self.table.previous()) else {
            unreachable!("a call is only offered after a bet");
        };
        let challenger = self.participants[challenger_idx].id();
        let wild_mode = self.table.wild_mode();

        self.sink.emit(GameEvent::Challenged { challenger, bettor, bet });
        self.sink.emit(GameEvent::HandsRevealed {
            hands: self
                .participants
                .iter()
                .map(|p| HandReveal {
                    participant: p.id(),
                    faces: p.hand().faces().to_vec(),
                })
                .collect(),
        });

        let hands = self.participants.iter().map(Participant::hand);
        let actual = rules::count_on_table(hands, bet.face, wild_mode);
        let held = rules::bet_holds(bet, actual);
        let seating: Vec<ParticipantId> = self.participants.iter().map(Participant::id).collect();
        let (losers, reason) = rules::losers(held, bettor, challenger, self.penalty, &seating);

        for &loser in &losers {
            let idx = self.index_of(loser);
            let lost = self.participants[idx].hand_mut().lose_one();
            assert!(lost, "Loser {loser} had no dice");
            self.table.remove_die();
        }
        info!(%bet, actual, ?reason, ?losers, "challenge resolved");
        self.sink.emit(GameEvent::Resolved {
            bet,
            actual,
            wild_mode,
            losers: losers.clone(),
            reason,
        });

        // The side that lost the challenge opens next, or the first
        // survivor after it.
        let anchor = if held { challenger } else { bettor };
        let next_starter = self.next_active_from(anchor);

        let eliminated: Vec<ParticipantId> = self
            .participants
            .iter()
            .filter(|p| !p.is_active())
            .map(Participant::id)
            .collect();
        for &participant in &eliminated {
            info!(%participant, "eliminated");
            self.sink.emit(GameEvent::Eliminated { participant });
        }
        self.participants.retain(Participant::is_active);

        let bets = self.table.history().clone();
        self.table.reset_round(next_starter);
        self.assert_consistent();

        let winner = (self.participants.len() == 1).then(|| self.participants[0].id());
        if let Some(winner) = winner {
            info!(%winner, "victory");
            self.sink.emit(GameEvent::Victory { winner });
        }

        RoundOutcome {
            round: self.round,
            bet,
            bettor,
            challenger,
            actual,
            reason,
            losers,
            eliminated,
            next_starter,
            winner,
            bets,
        }
    }

    // === Helpers ===

    fn index_of(&self, id: ParticipantId) -> usize {
        self.participants
            .iter()
            .position(|p| p.id() == id)
            .unwrap_or_else(|| panic!("{id} is not seated"))
    }

    /// First participant with dice, scanning seats from `id` onwards.
    fn next_active_from(&self, id: ParticipantId) -> ParticipantId {
        let start = self.index_of(id);
        let len = self.participants.len();
        (0..len)
            .map(|offset| &self.participants[(start + offset) % len])
            .find(|p| p.is_active())
            .map(Participant::id)
            .unwrap_or_else(|| unreachable!("a challenge always leaves someone with dice"))
    }

    fn assert_consistent(&self) {
        let held: u32 = self.participants.iter().map(|p| p.hand().len()).sum();
        assert_eq!(
            held,
            self.table.total_dice(),
            "Table total out of sync with hands"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceHand;
    use crate::events::EventLog;
    use crate::strategy::{AutomatedStrategy, BetInput, ScriptedActor};

    fn manual(id: u8, faces: &[u8], actor: ScriptedActor) -> Participant {
        let hand = DiceHand::from_faces(faces);
        Participant::manual(ParticipantId::new(id), format!("P{id}"), hand, actor)
    }

    fn table_for(participants: &[Participant], wild_mode: bool, starter: u8) -> TableState {
        let total = participants.iter().map(|p| p.hand().len()).sum();
        TableState::new(total, wild_mode, ParticipantId::new(starter))
    }

    /// Seat 0 (3 dice) opens 3 x 4, seat 1 (2 dice) calls.
    fn challenge_scenario(challenged_hand: &[u8]) -> (Vec<Participant>, TableState) {
        let participants = vec![
            manual(0, &[1, 1, 1], ScriptedActor::new().with_bet(BetInput::numbers(3, 4))),
            manual(1, challenged_hand, ScriptedActor::new().with_decision(Decision::Call)),
        ];
        let table = table_for(&participants, false, 0);
        (participants, table)
    }

    #[test]
    fn test_false_bet_costs_bettor() {
        let (mut participants, mut table) = challenge_scenario(&[4, 4]);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.actual, 2);
        assert_eq!(outcome.reason, LossReason::BetWasFalse);
        assert_eq!(outcome.losers, vec![ParticipantId::new(0)]);
        assert_eq!(participants[0].hand().len(), 2);
        assert_eq!(participants[1].hand().len(), 2);
        assert_eq!(table.total_dice(), 4);
        assert_eq!(outcome.next_starter, ParticipantId::new(0));
        assert_eq!(outcome.winner, None);
    }

    #[test]
    fn test_true_bet_costs_challenger() {
        let (mut participants, mut table) = challenge_scenario(&[4, 4]);
        // Bettor holds a four too: three fours on the table.
        *participants[0].hand_mut() = DiceHand::from_faces(&[4, 1, 1]);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.actual, 3);
        assert_eq!(outcome.reason, LossReason::CallWasWrong);
        assert_eq!(outcome.losers, vec![ParticipantId::new(1)]);
        assert_eq!(participants[0].hand().len(), 3);
        assert_eq!(participants[1].hand().len(), 1);
        assert_eq!(table.total_dice(), 4);
        assert_eq!(outcome.next_starter, ParticipantId::new(1));
    }

    #[test]
    fn test_wild_ones_make_bet_true() {
        let (mut participants, _) = challenge_scenario(&[4, 2]);
        let mut table = table_for(&participants, true, 0);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        // One four plus three wild ones.
        assert_eq!(outcome.actual, 4);
        assert_eq!(outcome.losers, vec![ParticipantId::new(1)]);
    }

    #[test]
    fn test_elimination_and_victory() {
        let mut participants = vec![
            manual(0, &[2], ScriptedActor::new().with_bet(BetInput::numbers(2, 6))),
            manual(1, &[3], ScriptedActor::new().with_decision(Decision::Call)),
        ];
        let mut table = table_for(&participants, false, 0);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.eliminated, vec![ParticipantId::new(0)]);
        assert_eq!(outcome.winner, Some(ParticipantId::new(1)));
        assert_eq!(outcome.next_starter, ParticipantId::new(1));
        assert_eq!(participants.len(), 1);
        assert_eq!(table.total_dice(), 1);

        let kinds: Vec<_> = log.events().iter().map(GameEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["bet_placed", "challenged", "hands_revealed", "resolved", "eliminated", "victory"]
        );
    }

    #[test]
    fn test_eliminated_starter_passes_to_next_survivor() {
        let mut participants = vec![
            manual(
                0,
                &[5, 5],
                ScriptedActor::new()
                    .with_decision(Decision::Bet)
                    .with_bet(BetInput::numbers(3, 5)),
            ),
            manual(1, &[2], ScriptedActor::new().with_bet(BetInput::numbers(4, 5))),
            manual(2, &[3, 3], ScriptedActor::new().with_decision(Decision::Call)),
        ];
        let mut table = table_for(&participants, false, 1);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        // Seat 1 opens 4 x 5, seat 2 calls: only two fives, seat 1 loses its last die.
        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.eliminated, vec![ParticipantId::new(1)]);
        assert_eq!(outcome.next_starter, ParticipantId::new(2));
        assert_eq!(outcome.winner, None);
        assert_eq!(table.current(), ParticipantId::new(2));
        assert_eq!(participants.len(), 2);
    }

    #[test]
    fn test_all_but_bettor_penalty() {
        let mut participants = vec![
            manual(0, &[6, 6], ScriptedActor::new().with_bet(BetInput::numbers(2, 6))),
            manual(1, &[2, 3], ScriptedActor::new().with_decision(Decision::Call)),
            manual(2, &[4, 4], ScriptedActor::new()),
        ];
        let mut table = table_for(&participants, false, 0);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::AllButBettor,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.losers, vec![ParticipantId::new(1), ParticipantId::new(2)]);
        assert_eq!(table.total_dice(), 4);
        assert_eq!(outcome.next_starter, ParticipantId::new(1));
    }

    #[test]
    fn test_step_walks_phases() {
        let (mut participants, mut table) = challenge_scenario(&[4, 4]);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();
        let mut engine = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        );

        assert_eq!(engine.phase(), &RoundPhase::AwaitingOpeningBet);
        engine.step().unwrap();
        assert_eq!(engine.phase(), &RoundPhase::AwaitingTurn);
        engine.step().unwrap();
        assert!(engine.is_resolved());
        engine.step().unwrap();
        assert!(engine.is_resolved());
    }

    #[test]
    fn test_history_is_reported() {
        let mut participants = vec![
            manual(0, &[2, 2], ScriptedActor::new().with_bet(BetInput::numbers(1, 2))),
            Participant::automated(
                ParticipantId::new(1),
                "Bot",
                DiceHand::from_faces(&[2, 3]),
                AutomatedStrategy::default(),
            ),
            manual(2, &[5, 5], ScriptedActor::new().with_decision(Decision::Call)),
        ];
        let mut table = table_for(&participants, false, 0);
        let mut rng = GameRng::new(3);
        let mut log = EventLog::new();

        let outcome = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run()
        .unwrap();

        assert_eq!(outcome.bets.len(), 2);
        assert_eq!(outcome.bets[0].participant, ParticipantId::new(0));
        assert_eq!(outcome.bets[1].participant, ParticipantId::new(1));
        assert_eq!(outcome.bettor, ParticipantId::new(1));
        assert_eq!(outcome.challenger, ParticipantId::new(2));
        assert!(table.history().is_empty());
    }

    #[test]
    fn test_actor_error_stops_round() {
        let mut participants = vec![
            manual(0, &[2], ScriptedActor::new()),
            manual(1, &[3], ScriptedActor::new()),
        ];
        let mut table = table_for(&participants, false, 0);
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let result = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        )
        .run();
        assert!(matches!(result, Err(EngineError::Actor(_))));
    }

    #[test]
    #[should_panic(expected = "Table total out of sync with hands")]
    fn test_inconsistent_table_is_rejected() {
        let mut participants = vec![
            manual(0, &[2], ScriptedActor::new()),
            manual(1, &[3], ScriptedActor::new()),
        ];
        let mut table = TableState::new(5, false, ParticipantId::new(0));
        let mut rng = GameRng::new(1);
        let mut log = EventLog::new();

        let _ = RoundEngine::new(
            1,
            &mut participants,
            &mut table,
            &mut rng,
            CallPenalty::Challenger,
            &mut log,
        );
    }
}
