//! A game session: seats, rounds, and the winner.
//!
//! ## Building
//!
//! `SessionBuilder` collects seats in turn order, validates names and
//! counts, draws roster names for unnamed automated seats, rolls the first
//! hands and picks a random starter.
//!
//! ## Playing
//!
//! Each `play_round` re-rolls every hand (except on the first round, which
//! uses the hands rolled at build time), then hands the table to a
//! `RoundEngine`. The session ends when one participant has dice left.
//!
//! ## Randomness
//!
//! Three streams are derived from one seed so that, for instance, a
//! different roster draw does not change the dice:
//! - `"roster"`: names and the first starter
//! - `"dice"`: every roll
//! - `"strategy"`: automated bluffs and perturbations
//!
//! `GameSession::rng_state` captures the dice and strategy positions between
//! rounds, so the rest of a game can be replayed from a log.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::{
    ConfigError, DiceHand, GameRng, GameRngState, ParticipantId, SessionConfig, TableState,
    BOT_ROSTER, MAX_AUTOMATED, MAX_PARTICIPANTS, MIN_AUTOMATED, MIN_PARTICIPANTS,
};
use crate::error::EngineError;
use crate::events::{EventSink, GameEvent, SeatInfo};
use crate::strategy::{Actor, AutomatedStrategy, Participant, Strategy};

use super::round::{RoundEngine, RoundOutcome};

// === Builder ===

enum Seat {
    Manual { name: String, actor: Box<dyn Actor> },
    Automated { name: Option<String> },
}

/// Collects seats for a new session.
///
/// ```ignore
/// let session = SessionBuilder::new(SessionConfig::default())
///     .manual("Will", console_actor)
///     .automated_from_roster(3)
///     .build(seed)?;
/// ```
pub struct SessionBuilder {
    config: SessionConfig,
    seats: Vec<Seat>,
}

impl SessionBuilder {
    /// Start with no seats.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            seats: Vec::new(),
        }
    }

    /// Seat a participant driven by `actor`.
    #[must_use]
    pub fn manual(mut self, name: impl Into<String>, actor: impl Actor + 'static) -> Self {
        self.seats.push(Seat::Manual {
            name: name.into(),
            actor: Box::new(actor),
        });
        self
    }

    /// Seat a named automated participant.
    #[must_use]
    pub fn automated(mut self, name: impl Into<String>) -> Self {
        self.seats.push(Seat::Automated { name: Some(name.into()) });
        self
    }

    /// Seat `count` automated participants named from the roster.
    #[must_use]
    pub fn automated_from_roster(mut self, count: usize) -> Self {
        self.seats.extend((0..count).map(|_| Seat::Automated { name: None }));
        self
    }

    /// Validate the seating and create the session.
    pub fn build(self, seed: u64) -> Result<GameSession, ConfigError> {
        self.config.validate()?;

        let seat_count = self.seats.len();
        if seat_count < MIN_PARTICIPANTS {
            return Err(ConfigError::TooFewParticipants {
                got: seat_count,
                min: MIN_PARTICIPANTS,
            });
        }
        if seat_count > MAX_PARTICIPANTS {
            return Err(ConfigError::TooManyParticipants {
                got: seat_count,
                max: MAX_PARTICIPANTS,
            });
        }
        let automated = self
            .seats
            .iter()
            .filter(|s| matches!(s, Seat::Automated { .. }))
            .count();
        if automated < MIN_AUTOMATED {
            return Err(ConfigError::TooFewAutomated {
                got: automated,
                min: MIN_AUTOMATED,
            });
        }
        if automated > MAX_AUTOMATED {
            return Err(ConfigError::TooManyAutomated {
                got: automated,
                max: MAX_AUTOMATED,
            });
        }

        let mut taken: FxHashSet<String> = FxHashSet::default();
        for seat in &self.seats {
            let (name, manual) = match seat {
                Seat::Manual { name, .. } => (name, true),
                Seat::Automated { name: Some(name) } => (name, false),
                Seat::Automated { name: None } => continue,
            };
            let trimmed = name.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if manual && BOT_ROSTER.iter().any(|r| r.eq_ignore_ascii_case(trimmed)) {
                return Err(ConfigError::ReservedName(trimmed.to_string()));
            }
            if !taken.insert(trimmed.to_lowercase()) {
                return Err(ConfigError::DuplicateName(trimmed.to_string()));
            }
        }

        let base = GameRng::new(seed);
        let mut roster_rng = base.for_context("roster");
        let mut dice_rng = base.for_context("dice");
        let strategy_rng = base.for_context("strategy");

        let mut roster: Vec<&str> = BOT_ROSTER
            .iter()
            .copied()
            .filter(|name| !taken.contains(&name.to_lowercase()))
            .collect();

        let starting_dice = self.config.starting_dice;
        let mut participants = Vec::with_capacity(seat_count);
        for (index, seat) in self.seats.into_iter().enumerate() {
            let id = u8::try_from(index)
                .map(ParticipantId::new)
                .map_err(|_| ConfigError::TooManyParticipants {
                    got: seat_count,
                    max: MAX_PARTICIPANTS,
                })?;
            let hand = DiceHand::rolled(starting_dice, &mut dice_rng);
            let participant = match seat {
                Seat::Manual { name, actor } => {
                    Participant::new(id, name.trim(), hand, Strategy::Manual(actor))
                }
                Seat::Automated { name } => {
                    let name = match name {
                        Some(name) => name.trim().to_string(),
                        None => {
                            if roster.is_empty() {
                                return Err(ConfigError::TooManyAutomated {
                                    got: automated,
                                    max: BOT_ROSTER.len(),
                                });
                            }
                            let pick = roster_rng.gen_range_usize(0..roster.len());
                            roster.remove(pick).to_string()
                        }
                    };
                    let strategy = AutomatedStrategy::new(self.config.automated.clone());
                    Participant::automated(id, name, hand, strategy)
                }
            };
            participants.push(participant);
        }

        let starter = participants[roster_rng.gen_range_usize(0..seat_count)].id();
        let total_dice = participants.iter().map(|p| p.hand().len()).sum();
        let table = TableState::new(total_dice, self.config.wild_mode, starter);

        info!(seed, participants = seat_count, total_dice, %starter, "session created");

        Ok(GameSession {
            config: self.config,
            participants,
            table,
            dice_rng,
            strategy_rng,
            round: 0,
            winner: None,
        })
    }
}

// === Session ===

/// Dice and strategy stream positions between rounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRngState {
    /// Stream that rolls every hand.
    pub dice: GameRngState,
    /// Stream behind automated bluffs and perturbations.
    pub strategy: GameRngState,
}

/// A game of Liar's Dice from first roll to last die.
#[derive(Debug)]
pub struct GameSession {
    config: SessionConfig,
    participants: Vec<Participant>,
    table: TableState,
    dice_rng: GameRng,
    strategy_rng: GameRng,
    round: u32,
    winner: Option<ParticipantId>,
}

impl GameSession {
    /// Play one round.
    ///
    /// If an actor fails mid-round the round is abandoned: no dice are lost,
    /// the bet history is cleared and the same participant starts again.
    pub fn play_round(&mut self, sink: &mut dyn EventSink) -> Result<RoundOutcome, EngineError> {
        if self.winner.is_some() {
            return Err(EngineError::GameOver);
        }

        if self.round == 0 {
            sink.emit(GameEvent::SessionStarted {
                seats: self
                    .participants
                    .iter()
                    .map(|p| SeatInfo {
                        participant: p.id(),
                        name: p.name().to_string(),
                        automated: p.is_automated(),
                        dice: p.hand().len(),
                    })
                    .collect(),
            });
        } else {
            for participant in &mut self.participants {
                participant.hand_mut().roll(&mut self.dice_rng);
            }
        }
        self.round += 1;

        let starter = self.table.current();
        debug!(round = self.round, %starter, total_dice = self.table.total_dice(), "round started");
        sink.emit(GameEvent::RoundStarted {
            round: self.round,
            starter,
            total_dice: self.table.total_dice(),
        });

        let result = RoundEngine::new(
            self.round,
            &mut self.participants,
            &mut self.table,
            &mut self.strategy_rng,
            self.config.call_penalty,
            sink,
        )
        .run();

        match result {
            Ok(outcome) => {
                self.winner = outcome.winner;
                Ok(outcome)
            }
            Err(err) => {
                self.table.reset_round(starter);
                Err(err)
            }
        }
    }

    /// Play rounds until someone wins.
    pub fn play(&mut self, sink: &mut dyn EventSink) -> Result<ParticipantId, EngineError> {
        loop {
            if let Some(winner) = self.play_round(sink)?.winner {
                return Ok(winner);
            }
        }
    }

    // === Queries ===

    /// The winner, once the session is over.
    #[must_use]
    pub fn winner(&self) -> Option<ParticipantId> {
        self.winner
    }

    /// Check if a winner has been decided.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Rounds played or in progress.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Dice across all active hands.
    #[must_use]
    pub fn total_dice(&self) -> u32 {
        self.table.total_dice()
    }

    /// Participants still holding dice, in seating order.
    #[must_use]
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Look up an active participant.
    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// Table state between rounds.
    #[must_use]
    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Positions of the dice and strategy streams.
    ///
    /// Taken between rounds, this is enough to reproduce every later roll
    /// with [`GameRng::from_state`].
    #[must_use]
    pub fn rng_state(&self) -> SessionRngState {
        SessionRngState {
            dice: self.dice_rng.state(),
            strategy: self.strategy_rng.state(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Bet;
    use crate::events::EventLog;
    use crate::rules::LossReason;
    use crate::strategy::{BetInput, ScriptedActor};

    fn bots(count: usize) -> SessionBuilder {
        SessionBuilder::new(SessionConfig::default()).automated_from_roster(count)
    }

    #[test]
    fn test_build_seats_in_order() {
        let session = SessionBuilder::new(SessionConfig::default())
            .manual("Will", ScriptedActor::new())
            .automated_from_roster(2)
            .build(7)
            .unwrap();

        assert_eq!(session.participants().len(), 3);
        assert_eq!(session.participants()[0].name(), "Will");
        assert!(!session.participants()[0].is_automated());
        assert!(session.participants()[1].is_automated());
        assert_eq!(session.total_dice(), 15);
        assert!(session.participants().iter().all(|p| p.hand().len() == 5));
        assert_eq!(session.round(), 0);
    }

    #[test]
    fn test_roster_names_are_distinct() {
        let session = bots(5).build(11).unwrap();
        let names: FxHashSet<&str> = session.participants().iter().map(Participant::name).collect();

        assert_eq!(names.len(), 5);
        assert!(names.iter().all(|n| BOT_ROSTER.contains(n)));
    }

    #[test]
    fn test_roster_skips_explicit_names() {
        let session = SessionBuilder::new(SessionConfig::default())
            .automated("Maccus")
            .automated_from_roster(5)
            .build(3);
        // Six automated seats exceed the limit.
        assert!(matches!(session, Err(ConfigError::TooManyAutomated { got: 6, .. })));

        let session = SessionBuilder::new(SessionConfig::default())
            .automated("Maccus")
            .automated_from_roster(4)
            .build(3)
            .unwrap();
        let maccus = session.participants().iter().filter(|p| p.name() == "Maccus").count();
        assert_eq!(maccus, 1);
    }

    #[test]
    fn test_build_rejects_bad_seating() {
        assert_eq!(
            bots(1).build(1).unwrap_err(),
            ConfigError::TooFewParticipants { got: 1, min: 2 }
        );
        assert_eq!(
            bots(6).build(1).unwrap_err(),
            ConfigError::TooManyAutomated { got: 6, max: 5 }
        );
        assert_eq!(
            bots(1).manual("  ", ScriptedActor::new()).build(1).unwrap_err(),
            ConfigError::EmptyName
        );
        assert_eq!(
            bots(1).manual("crash", ScriptedActor::new()).build(1).unwrap_err(),
            ConfigError::ReservedName("crash".into())
        );
        assert_eq!(
            bots(1)
                .manual("Ann", ScriptedActor::new())
                .manual("ann", ScriptedActor::new())
                .build(1)
                .unwrap_err(),
            ConfigError::DuplicateName("ann".into())
        );
        assert_eq!(
            SessionBuilder::new(SessionConfig::default().with_starting_dice(0))
                .automated_from_roster(2)
                .build(1)
                .unwrap_err(),
            ConfigError::NoStartingDice
        );
    }

    #[test]
    fn test_build_requires_an_automated_seat() {
        let all_manual = SessionBuilder::new(SessionConfig::default())
            .manual("Ann", ScriptedActor::new())
            .manual("Bob", ScriptedActor::new())
            .build(1);
        assert_eq!(
            all_manual.unwrap_err(),
            ConfigError::TooFewAutomated { got: 0, min: 1 }
        );
    }

    #[test]
    fn test_build_caps_total_seats() {
        let crowded = bots(5)
            .manual("Ann", ScriptedActor::new())
            .manual("Bob", ScriptedActor::new());
        assert_eq!(
            crowded.build(1).unwrap_err(),
            ConfigError::TooManyParticipants { got: 7, max: 6 }
        );

        let full = bots(5).manual("Will", ScriptedActor::new()).build(1).unwrap();
        assert_eq!(full.participants().len(), MAX_PARTICIPANTS);
        assert_eq!(full.participants()[5].id(), ParticipantId::new(5));
    }

    #[test]
    fn test_build_caps_starting_dice() {
        let session = SessionBuilder::new(SessionConfig::default().with_starting_dice(50))
            .automated_from_roster(2)
            .build(1);
        assert_eq!(
            session.unwrap_err(),
            ConfigError::TooManyStartingDice { got: 50, max: 20 }
        );
    }

    #[test]
    fn test_rng_state_replays_next_roll() {
        let mut session = bots(3).build(31).unwrap();
        let mut log = EventLog::new();
        session.play_round(&mut log).unwrap();

        // The next round re-rolls every remaining hand, in seating order.
        let saved = session.rng_state();
        let json = serde_json::to_string(&saved).unwrap();
        let restored: SessionRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, saved);

        let mut replay = GameRng::from_state(&restored.dice);
        let expected: Vec<Vec<u8>> = session
            .participants()
            .iter()
            .map(|p| (0..p.hand().len()).map(|_| replay.roll_die()).collect())
            .collect();

        session.play_round(&mut log).unwrap();
        let revealed: Vec<Vec<u8>> = match log.of_kind("hands_revealed").last() {
            Some(GameEvent::HandsRevealed { hands }) => {
                hands.iter().map(|h| h.faces.clone()).collect()
            }
            _ => panic!("second round revealed no hands"),
        };
        assert_eq!(revealed, expected);
        assert_ne!(session.rng_state(), saved);
    }

    #[test]
    fn test_manual_seat_eliminated_while_bots_play_on() {
        // Will holds a single die and opens with the largest bet on the table.
        let will = ScriptedActor::new().with_bet(BetInput::numbers(11, 6));
        let mut session = SessionBuilder::new(SessionConfig::default())
            .manual("Will", will)
            .automated("Clanker")
            .automated("Crash")
            .build(5)
            .unwrap();

        *session.participants[0].hand_mut() = DiceHand::from_faces(&[3]);
        *session.participants[1].hand_mut() = DiceHand::from_faces(&[2, 2, 3, 4, 5]);
        *session.participants[2].hand_mut() = DiceHand::from_faces(&[2, 3, 3, 4, 5]);
        session.table = TableState::new(11, false, ParticipantId::new(0));
        let mut log = EventLog::new();

        // 11 x 6 admits no raise, so Clanker must call and no six shows.
        let outcome = session.play_round(&mut log).unwrap();
        assert_eq!(outcome.bet, Bet::new(11, 6));
        assert_eq!(outcome.challenger, ParticipantId::new(1));
        assert_eq!(outcome.actual, 0);
        assert_eq!(outcome.reason, LossReason::BetWasFalse);
        assert_eq!(outcome.eliminated, vec![ParticipantId::new(0)]);
        assert_eq!(outcome.winner, None);
        assert_eq!(outcome.next_starter, ParticipantId::new(1));
        assert!(matches!(
            log.of_kind("eliminated").next(),
            Some(GameEvent::Eliminated { participant }) if *participant == ParticipantId::new(0)
        ));

        assert_eq!(session.participants().len(), 2);
        assert!(session.participant(ParticipantId::new(0)).is_none());
        assert!(!session.is_over());
        let held: u32 = session.participants().iter().map(|p| p.hand().len()).sum();
        assert_eq!(session.total_dice(), 10);
        assert_eq!(held, session.total_dice());

        // Will's script is spent; the bots finish without asking for it.
        let winner = session.play(&mut log).unwrap();
        assert_ne!(winner, ParticipantId::new(0));
        assert_eq!(log.of_kind("victory").count(), 1);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = bots(3).build(42).unwrap();
        let mut b = bots(3).build(42).unwrap();
        let mut log_a = EventLog::new();
        let mut log_b = EventLog::new();

        assert_eq!(a.play(&mut log_a).unwrap(), b.play(&mut log_b).unwrap());
        assert_eq!(log_a.events(), log_b.events());
    }

    #[test]
    fn test_round_costs_dice() {
        let mut session = bots(2).build(5).unwrap();
        let mut log = EventLog::new();

        let outcome = session.play_round(&mut log).unwrap();
        assert_eq!(session.total_dice(), 10 - outcome.losers.len() as u32);
        assert_eq!(session.round(), 1);
        assert_eq!(session.table().current(), outcome.next_starter);

        let kinds: Vec<_> = log.events().iter().take(2).map(GameEvent::kind).collect();
        assert_eq!(kinds, vec!["session_started", "round_started"]);
    }

    #[test]
    fn test_play_until_winner() {
        let mut session = bots(4).build(2024).unwrap();
        let mut log = EventLog::new();

        let winner = session.play(&mut log).unwrap();
        assert!(session.is_over());
        assert_eq!(session.winner(), Some(winner));
        assert_eq!(session.participants().len(), 1);
        assert_eq!(session.total_dice(), session.participants()[0].hand().len());
        assert!(matches!(session.play_round(&mut log), Err(EngineError::GameOver)));
    }

    #[test]
    fn test_actor_failure_abandons_round() {
        // Ann has no answers queued: she is asked either to open or to respond
        // to the bot's opening bet, and both fail.
        let mut session = SessionBuilder::new(SessionConfig::default())
            .manual("Ann", ScriptedActor::new())
            .automated("Crash")
            .build(9)
            .unwrap();
        let mut log = EventLog::new();

        let starter = session.table().current();
        assert!(matches!(session.play_round(&mut log), Err(EngineError::Actor(_))));
        assert_eq!(session.total_dice(), 10);
        assert_eq!(session.table().current(), starter);
        assert!(session.table().current_bet().is_none());
        assert!(session.table().history().is_empty());
    }
}
