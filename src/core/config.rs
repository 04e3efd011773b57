//! Session configuration.
//!
//! All values are fixed for a session once chosen:
//! - `SessionConfig`: dice per participant, wild mode, call penalty rule
//! - `AutomatedConfig`: tunable constants of the automated strategy
//!
//! Configurations are plain serde structs with builder-style setters and a
//! `validate` pass that runs before a session is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dice each participant starts with.
pub const DEFAULT_STARTING_DICE: u32 = 5;

/// Most dice a participant may start with.
pub const MAX_STARTING_DICE: u32 = 20;

/// Most automated participants a session may seat.
pub const MAX_AUTOMATED: usize = 5;

/// Fewest automated participants a session needs.
pub const MIN_AUTOMATED: usize = 1;

/// Fewest participants a session needs.
pub const MIN_PARTICIPANTS: usize = 2;

/// Most participants a session may seat: one manual seat plus a full bench.
pub const MAX_PARTICIPANTS: usize = 1 + MAX_AUTOMATED;

/// Names reserved for automated participants.
pub const BOT_ROSTER: [&str; 10] = [
    "Maccus",
    "Ratlin",
    "Penrod",
    "Jimmy Legs",
    "Koleniko",
    "Greenbeard",
    "Clanker",
    "Crash",
    "Hadras",
    "Wyvern",
];

/// Invalid session configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("starting dice must be at least 1")]
    NoStartingDice,
    #[error("at most {max} starting dice are supported (got {got})")]
    TooManyStartingDice { got: u32, max: u32 },
    #[error("a session needs at least {min} participants (got {got})")]
    TooFewParticipants { got: usize, min: usize },
    #[error("at most {max} participants are supported (got {got})")]
    TooManyParticipants { got: usize, max: usize },
    #[error("a session needs at least {min} automated participant (got {got})")]
    TooFewAutomated { got: usize, min: usize },
    #[error("at most {max} automated participants are supported (got {got})")]
    TooManyAutomated { got: usize, max: usize },
    #[error("participant names must not be empty")]
    EmptyName,
    #[error("participant name {0:?} is already taken")]
    DuplicateName(String),
    #[error("participant name {0:?} is reserved for automated players")]
    ReservedName(String),
    #[error("{name} must be within [0, 1] (got {value})")]
    NotAProbability { name: &'static str, value: f64 },
}

/// Who loses a die when a challenged bet turns out to be true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallPenalty {
    /// Only the challenger loses a die.
    #[default]
    Challenger,
    /// Every active participant except the bettor loses a die.
    AllButBettor,
}

/// Tunable constants of the automated strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutomatedConfig {
    /// Challenge when the current bet's probability falls below this.
    pub call_threshold: f64,

    /// Chance that a perturbation step bluffs (jumps face) instead of
    /// raising the count at the previous face.
    pub bluff_probability: f64,

    /// Random perturbations tried before falling back to the minimal raise.
    pub max_perturbations: u32,
}

impl Default for AutomatedConfig {
    fn default() -> Self {
        Self {
            call_threshold: 0.3,
            bluff_probability: 0.3,
            max_perturbations: 64,
        }
    }
}

impl AutomatedConfig {
    /// Set the call threshold.
    #[must_use]
    pub fn with_call_threshold(mut self, threshold: f64) -> Self {
        self.call_threshold = threshold;
        self
    }

    /// Set the bluff probability.
    #[must_use]
    pub fn with_bluff_probability(mut self, probability: f64) -> Self {
        self.bluff_probability = probability;
        self
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("call_threshold", self.call_threshold),
            ("bluff_probability", self.bluff_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::NotAProbability { name, value });
            }
        }
        Ok(())
    }
}

/// Configuration for one game session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Dice each participant starts with.
    pub starting_dice: u32,

    /// Whether ones count as every other face.
    pub wild_mode: bool,

    /// Who pays when a challenged bet holds.
    pub call_penalty: CallPenalty,

    /// Automated strategy constants shared by every automated participant.
    pub automated: AutomatedConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_dice: DEFAULT_STARTING_DICE,
            wild_mode: false,
            call_penalty: CallPenalty::default(),
            automated: AutomatedConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Enable or disable wild ones.
    #[must_use]
    pub fn with_wild_mode(mut self, wild_mode: bool) -> Self {
        self.wild_mode = wild_mode;
        self
    }

    /// Set the starting dice per participant.
    #[must_use]
    pub fn with_starting_dice(mut self, dice: u32) -> Self {
        self.starting_dice = dice;
        self
    }

    /// Set the call penalty rule.
    #[must_use]
    pub fn with_call_penalty(mut self, penalty: CallPenalty) -> Self {
        self.call_penalty = penalty;
        self
    }

    /// Set the automated strategy constants.
    #[must_use]
    pub fn with_automated(mut self, automated: AutomatedConfig) -> Self {
        self.automated = automated;
        self
    }

    /// Check every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_dice == 0 {
            return Err(ConfigError::NoStartingDice);
        }
        if self.starting_dice > MAX_STARTING_DICE {
            return Err(ConfigError::TooManyStartingDice {
                got: self.starting_dice,
                max: MAX_STARTING_DICE,
            });
        }
        self.automated.validate()
    }
}
