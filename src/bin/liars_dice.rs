//! Console Liar's Dice: one human against 1-5 computer opponents.
//!
//! Usage:
//!   cargo run --features cli --bin liars-dice -- --bots 3 --wild
//!   cargo run --features cli --bin liars-dice -- --name Will --seed 42 -vv

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dialoguer::{Confirm, Input, Select};
use liars_dice::core::{CallPenalty, DiceHand, ParticipantId, SessionConfig, TableView, BOT_ROSTER};
use liars_dice::events::{EventSink, GameEvent};
use liars_dice::rules::LossReason;
use liars_dice::strategy::{Actor, ActorError, BetInput, Decision, Rejection};
use liars_dice::SessionBuilder;
use rustc_hash::FxHashMap;
use tracing::{info, Level};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Liar's Dice against computer opponents")]
struct Args {
    /// Your name at the table (asked for if omitted)
    #[arg(short, long)]
    name: Option<String>,

    /// Number of computer opponents
    #[arg(short, long, default_value = "2", value_parser = clap::value_parser!(u8).range(1..=5))]
    bots: u8,

    /// Ones count as every face
    #[arg(short, long)]
    wild: bool,

    /// Dice each participant starts with
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u32).range(1..=20))]
    dice: u32,

    /// Who loses a die when a called bet holds
    #[arg(long, value_enum, default_value_t = Penalty::Challenger)]
    penalty: Penalty,

    /// Seed for a reproducible game (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Penalty {
    Challenger,
    AllButBettor,
}

impl From<Penalty> for CallPenalty {
    fn from(penalty: Penalty) -> Self {
        match penalty {
            Penalty::Challenger => CallPenalty::Challenger,
            Penalty::AllButBettor => CallPenalty::AllButBettor,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn render(faces: &[u8]) -> String {
    faces.iter().map(|f| format!("[{f}]")).collect::<Vec<_>>().join(" ")
}

// === Actor ===

/// Prompts the human at the terminal.
struct ConsoleActor;

fn input_error(err: dialoguer::Error) -> ActorError {
    ActorError::Input(err.to_string())
}

impl Actor for ConsoleActor {
    fn decide(&mut self, view: &TableView, hand: &DiceHand) -> Result<Decision, ActorError> {
        let bet = view.previous_bet.map_or_else(|| "none".to_string(), |b| b.to_string());
        let selection = Select::new()
            .with_prompt(format!(
                "\nYOU HOLD {}  |  bet {}  |  {} dice on the table",
                render(hand.faces()),
                bet,
                view.total_dice
            ))
            .items(&["Bet", "Call"][..])
            .default(0)
            .interact()
            .map_err(input_error)?;
        Ok(if selection == 0 { Decision::Bet } else { Decision::Call })
    }

    fn propose_bet(
        &mut self,
        view: &TableView,
        hand: &DiceHand,
        rejection: Option<&Rejection>,
    ) -> Result<BetInput, ActorError> {
        match rejection {
            Some(reason) => println!("Bet refused: {reason}. Try again."),
            None => println!("\nYour hand is: {}", render(hand.faces())),
        }
        if let Some(previous) = view.previous_bet {
            println!("Raise {previous}: more dice, or the same count with a higher face.");
        }
        let count = Input::<String>::new()
            .with_prompt("Number of dice")
            .interact_text()
            .map_err(input_error)?;
        let face = Input::<String>::new()
            .with_prompt("Face value")
            .interact_text()
            .map_err(input_error)?;
        Ok(BetInput::new(count, face))
    }
}

// === Presenter ===

/// Prints game events for the human.
struct ConsolePresenter {
    names: FxHashMap<ParticipantId, String>,
}

impl ConsolePresenter {
    fn new() -> Self {
        Self {
            names: FxHashMap::default(),
        }
    }

    fn name(&self, id: ParticipantId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| id.to_string())
    }

    fn names(&self, ids: &[ParticipantId]) -> String {
        ids.iter().map(|&id| self.name(id)).collect::<Vec<_>>().join(", ")
    }
}

impl EventSink for ConsolePresenter {
    fn emit(&mut self, event: GameEvent) {
        match event {
            GameEvent::SessionStarted { seats } => {
                for seat in seats {
                    println!("{} joins the game!", seat.name);
                    self.names.insert(seat.participant, seat.name);
                }
            }
            GameEvent::RoundStarted {
                round,
                starter,
                total_dice,
            } => {
                println!("\n=== Round {round} ===");
                let starter = self.name(starter);
                println!("{starter} starts the round. {total_dice} dice on the table.");
            }
            GameEvent::BetPlaced { participant, bet } => {
                println!(
                    "{} bets there are at least {} dice showing {}.",
                    self.name(participant),
                    bet.count,
                    bet.face
                );
            }
            GameEvent::BetRejected { .. } => {}
            GameEvent::Challenged {
                challenger,
                bettor,
                bet,
            } => {
                println!(
                    "\n{} calls {}'s bet of {bet}! Revealing all hands.",
                    self.name(challenger),
                    self.name(bettor)
                );
            }
            GameEvent::HandsRevealed { hands } => {
                for hand in hands {
                    println!("  {:<12} {}", self.name(hand.participant), render(&hand.faces));
                }
            }
            GameEvent::Resolved {
                bet,
                actual,
                wild_mode,
                losers,
                reason,
            } => {
                let wild = if wild_mode && bet.face != 1 { " (ones wild)" } else { "" };
                println!("There are {actual} dice showing {}{wild}.", bet.face);
                let verdict = match reason {
                    LossReason::BetWasFalse => "The bet was false",
                    LossReason::CallWasWrong => "The bet held",
                };
                println!("{verdict}: {} loses a die.", self.names(&losers));
            }
            GameEvent::Eliminated { participant } => {
                println!("{} is out of the game.", self.name(participant));
            }
            GameEvent::Victory { winner } => {
                println!("\n{} is the winner!", self.name(winner));
            }
        }
    }
}

// === Main ===

fn ask_name() -> Result<String> {
    let name = Input::<String>::new()
        .with_prompt("Enter your name")
        .validate_with(|input: &String| -> Result<(), String> {
            let trimmed = input.trim();
            if trimmed.is_empty() {
                Err("You cannot play with an empty name".to_string())
            } else if BOT_ROSTER.iter().any(|r| r.eq_ignore_ascii_case(trimmed)) {
                Err(format!("{trimmed} is reserved for a computer player"))
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(name)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = SessionConfig::default()
        .with_wild_mode(args.wild)
        .with_starting_dice(args.dice)
        .with_call_penalty(args.penalty.into());
    let name = match args.name {
        Some(name) => name,
        None => ask_name()?,
    };
    let mut seed = args.seed.unwrap_or_else(rand::random);

    println!("Wild mode {}.", if config.wild_mode { "activated" } else { "NOT active" });

    loop {
        info!(seed, "starting game");
        let mut session = SessionBuilder::new(config.clone())
            .manual(name.clone(), ConsoleActor)
            .automated_from_roster(usize::from(args.bots))
            .build(seed)
            .context("invalid table setup")?;

        let mut presenter = ConsolePresenter::new();
        session.play(&mut presenter).context("game aborted")?;

        let again = Confirm::new()
            .with_prompt("Would you like to play another game?")
            .default(false)
            .interact()?;
        if !again {
            println!("Quitting game.");
            return Ok(());
        }
        seed = seed.wrapping_add(1);
    }
}
