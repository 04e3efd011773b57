//! Odds of a bet being true.
//!
//! - `binomial`: numerically stable cumulative binomial tail
//! - `model`: the per-participant bet probability used by automated players

pub mod binomial;
pub mod model;

pub use binomial::binomial_tail;
pub use model::{match_probability, probability_bet_is_true};
