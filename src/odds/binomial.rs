//! Cumulative binomial tail.
//!
//! `P(X >= k)` for `X ~ Binomial(n, p)` is read off the CDF of the failure
//! count, `P(n - X <= n - k)`, which the `probability` crate evaluates
//! through the regularized incomplete beta function. Small tails stay
//! positive instead of cancelling to zero in `1 - CDF`, and no factorial or
//! binomial coefficient is ever formed.

use probability::prelude::*;

/// `P(X >= successes)` for `X ~ Binomial(trials, p)`.
///
/// Exact edge cases: 1 when `successes == 0`, 0 when `successes > trials`.
#[must_use]
pub fn binomial_tail(trials: u32, successes: u32, p: f64) -> f64 {
    debug_assert!((0.0..=1.0).contains(&p), "p must be a probability, got {p}");

    if successes == 0 {
        return 1.0;
    }
    if successes > trials {
        return 0.0;
    }
    if p <= 0.0 {
        return 0.0;
    }
    if p >= 1.0 {
        return 1.0;
    }

    let failures = Binomial::new(trials as usize, 1.0 - p);
    failures.distribution(f64::from(trials - successes)).clamp(0.0, 1.0)
}
