//! Injectable randomness for match draws, chat PINs and simulated latency.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

/// Uniform random source used by the engines
pub trait RandomSource: Send {
    /// Uniform draw in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `low..=high`. Returns `low` when `high <= low`.
    fn next_in_range(&mut self, low: u64, high: u64) -> u64;
}

/// `StdRng`-backed source, either OS-seeded or reproducible from a seed
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create a source seeded from the operating system
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible source
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdRandom {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RandomSource for StdRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }
}

/// Scripted source for deterministic scenarios.
///
/// `next_unit` replays the given draws in order and then returns the
/// fallback. `next_in_range` never consumes scripted draws; it walks the
/// range with an internal counter so PINs and delays stay predictable
/// without disturbing the match script.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    draws: VecDeque<f64>,
    fallback: f64,
    counter: u64,
}

impl SequenceRandom {
    /// Replay `draws`, then return 0.5 forever
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self::with_fallback(draws, 0.5)
    }

    pub fn with_fallback(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback,
            counter: 0,
        }
    }

    /// Scripted draws not yet consumed
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }

    fn next_in_range(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        let span = high - low + 1;
        let value = low + self.counter % span;
        self.counter += 1;
        value
    }
}
