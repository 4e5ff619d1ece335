//! Simulated network latency.

use std::time::Duration;

use crate::{config::LatencyConfig, random::RandomSource};

/// Draws a delay per call, uniformly from `min_ms..=max_ms`
pub struct SimulatedLatency {
    config: LatencyConfig,
    rng: Box<dyn RandomSource>,
}

impl SimulatedLatency {
    #[must_use]
    pub fn new(config: LatencyConfig, rng: Box<dyn RandomSource>) -> Self {
        Self { config, rng }
    }

    pub fn next_delay(&mut self) -> Duration {
        Duration::from_millis(self.rng.next_in_range(self.config.min_ms, self.config.max_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::StdRandom;

    #[test]
    fn test_delay_within_bounds() {
        let mut latency =
            SimulatedLatency::new(LatencyConfig::default(), Box::new(StdRandom::seeded(3)));
        for _ in 0..200 {
            let delay = latency.next_delay();
            assert!(delay >= Duration::from_millis(300));
            assert!(delay <= Duration::from_millis(800));
        }
    }

    #[test]
    fn test_zero_latency() {
        let mut latency =
            SimulatedLatency::new(LatencyConfig::none(), Box::new(StdRandom::seeded(3)));
        assert_eq!(latency.next_delay(), Duration::ZERO);
    }
}
