//! Time sources.
//!
//! Engines never read the wall clock themselves: every operation that depends
//! on time takes `now` explicitly. The async layers hold a [`Clock`] and pass
//! `clock.now()` down, which keeps the reducers deterministic under test.

use chrono::{DateTime, Duration, Utc};
use std::sync::{
    Arc,
    atomic::{AtomicI64, Ordering},
};

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give
/// another to a service or actor.
#[derive(Debug, Clone)]
pub struct ManualClock {
    millis: Arc<AtomicI64>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    /// Move the clock forward (or backward, for a negative duration)
    pub fn advance(&self, by: Duration) {
        self.millis
            .fetch_add(by.num_milliseconds(), Ordering::SeqCst);
    }

    /// Jump to an absolute instant
    pub fn set(&self, to: DateTime<Utc>) {
        self.millis.store(to.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_shared_instant() {
        let start = Utc::now();
        let clock = ManualClock::new(start);
        let other = clock.clone();

        clock.advance(Duration::minutes(90));

        assert_eq!(
            other.now().timestamp_millis(),
            (start + Duration::minutes(90)).timestamp_millis()
        );
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new(Utc::now());
        let target = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
        clock.set(target);
        assert_eq!(clock.now(), target);
    }
}
