//! Failed-attempt limiting with exponential backoff.
//!
//! Used by the chat gate to throttle PIN guesses per thread. State is held in
//! memory and every call takes `now`, so the limiter is a plain reducer.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

use crate::config::parse_env_or;

/// Longest window or lockout the limiter applies (30 days)
pub const MAX_PERIOD_SECS: u64 = 30 * 24 * 60 * 60;

/// Rate limit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Failed attempts allowed in a window; the last one triggers the lockout
    pub max_attempts: u32,

    /// Time window in seconds
    pub window_secs: u64,

    /// Lockout duration in seconds after reaching the limit
    pub lockout_secs: u64,

    /// Whether repeated lockouts double in length
    pub exponential_backoff: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_secs: 300,
            lockout_secs: 900,
            exponential_backoff: true,
        }
    }
}

impl RateLimitConfig {
    /// Configuration for chat PIN entry, overridable from the environment
    pub fn pin_entry() -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: parse_env_or("TREESH_PIN_MAX_ATTEMPTS", defaults.max_attempts),
            window_secs: parse_env_or("TREESH_PIN_WINDOW_SECS", defaults.window_secs),
            lockout_secs: parse_env_or("TREESH_PIN_LOCKOUT_SECS", defaults.lockout_secs),
            exponential_backoff: parse_env_or(
                "TREESH_PIN_EXPONENTIAL_BACKOFF",
                defaults.exponential_backoff,
            ),
        }
    }
}

/// Attempt record for one identifier
#[derive(Debug, Clone)]
struct RateLimitAttempt {
    attempts: u32,
    window_start: DateTime<Utc>,
    locked_until: Option<DateTime<Utc>>,
    consecutive_violations: u32,
}

impl RateLimitAttempt {
    fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            attempts: 0,
            window_start: now,
            locked_until: None,
            consecutive_violations: 0,
        }
    }
}

/// In-memory failed-attempt limiter
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    attempts: HashMap<String, RateLimitAttempt>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            attempts: HashMap::new(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check whether `identifier` may attempt at `now` without recording anything
    pub fn check(&self, identifier: &str, now: DateTime<Utc>) -> RateLimitResult {
        let Some(attempt) = self.attempts.get(identifier) else {
            return RateLimitResult::Allowed {
                remaining: self.config.max_attempts,
            };
        };

        if let Some(locked_until) = attempt.locked_until
            && now < locked_until
        {
            return RateLimitResult::Locked {
                retry_after: retry_after_secs(locked_until, now),
            };
        }

        if self.window_expired(attempt, now) {
            return RateLimitResult::Allowed {
                remaining: self.config.max_attempts,
            };
        }

        RateLimitResult::Allowed {
            remaining: self.config.max_attempts.saturating_sub(attempt.attempts),
        }
    }

    /// Record a failed attempt and return the resulting state.
    ///
    /// While locked, failures are not counted again.
    pub fn record_failure(&mut self, identifier: &str, now: DateTime<Utc>) -> RateLimitResult {
        let config = self.config.clone();
        let mut attempt = self
            .attempts
            .get(identifier)
            .cloned()
            .unwrap_or_else(|| RateLimitAttempt::fresh(now));

        if let Some(locked_until) = attempt.locked_until
            && now < locked_until
        {
            return RateLimitResult::Locked {
                retry_after: retry_after_secs(locked_until, now),
            };
        }

        if self.window_expired(&attempt, now) || attempt.locked_until.is_some() {
            attempt.attempts = 0;
            attempt.window_start = now;
            attempt.locked_until = None;
        }

        attempt.attempts += 1;

        if attempt.attempts >= config.max_attempts {
            let base_secs = if config.exponential_backoff {
                // 2^violations * base, capped at 32x
                let multiplier = 2u64.pow(attempt.consecutive_violations.min(5));
                config.lockout_secs.saturating_mul(multiplier)
            } else {
                config.lockout_secs
            };
            let lockout_secs = base_secs.min(MAX_PERIOD_SECS);

            attempt.locked_until = Some(
                now.checked_add_signed(period(lockout_secs))
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            );
            attempt.consecutive_violations += 1;

            log::warn!(
                "Attempt limit reached for {}: locked for {}s",
                identifier,
                lockout_secs
            );

            self.attempts.insert(identifier.to_string(), attempt);
            return RateLimitResult::Locked {
                retry_after: lockout_secs,
            };
        }

        let remaining = config.max_attempts - attempt.attempts;
        self.attempts.insert(identifier.to_string(), attempt);

        RateLimitResult::Allowed { remaining }
    }

    /// Forget all state for an identifier (e.g. after a successful attempt)
    pub fn reset(&mut self, identifier: &str) {
        self.attempts.remove(identifier);
    }

    /// Drop records whose lockout and window have both passed
    pub fn cleanup_expired(&mut self, now: DateTime<Utc>) -> usize {
        let window = period(self.config.window_secs);
        let before = self.attempts.len();
        self.attempts.retain(|_, attempt| {
            let locked = attempt.locked_until.is_some_and(|until| now < until);
            locked || now - attempt.window_start <= window
        });
        before - self.attempts.len()
    }

    fn window_expired(&self, attempt: &RateLimitAttempt, now: DateTime<Utc>) -> bool {
        now - attempt.window_start > period(self.config.window_secs)
    }
}

fn period(secs: u64) -> Duration {
    Duration::seconds(secs.min(MAX_PERIOD_SECS) as i64)
}

fn retry_after_secs(locked_until: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let secs = (locked_until - now).num_seconds();
    // Round a sub-second remainder up so callers never see "retry after 0"
    if (locked_until - now) > Duration::seconds(secs) {
        (secs + 1) as u64
    } else {
        secs.max(0) as u64
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Attempt is allowed
    Allowed { remaining: u32 },

    /// Attempts are blocked for `retry_after` seconds
    Locked { retry_after: u64 },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed { .. })
    }

    pub fn remaining(&self) -> Option<u32> {
        match self {
            RateLimitResult::Allowed { remaining } => Some(*remaining),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            RateLimitResult::Locked { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}
