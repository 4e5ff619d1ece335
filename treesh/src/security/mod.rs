//! Security helpers.
//!
//! The chat PIN check is a client-side comparison; this module adds the
//! attempt throttling that keeps it from being brute-forced within a session:
//! - **PIN entry**: 5 failed attempts per 5 minutes, 15-minute lockout with
//!   exponential backoff (all configurable)

pub mod rate_limiter;

pub use rate_limiter::{RateLimitConfig, RateLimitResult, RateLimiter};
