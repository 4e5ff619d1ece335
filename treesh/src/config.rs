//! Engine configuration.
//!
//! Every value has a default matching the demo client. [`EngineConfig::from_env`]
//! overrides them from `TREESH_*` environment variables and validates the result.

use chrono::Duration;
use std::str::FromStr;
use thiserror::Error;

use crate::security::{RateLimitConfig, rate_limiter::MAX_PERIOD_SECS};

/// Longest story lifetime accepted (one year)
pub const MAX_STORY_TTL_HOURS: i64 = 24 * 365;

/// Longest delay before the synthetic chat reply (one hour)
pub const MAX_REPLY_DELAY_MS: u64 = 60 * 60 * 1000;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

impl ConfigError {
    fn invalid(var: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            var: var.to_string(),
            reason: reason.into(),
        }
    }
}

/// Match draw probabilities
#[derive(Debug, Clone, PartialEq)]
pub struct ArcadeConfig {
    /// Chance that a like produces a match
    pub like_match_probability: f64,
    /// Chance that a super like produces a match
    pub super_like_match_probability: f64,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            like_match_probability: 0.2,
            super_like_match_probability: 0.4,
        }
    }
}

/// Simulated network latency, drawn uniformly from `min_ms..=max_ms`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            min_ms: 300,
            max_ms: 800,
        }
    }
}

impl LatencyConfig {
    /// No artificial delay
    #[must_use]
    pub const fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }
}

/// Chat thread limits and the synthetic counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Messages kept per thread
    pub max_messages: usize,
    /// Characters allowed per message
    pub max_message_length: usize,
    /// Delay before the synthetic reply arrives
    pub reply_delay_ms: u64,
    pub reply_text: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_messages: 1000,
            max_message_length: 1000,
            reply_delay_ms: 2000,
            reply_text: "Thanks for the message! 😊".to_string(),
        }
    }
}

impl ChatConfig {
    /// Delay before the synthetic reply, capped at [`MAX_REPLY_DELAY_MS`]
    #[must_use]
    pub fn reply_delay(&self) -> Duration {
        Duration::milliseconds(self.reply_delay_ms.min(MAX_REPLY_DELAY_MS) as i64)
    }
}

/// Story lifetime and sweep cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoryConfig {
    pub ttl_hours: i64,
    pub sweep_interval_secs: u64,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            ttl_hours: 24,
            sweep_interval_secs: 60,
        }
    }
}

impl StoryConfig {
    /// Story lifetime as a duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` unless `ttl_hours` is within `1..=MAX_STORY_TTL_HOURS`
    pub fn ttl(&self) -> Result<Duration, ConfigError> {
        if !(1..=MAX_STORY_TTL_HOURS).contains(&self.ttl_hours) {
            return Err(ConfigError::invalid(
                "TREESH_STORY_TTL_HOURS",
                format!("Must be between 1 and {MAX_STORY_TTL_HOURS}"),
            ));
        }
        Duration::try_hours(self.ttl_hours)
            .ok_or_else(|| ConfigError::invalid("TREESH_STORY_TTL_HOURS", "Out of range"))
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EngineConfig {
    pub arcade: ArcadeConfig,
    pub latency: LatencyConfig,
    pub chat: ChatConfig,
    pub pin_attempts: RateLimitConfig,
    pub stories: StoryConfig,
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the resulting values fail [`EngineConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let arcade = ArcadeConfig {
            like_match_probability: parse_env_or(
                "TREESH_LIKE_MATCH_PROBABILITY",
                defaults.arcade.like_match_probability,
            ),
            super_like_match_probability: parse_env_or(
                "TREESH_SUPER_LIKE_MATCH_PROBABILITY",
                defaults.arcade.super_like_match_probability,
            ),
        };

        let latency = LatencyConfig {
            min_ms: parse_env_or("TREESH_API_DELAY_MIN_MS", defaults.latency.min_ms),
            max_ms: parse_env_or("TREESH_API_DELAY_MAX_MS", defaults.latency.max_ms),
        };

        let chat = ChatConfig {
            max_messages: parse_env_or("TREESH_CHAT_MAX_MESSAGES", defaults.chat.max_messages),
            max_message_length: parse_env_or(
                "TREESH_CHAT_MAX_MESSAGE_LENGTH",
                defaults.chat.max_message_length,
            ),
            reply_delay_ms: parse_env_or(
                "TREESH_CHAT_REPLY_DELAY_MS",
                defaults.chat.reply_delay_ms,
            ),
            reply_text: std::env::var("TREESH_CHAT_REPLY_TEXT")
                .unwrap_or(defaults.chat.reply_text),
        };

        let stories = StoryConfig {
            ttl_hours: parse_env_or("TREESH_STORY_TTL_HOURS", defaults.stories.ttl_hours),
            sweep_interval_secs: parse_env_or(
                "TREESH_STORY_SWEEP_INTERVAL_SECS",
                defaults.stories.sweep_interval_secs,
            ),
        };

        let config = Self {
            arcade,
            latency,
            chat,
            pin_attempts: RateLimitConfig::pin_entry(),
            stories,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (var, probability) in [
            (
                "TREESH_LIKE_MATCH_PROBABILITY",
                self.arcade.like_match_probability,
            ),
            (
                "TREESH_SUPER_LIKE_MATCH_PROBABILITY",
                self.arcade.super_like_match_probability,
            ),
        ] {
            if !(0.0..=1.0).contains(&probability) {
                return Err(ConfigError::invalid(var, "Must be between 0.0 and 1.0"));
            }
        }

        if self.latency.min_ms > self.latency.max_ms {
            return Err(ConfigError::invalid(
                "TREESH_API_DELAY_MIN_MS",
                format!("Must not exceed max delay ({})", self.latency.max_ms),
            ));
        }

        if self.chat.max_messages == 0 {
            return Err(ConfigError::invalid(
                "TREESH_CHAT_MAX_MESSAGES",
                "Must be greater than 0",
            ));
        }

        if self.chat.max_message_length == 0 {
            return Err(ConfigError::invalid(
                "TREESH_CHAT_MAX_MESSAGE_LENGTH",
                "Must be greater than 0",
            ));
        }

        if self.chat.reply_delay_ms > MAX_REPLY_DELAY_MS {
            return Err(ConfigError::invalid(
                "TREESH_CHAT_REPLY_DELAY_MS",
                format!("Must not exceed {MAX_REPLY_DELAY_MS}"),
            ));
        }

        if self.pin_attempts.max_attempts == 0 {
            return Err(ConfigError::invalid(
                "TREESH_PIN_MAX_ATTEMPTS",
                "Must be greater than 0",
            ));
        }

        for (var, secs) in [
            ("TREESH_PIN_WINDOW_SECS", self.pin_attempts.window_secs),
            ("TREESH_PIN_LOCKOUT_SECS", self.pin_attempts.lockout_secs),
        ] {
            if !(1..=MAX_PERIOD_SECS).contains(&secs) {
                return Err(ConfigError::invalid(
                    var,
                    format!("Must be between 1 and {MAX_PERIOD_SECS}"),
                ));
            }
        }

        self.stories.ttl()?;

        if self.stories.sweep_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "TREESH_STORY_SWEEP_INTERVAL_SECS",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}

/// Parse an environment variable, falling back to `default` when unset or unparsable
pub fn parse_env_or<T: FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
