//! Demo runner configuration.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use treesh::{EngineConfig, config::parse_env_or};

/// Complete runner configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Engine settings (probabilities, latency, chat, stories)
    pub engine: EngineConfig,
    /// Seed for match draws and PINs; OS entropy when unset
    pub seed: Option<u64>,
    /// Number of candidates to swipe on
    pub swipes: usize,
}

impl DemoConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `seed_override` - Optional seed (from CLI args)
    /// * `swipes_override` - Optional swipe count (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is present but invalid
    pub fn from_env(
        seed_override: Option<u64>,
        swipes_override: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let engine = EngineConfig::from_env()?;

        let seed = match seed_override {
            Some(seed) => Some(seed),
            None => match std::env::var("TREESH_DEMO_SEED") {
                Ok(raw) => Some(raw.parse().map_err(|_| ConfigError::Invalid {
                    var: "TREESH_DEMO_SEED".to_string(),
                    reason: format!("'{raw}' is not an unsigned integer"),
                })?),
                Err(_) => None,
            },
        };

        let swipes = swipes_override.unwrap_or_else(|| parse_env_or("TREESH_DEMO_SWIPES", 5));

        let config = Self {
            engine,
            seed,
            swipes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` when nothing would be swiped
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.swipes == 0 {
            return Err(ConfigError::Invalid {
                var: "TREESH_DEMO_SWIPES".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Engine(#[from] treesh::ConfigError),

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        unsafe {
            std::env::remove_var("TREESH_DEMO_SEED");
            std::env::remove_var("TREESH_DEMO_SWIPES");
            std::env::remove_var("TREESH_LIKE_MATCH_PROBABILITY");
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = DemoConfig::from_env(None, None).unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.swipes, 5);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    #[serial]
    fn test_overrides_win_over_env() {
        clear_env();
        unsafe {
            std::env::set_var("TREESH_DEMO_SEED", "7");
            std::env::set_var("TREESH_DEMO_SWIPES", "3");
        }

        let config = DemoConfig::from_env(Some(42), None).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.swipes, 3);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_seed() {
        clear_env();
        unsafe {
            std::env::set_var("TREESH_DEMO_SEED", "abc");
        }

        let err = DemoConfig::from_env(None, None).unwrap_err();
        assert!(err.to_string().contains("TREESH_DEMO_SEED"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_engine_config() {
        clear_env();
        unsafe {
            std::env::set_var("TREESH_LIKE_MATCH_PROBABILITY", "1.5");
        }

        let err = DemoConfig::from_env(None, None).unwrap_err();
        assert!(matches!(err, ConfigError::Engine(_)));
        clear_env();
    }

    #[test]
    fn test_zero_swipes_rejected() {
        let config = DemoConfig {
            engine: EngineConfig::default(),
            seed: None,
            swipes: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
