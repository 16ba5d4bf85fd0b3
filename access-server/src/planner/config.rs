//! Search configuration for the access planner.

/// Rejected configuration values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Transfer cost that is negative or not finite
    #[error("transfer minutes must be a finite non-negative number, got {0}")]
    InvalidTransferMinutes(f64),

    /// Default interval that is not a finite positive number
    #[error("default interval must be a finite positive number, got {0}")]
    InvalidDefaultInterval(f64),

    /// Fallback minutes cap that is negative or NaN
    #[error("fallback minutes cap must be a non-negative number, got {0}")]
    InvalidFallbackMinutes(f64),
}

/// Configuration parameters for reachability and path search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Fixed cost of changing lines within a cluster (minutes).
    pub transfer_minutes: f64,

    /// Minutes per hop for lines that don't specify an interval.
    pub default_interval: f64,

    /// Transfer cap used when a request leaves it unset.
    pub fallback_max_transfers: u32,

    /// Minutes cap used when a request leaves it unset.
    pub fallback_max_minutes: f64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    ///
    /// Searches only terminate when every move has a finite, non-negative
    /// cost and every ride a positive one.
    pub fn new(
        transfer_minutes: f64,
        default_interval: f64,
        fallback_max_transfers: u32,
        fallback_max_minutes: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            transfer_minutes,
            default_interval,
            fallback_max_transfers,
            fallback_max_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the cost parameters of an already-built configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.transfer_minutes.is_finite() || self.transfer_minutes < 0.0 {
            return Err(ConfigError::InvalidTransferMinutes(self.transfer_minutes));
        }
        if !self.default_interval.is_finite() || self.default_interval <= 0.0 {
            return Err(ConfigError::InvalidDefaultInterval(self.default_interval));
        }
        if self.fallback_max_minutes.is_nan() || self.fallback_max_minutes < 0.0 {
            return Err(ConfigError::InvalidFallbackMinutes(self.fallback_max_minutes));
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_minutes: 5.0,
            default_interval: 2.5,
            fallback_max_transfers: 99,
            fallback_max_minutes: 9999.0,
        }
    }
}
