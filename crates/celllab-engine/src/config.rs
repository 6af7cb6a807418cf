//! Engine configuration.

use celllab_core::ConfigError;
use serde::{Deserialize, Serialize};

/// Run parameters that are not part of the model itself.
///
/// The lattice, state dictionary and rule table describe *what* is
/// simulated; `EngineConfig` fixes the random stream and where the clock
/// starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the engine's `ChaCha8Rng`. Default: 0.
    pub seed: u64,
    /// Initial value of the simulated clock. Default: 0.0.
    pub start_time: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            start_time: 0.0,
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Check that the configuration is usable.
    ///
    /// Returns [`ConfigError::InvalidStartTime`] for a NaN or infinite
    /// start time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.start_time.is_finite() {
            return Err(ConfigError::InvalidStartTime {
                value: self.start_time,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let c = EngineConfig::default();
        assert_eq!(c.seed, 0);
        assert_eq!(c.start_time, 0.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn non_finite_start_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let c = EngineConfig {
                seed: 1,
                start_time: value,
            };
            assert!(matches!(
                c.validate(),
                Err(ConfigError::InvalidStartTime { .. })
            ));
        }
    }

    #[test]
    fn negative_start_is_allowed() {
        let c = EngineConfig {
            seed: 0,
            start_time: -5.0,
        };
        assert!(c.validate().is_ok());
    }

    #[test]
    fn with_seed_keeps_default_start() {
        let c = EngineConfig::with_seed(42);
        assert_eq!(c.seed, 42);
        assert_eq!(c.start_time, 0.0);
    }
}
