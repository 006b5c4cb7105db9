//! Run configuration and validation.
//!
//! [`RunConfig`] is the builder-input for constructing a simulation
//! engine. [`validate()`](RunConfig::validate) checks structural
//! invariants up front; engines are only ever constructed from a
//! validated config, so invalid parameters are rejected at the
//! boundary rather than tolerated mid-run.

use std::time::Duration;

use snooze_core::ConfigError;

/// Virtual-time wait per unit of element value.
///
/// An element with value `v` sleeps `v × WAIT_PER_UNIT` of virtual
/// time. Design constant, not user-tunable: chosen so that waits are
/// perceptible at the default speed factor (value 10 → 500 ms).
pub const WAIT_PER_UNIT: Duration = Duration::from_millis(50);

/// Default frame rate for the realtime driver, in ticks per second.
pub const DEFAULT_FRAME_RATE_HZ: f64 = 60.0;

/// Complete configuration for one run of the simulation.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Number of elements to generate. Must be at least 1.
    pub count: u32,
    /// Inclusive lower bound for generated values. Must be at least 1.
    pub min_value: u32,
    /// Inclusive upper bound for generated values. Must be `>= min_value`.
    pub max_value: u32,
    /// Initial speed factor: the rate at which virtual time accrues
    /// relative to real time. Finite and positive; mutable at any time
    /// after construction.
    pub speed_factor: f64,
    /// RNG seed for deterministic element generation.
    pub seed: u64,
    /// Target tick rate for the realtime driver. `None` = 60 Hz.
    pub frame_rate_hz: Option<f64>,
}

impl Default for RunConfig {
    /// Eight elements with values in `10..=49` at unit speed.
    fn default() -> Self {
        Self {
            count: 8,
            min_value: 10,
            max_value: 49,
            speed_factor: 1.0,
            seed: 0,
            frame_rate_hz: None,
        }
    }
}

impl RunConfig {
    /// Validate all structural invariants.
    ///
    /// A failed validation is never partially applied: callers reject
    /// the whole config and leave any prior run intact.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroElementCount);
        }
        if self.min_value == 0 {
            return Err(ConfigError::ZeroMinValue);
        }
        if self.min_value > self.max_value {
            return Err(ConfigError::EmptyValueRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        validate_speed_factor(self.speed_factor)?;
        // Frame rate, if present, must be finite and positive, and its
        // reciprocal must also be finite (rejects subnormals where
        // 1.0/hz = inf, which would panic in Duration::from_secs_f64).
        if let Some(hz) = self.frame_rate_hz {
            if !hz.is_finite() || hz <= 0.0 || !(1.0 / hz).is_finite() {
                return Err(ConfigError::InvalidFrameRate { value: hz });
            }
        }
        Ok(())
    }

    /// The effective frame rate for the realtime driver.
    pub fn resolved_frame_rate_hz(&self) -> f64 {
        self.frame_rate_hz.unwrap_or(DEFAULT_FRAME_RATE_HZ)
    }
}

/// Check that a speed factor is finite and positive.
///
/// Shared by config validation and the live `set_speed` path so both
/// reject the same values.
pub fn validate_speed_factor(value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::InvalidSpeedFactor { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_count_rejected() {
        let config = RunConfig {
            count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroElementCount));
    }

    #[test]
    fn zero_min_value_rejected() {
        let config = RunConfig {
            min_value: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMinValue));
    }

    #[test]
    fn inverted_range_rejected() {
        let config = RunConfig {
            min_value: 9,
            max_value: 3,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyValueRange { min: 9, max: 3 })
        );
    }

    #[test]
    fn single_value_range_allowed() {
        let config = RunConfig {
            min_value: 7,
            max_value: 7,
            ..Default::default()
        };
        config.validate().unwrap();
    }

    #[test]
    fn bad_speed_factors_rejected() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = RunConfig {
                speed_factor: bad,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted speed factor {bad}");
        }
    }

    #[test]
    fn bad_frame_rates_rejected() {
        // 5e-324 is the smallest subnormal: positive, but 1/hz = inf.
        for bad in [0.0, -60.0, f64::NAN, f64::INFINITY, 5e-324] {
            let config = RunConfig {
                frame_rate_hz: Some(bad),
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted frame rate {bad}");
        }
    }

    #[test]
    fn frame_rate_defaults_to_sixty() {
        assert_eq!(RunConfig::default().resolved_frame_rate_hz(), 60.0);
        let config = RunConfig {
            frame_rate_hz: Some(30.0),
            ..Default::default()
        };
        assert_eq!(config.resolved_frame_rate_hz(), 30.0);
    }
}
