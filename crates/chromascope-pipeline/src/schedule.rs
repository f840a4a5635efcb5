//! Self-tuning downsample schedule.
//!
//! The first frames after startup are decoded at a coarse factor so a
//! result reaches the screen quickly; every completed histogram halves
//! the factor until the steady state is reached.

use chromascope_core::decode::ConfigError;
use chromascope_core::SampleConfig;

/// Downsample factor sequence stepping from coarse to steady.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleSchedule {
    current: u32,
    steady: u32,
}

impl ScaleSchedule {
    /// Factor used for the first frame after startup.
    pub const DEFAULT_INITIAL_FACTOR: u32 = 16;

    /// Factor used once warmed up. Matches the engine's default.
    pub const DEFAULT_STEADY_FACTOR: u32 = SampleConfig::DEFAULT_SCALE_FACTOR;

    /// Schedule stepping from `initial` down to `steady`.
    ///
    /// Both factors must be powers of two. An `initial` below `steady`
    /// starts at `steady` (no warmup).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NonPowerOfTwoFactor` if either factor is
    /// not a power of two.
    pub fn new(initial: u32, steady: u32) -> Result<Self, ConfigError> {
        SampleConfig::scaled(initial)?;
        SampleConfig::scaled(steady)?;
        Ok(Self {
            current: initial.max(steady),
            steady,
        })
    }

    /// The factor the next frame will be decoded at.
    pub fn current(&self) -> u32 {
        self.current
    }

    /// The current factor as a decode config.
    pub fn current_config(&self) -> SampleConfig {
        SampleConfig::ScaleFactor(self.current)
    }

    /// Step toward the steady state after a completed histogram.
    ///
    /// Halves the current factor; at the steady state this is a no-op.
    pub fn advance(&mut self) {
        if self.current > self.steady {
            self.current /= 2;
        }
    }

    /// Whether the warmup has finished.
    pub fn at_steady_state(&self) -> bool {
        self.current == self.steady
    }
}

impl Default for ScaleSchedule {
    fn default() -> Self {
        Self {
            current: Self::DEFAULT_INITIAL_FACTOR,
            steady: Self::DEFAULT_STEADY_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_schedule_warms_up() {
        let mut schedule = ScaleSchedule::default();
        let mut factors = Vec::new();

        for _ in 0..4 {
            factors.push(schedule.current());
            schedule.advance();
        }

        assert_eq!(factors, vec![16, 8, 4, 4]);
        assert!(schedule.at_steady_state());
    }

    #[test]
    fn test_advance_never_drops_below_steady() {
        let mut schedule = ScaleSchedule::new(8, 2).unwrap();
        for _ in 0..10 {
            schedule.advance();
        }
        assert_eq!(schedule.current(), 2);
    }

    #[test]
    fn test_new_rejects_non_power_of_two() {
        assert_eq!(
            ScaleSchedule::new(12, 4),
            Err(ConfigError::NonPowerOfTwoFactor(12))
        );
        assert_eq!(
            ScaleSchedule::new(16, 3),
            Err(ConfigError::NonPowerOfTwoFactor(3))
        );
    }

    #[test]
    fn test_initial_below_steady_starts_at_steady() {
        let schedule = ScaleSchedule::new(2, 8).unwrap();
        assert_eq!(schedule.current(), 8);
        assert!(schedule.at_steady_state());
    }

    #[test]
    fn test_equal_factors_skip_warmup() {
        let schedule = ScaleSchedule::new(4, 4).unwrap();
        assert!(schedule.at_steady_state());
        assert_eq!(schedule.current_config(), SampleConfig::ScaleFactor(4));
    }

    #[test]
    fn test_current_config_tracks_advance() {
        let mut schedule = ScaleSchedule::new(16, 4).unwrap();
        assert_eq!(schedule.current_config(), SampleConfig::ScaleFactor(16));

        schedule.advance();
        assert_eq!(schedule.current_config(), SampleConfig::ScaleFactor(8));
    }
}
