//! Downsample configuration for sampled decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from constructing or validating a [`SampleConfig`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The maximum boundary is zero, which no decode can satisfy.
    #[error("Maximum boundary must be positive")]
    ZeroBoundary,

    /// The supplied scale factor is not a power of two.
    #[error("Scale factor must be a power of two, got {0}")]
    NonPowerOfTwoFactor(u32),
}

/// How much to shrink an image before counting colors.
///
/// Exactly one mode is active per decode:
///
/// - `MaxBoundary(b)`: probe the native dimensions, then decode at the
///   smallest power-of-two factor that brings both within `b`.
/// - `ScaleFactor(f)`: decode directly at factor `f`, skipping the bounds
///   probe. This is the fast path for repeated decodes of same-shaped
///   frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SampleConfig {
    /// Largest allowed value for either output dimension.
    MaxBoundary(u32),
    /// Explicit power-of-two downsample factor.
    ScaleFactor(u32),
}

impl SampleConfig {
    /// Default scale factor balancing accuracy against per-frame cost.
    pub const DEFAULT_SCALE_FACTOR: u32 = 4;

    /// Default dimension boundary for boundary-mode decoding.
    pub const DEFAULT_MAX_BOUNDARY: u32 = 64;

    /// Create a boundary-mode config, rejecting zero boundaries.
    pub fn bounded(max_boundary: u32) -> Result<Self, ConfigError> {
        let config = Self::MaxBoundary(max_boundary);
        config.validate()?;
        Ok(config)
    }

    /// Create a factor-mode config, rejecting non-power-of-two factors.
    pub fn scaled(factor: u32) -> Result<Self, ConfigError> {
        let config = Self::ScaleFactor(factor);
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants of a directly-constructed config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            SampleConfig::MaxBoundary(0) => Err(ConfigError::ZeroBoundary),
            SampleConfig::MaxBoundary(_) => Ok(()),
            SampleConfig::ScaleFactor(f) if f.is_power_of_two() => Ok(()),
            SampleConfig::ScaleFactor(f) => Err(ConfigError::NonPowerOfTwoFactor(f)),
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self::ScaleFactor(Self::DEFAULT_SCALE_FACTOR)
    }
}
