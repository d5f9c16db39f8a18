//! Motion engine configuration.

use crate::{MotionError, DEFAULT_FRAME_RATE_HZ, DEFAULT_MOBILE_BREAKPOINT, DEFAULT_SMOOTHING};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for the parallax engine.
///
/// Loaded from the `motion:` section of the galaxy config file; any field
/// left out takes its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of the remaining distance covered per tick, in (0, 1).
    ///
    /// Smaller values give a longer, smoother lag; larger values track the
    /// pointer more tightly.
    pub smoothing: f64,

    /// Viewports this wide or narrower get no pointer parallax.
    pub mobile_breakpoint: f64,

    /// Frame cadence used by [`MotionDriver`](crate::MotionDriver).
    pub frame_rate_hz: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            smoothing: DEFAULT_SMOOTHING,
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            frame_rate_hz: DEFAULT_FRAME_RATE_HZ,
        }
    }
}

impl MotionConfig {
    /// Config with a custom smoothing constant.
    pub fn with_smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<(), MotionError> {
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(MotionError::InvalidSmoothing(self.smoothing));
        }
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            return Err(MotionError::InvalidBreakpoint(self.mobile_breakpoint));
        }
        if self.frame_rate_hz == 0 {
            return Err(MotionError::InvalidFrameRate);
        }
        Ok(())
    }

    /// Interval between frames at the configured rate.
    pub fn frame_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.frame_rate_hz.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MotionConfig::default();
        assert_eq!(config.smoothing, 0.1);
        assert_eq!(config.mobile_breakpoint, 768.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn smoothing_must_be_open_unit_interval() {
        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            let config = MotionConfig::default().with_smoothing(bad);
            assert!(
                matches!(config.validate(), Err(MotionError::InvalidSmoothing(_))),
                "smoothing {bad} should be rejected"
            );
        }
        assert!(MotionConfig::default()
            .with_smoothing(0.5)
            .validate()
            .is_ok());
    }

    #[test]
    fn zero_frame_rate_rejected() {
        let config = MotionConfig {
            frame_rate_hz: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(MotionError::InvalidFrameRate));
    }

    #[test]
    fn frame_period_matches_rate() {
        let config = MotionConfig {
            frame_rate_hz: 50,
            ..Default::default()
        };
        assert_eq!(config.frame_period(), Duration::from_millis(20));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: MotionConfig = serde_json::from_str(r#"{"smoothing": 0.25}"#).unwrap();
        assert_eq!(config.smoothing, 0.25);
        assert_eq!(config.frame_rate_hz, DEFAULT_FRAME_RATE_HZ);
    }
}
