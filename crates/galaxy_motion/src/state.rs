//! Motion state and viewport.

use crate::MotionError;
use galaxy_math::{clamp, normalize, Vec2};
use serde::{Deserialize, Serialize};

/// Snapshot of the parallax state, published after every tick.
///
/// `current` only ever moves towards `target`, a fixed fraction per tick.
/// `normalized` is always within `[-1, 1]` on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Smoothed position, the value consumers render with.
    pub current: Vec2,
    /// Most recent raw sample.
    pub target: Vec2,
    /// Raw sample mapped onto `[-1, 1]` relative to the viewport.
    pub normalized: Vec2,
    /// Whether the frame loop is scheduled.
    pub active: bool,
}

impl MotionState {
    /// Remaining distance between current and target.
    pub fn distance_to_target(&self) -> f64 {
        self.current.distance(self.target)
    }
}

/// Host viewport extents in pixels.
///
/// Only constructible through [`Viewport::new`], so the engine never sees
/// a zero or non-finite extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, MotionError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(MotionError::InvalidViewport { width, height })
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Map a point in this viewport onto `[-1, 1]` per axis, clamped.
    pub fn normalize(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            clamp(normalize(point.x, 0.0, self.width), -1.0, 1.0),
            clamp(normalize(point.y, 0.0, self.height), -1.0, 1.0),
        )
    }
}
