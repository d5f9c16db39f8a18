//! Motion engine errors.
//!
//! The engine itself has no recoverable error surface. These errors come
//! from validating inputs at the boundary (viewport, config) and from talking
//! to a driver task that has already shut down.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MotionError {
    /// Viewport extents must be finite and strictly positive.
    #[error("invalid viewport {width}x{height}: extents must be finite and positive")]
    InvalidViewport { width: f64, height: f64 },

    /// Smoothing constant outside the open interval (0, 1).
    #[error("smoothing factor {0} outside (0, 1)")]
    InvalidSmoothing(f64),

    /// Mobile breakpoint must be finite and non-negative.
    #[error("invalid mobile breakpoint {0}")]
    InvalidBreakpoint(f64),

    #[error("frame rate must be at least 1 Hz")]
    InvalidFrameRate,

    /// The driver task is gone; commands can no longer be delivered.
    #[error("motion driver has shut down")]
    DriverClosed,
}
