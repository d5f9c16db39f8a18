//! Parallax motion engine for the galaxy view.
//!
//! Raw pointer and touch samples arrive at high, irregular frequency. The
//! engine records each sample as a *target* and, once per display frame,
//! moves a *current* position a fixed fraction of the way towards it. The
//! smoothed state is pushed to any number of subscribers after every tick.
//!
//! # Architecture
//!
//! ```text
//! Mouse ─┐                                   ┌──► subscriber
//!        ├──► PointerEvent ──► MotionEngine ─┼──► subscriber
//! Touch ─┘         │             │   ▲       └──► watch channel (MotionDriver)
//!                  │             ▼   │
//!            InputPolicy     FrameScheduler
//!         (viewport gating)  (one pending frame)
//! ```
//!
//! # Example
//!
//! ```
//! use galaxy_motion::{ManualScheduler, MotionConfig, MotionEngine, Viewport};
//!
//! let mut engine = MotionEngine::new(MotionConfig::default(), ManualScheduler::new());
//! let viewport = Viewport::new(1000.0, 500.0)?;
//!
//! engine.start();
//! engine.report_raw_input(100.0, 50.0, viewport);
//! engine.advance();
//!
//! assert!(engine.state().current.x > 0.0);
//! # Ok::<(), galaxy_motion::MotionError>(())
//! ```

mod config;
mod driver;
mod engine;
mod error;
mod input;
mod scheduler;
mod state;
mod subscribers;

pub use config::MotionConfig;
pub use driver::{MotionCommand, MotionDriver};
pub use engine::MotionEngine;
pub use error::MotionError;
pub use input::{InputPolicy, PointerEvent};
pub use scheduler::{FrameId, FrameScheduler, ManualScheduler};
pub use state::{MotionState, Viewport};
pub use subscribers::Subscription;

/// Default smoothing constant `k` applied per tick.
pub const DEFAULT_SMOOTHING: f64 = 0.1;

/// Viewport width (pixels) at or below which pointer parallax is disabled.
pub const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;

/// Default frame cadence for hosts without a display-driven frame callback.
pub const DEFAULT_FRAME_RATE_HZ: u32 = 60;
