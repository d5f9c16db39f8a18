//! Raw input events and platform gating.

use crate::{MotionConfig, Viewport};
use galaxy_math::Vec2;
use serde::{Deserialize, Serialize};

/// Raw input event from the host.
///
/// Platform-specific pointer and touch events are converted to this type
/// before reaching the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    /// Mouse moved to `pos` (client coordinates).
    MouseMove { pos: Vec2 },

    /// Touch moved. Only the first touch point drives the parallax.
    TouchMove { touches: Vec<Vec2> },

    /// Host viewport resized.
    Resized { width: f64, height: f64 },
}

impl PointerEvent {
    /// Create a mouse move event.
    pub fn mouse_move(x: f64, y: f64) -> Self {
        PointerEvent::MouseMove {
            pos: Vec2::new(x, y),
        }
    }

    /// Create a single-finger touch move event.
    pub fn touch_move(x: f64, y: f64) -> Self {
        PointerEvent::TouchMove {
            touches: vec![Vec2::new(x, y)],
        }
    }

    /// Check if this is a mouse event.
    pub fn is_pointer(&self) -> bool {
        matches!(self, PointerEvent::MouseMove { .. })
    }

    /// Check if this is a touch event.
    pub fn is_touch(&self) -> bool {
        matches!(self, PointerEvent::TouchMove { .. })
    }

    /// The sample position this event carries, if any.
    pub fn sample(&self) -> Option<Vec2> {
        match self {
            PointerEvent::MouseMove { pos } => Some(*pos),
            PointerEvent::TouchMove { touches } => touches.first().copied(),
            PointerEvent::Resized { .. } => None,
        }
    }
}

/// Which input sources are listened to, and whether the frame loop runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputPolicy {
    /// Mouse-move sampling.
    pub pointer: bool,
    /// Touch-move sampling.
    pub touch: bool,
    /// Whether the engine should be started at all.
    pub engine: bool,
}

impl InputPolicy {
    /// Nothing attached.
    pub const DETACHED: InputPolicy = InputPolicy {
        pointer: false,
        touch: false,
        engine: false,
    };

    /// Gate input sources on the viewport.
    ///
    /// Narrow viewports (`width <= mobile_breakpoint`) get neither pointer
    /// sampling nor the frame loop. Touch sampling stays enabled everywhere.
    pub fn for_viewport(viewport: Viewport, config: &MotionConfig) -> Self {
        let narrow = viewport.width() <= config.mobile_breakpoint;
        Self {
            pointer: !narrow,
            touch: true,
            engine: !narrow,
        }
    }

    /// Whether this policy accepts the given event.
    pub fn accepts(&self, event: &PointerEvent) -> bool {
        match event {
            PointerEvent::MouseMove { .. } => self.pointer,
            PointerEvent::TouchMove { .. } => self.touch,
            PointerEvent::Resized { .. } => self.pointer || self.touch,
        }
    }
}
