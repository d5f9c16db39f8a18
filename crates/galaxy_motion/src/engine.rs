//! The parallax motion engine.
//!
//! Input handlers write the target; the tick moves the current position
//! towards it. Both run on the thread that owns the engine, so the state is
//! never shared mutably.

use crate::subscribers::Subscribers;
use crate::{
    FrameId, FrameScheduler, InputPolicy, ManualScheduler, MotionConfig, MotionState,
    PointerEvent, Subscription, Viewport,
};
use galaxy_math::{lerp_vec2, Vec2};
use tracing::{debug, trace, warn};

/// Smooths raw pointer samples into a stable, animated position.
///
/// # Lifecycle
///
/// ```text
/// new ──► init(viewport) ──► start ⇄ stop ──► dispose
///              │                 ▲
///              └─ policy.engine ─┘
/// ```
///
/// At most one frame is pending at any time. `stop()` revokes it, so no
/// tick runs after `stop()` returns.
#[derive(Debug)]
pub struct MotionEngine<S: FrameScheduler> {
    config: MotionConfig,
    scheduler: S,
    state: MotionState,
    pending_frame: Option<FrameId>,
    viewport: Option<Viewport>,
    listeners: InputPolicy,
    subscribers: Subscribers,
    ticks: u64,
}

impl<S: FrameScheduler> MotionEngine<S> {
    /// Create an idle engine with zeroed state.
    ///
    /// `config` is trusted; validate it with [`MotionConfig::validate`]
    /// where it comes from outside.
    pub fn new(config: MotionConfig, scheduler: S) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid motion config");
        Self {
            config,
            scheduler,
            state: MotionState::default(),
            pending_frame: None,
            viewport: None,
            listeners: InputPolicy::DETACHED,
            subscribers: Subscribers::default(),
            ticks: 0,
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Current state snapshot.
    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Input sources currently attached.
    pub fn listeners(&self) -> InputPolicy {
        self.listeners
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The frame the engine is waiting on, if any.
    pub fn pending_frame(&self) -> Option<FrameId> {
        self.pending_frame
    }

    /// Number of ticks run since creation.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// Record a raw sample as the new target.
    ///
    /// The normalized position is updated immediately; `current` only
    /// changes on the next tick. Safe to call at any frequency.
    pub fn report_raw_input(&mut self, x: f64, y: f64, viewport: Viewport) {
        let target = Vec2::new(x, y);
        self.state.target = target;
        self.state.normalized = viewport.normalize(target);
    }

    /// Route a host event through the attached listeners.
    ///
    /// Returns `true` when the event produced a new target sample. Events
    /// from detached sources, non-finite samples and samples arriving before
    /// the viewport is known are dropped.
    pub fn handle_event(&mut self, event: &PointerEvent) -> bool {
        if !self.listeners.accepts(event) {
            trace!(?event, "input source detached, event dropped");
            return false;
        }

        if let PointerEvent::Resized { width, height } = *event {
            match Viewport::new(width, height) {
                Ok(viewport) => self.viewport = Some(viewport),
                Err(e) => warn!(error = %e, "ignoring resize"),
            }
            return false;
        }

        let Some(sample) = event.sample() else {
            return false;
        };
        if !sample.is_finite() {
            trace!(x = sample.x, y = sample.y, "non-finite sample dropped");
            return false;
        }
        let Some(viewport) = self.viewport else {
            trace!("no viewport yet, sample dropped");
            return false;
        };

        self.report_raw_input(sample.x, sample.y, viewport);
        true
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Attach listeners for `viewport` and start the loop where the platform
    /// policy allows it. Narrow viewports only get touch sampling.
    pub fn init(&mut self, viewport: Viewport) {
        let policy = InputPolicy::for_viewport(viewport, &self.config);
        self.viewport = Some(viewport);
        self.listeners = policy;
        debug!(
            width = viewport.width(),
            height = viewport.height(),
            pointer = policy.pointer,
            touch = policy.touch,
            engine = policy.engine,
            "motion engine initialised"
        );
        if policy.engine {
            self.start();
        }
    }

    /// Start the frame loop. No-op while already active.
    ///
    /// The first tick runs immediately and schedules the next frame.
    pub fn start(&mut self) {
        if self.state.active {
            return;
        }
        self.state.active = true;
        debug!("motion engine started");
        self.tick();
    }

    /// Stop the frame loop and revoke the pending frame. Idempotent.
    pub fn stop(&mut self) {
        if self.state.active {
            debug!(ticks = self.ticks, "motion engine stopped");
        }
        self.state.active = false;
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    /// Detach all listeners, stop the loop and drop every subscriber.
    pub fn dispose(&mut self) {
        self.stop();
        self.listeners = InputPolicy::DETACHED;
        self.subscribers.clear();
        debug!("motion engine disposed");
    }

    // =========================================================================
    // FRAME LOOP
    // =========================================================================

    /// Host callback for a scheduled frame.
    ///
    /// Runs a tick only if `id` is the frame currently pending. Cancelled or
    /// superseded frames are ignored. Returns whether a tick ran.
    pub fn on_frame(&mut self, id: FrameId) -> bool {
        if self.pending_frame != Some(id) {
            trace!(frame = id.0, "stale frame ignored");
            return false;
        }
        self.pending_frame = None;
        if !self.state.active {
            return false;
        }
        self.tick();
        true
    }

    /// Advance `current` one step towards `target`, publish, and reschedule
    /// while active.
    pub fn tick(&mut self) {
        self.state.current = lerp_vec2(self.state.current, self.state.target, self.config.smoothing);
        self.ticks += 1;

        self.subscribers.publish(&self.state);

        if self.state.active {
            self.schedule_next();
        }
    }

    fn schedule_next(&mut self) {
        if let Some(old) = self.pending_frame.take() {
            self.scheduler.cancel_frame(old);
        }
        self.pending_frame = Some(self.scheduler.request_frame());
    }

    // =========================================================================
    // SUBSCRIBERS
    // =========================================================================

    /// Register a callback invoked with the full state after every tick.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&MotionState) + Send + 'static,
    {
        self.subscribers.add(Box::new(callback))
    }
}

impl MotionEngine<ManualScheduler> {
    /// Fire every frame the scheduler has queued. Returns whether a tick ran.
    pub fn advance(&mut self) -> bool {
        let due = self.scheduler.take_pending();
        let mut ran = false;
        for id in due {
            ran |= self.on_frame(id);
        }
        ran
    }
}

impl<S: FrameScheduler> Drop for MotionEngine<S> {
    fn drop(&mut self) {
        if let Some(id) = self.pending_frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }
}
