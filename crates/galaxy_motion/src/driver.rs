//! Async host for the motion engine.
//!
//! A single tokio task owns the [`MotionEngine`]. Other tasks talk to it
//! through [`MotionCommand`]s and read the smoothed state from a watch
//! channel, so every mutation of the state happens on the owning task.
//!
//! Dropping the [`MotionDriver`] closes the command channel, which ends the
//! task the same way [`MotionDriver::shutdown`] does.

use crate::{
    ManualScheduler, MotionConfig, MotionEngine, MotionError, MotionState, PointerEvent, Viewport,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Message sent to the engine task.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionCommand {
    /// Attach listeners for the viewport, starting the loop if allowed.
    Init(Viewport),
    /// Raw sample already in viewport coordinates.
    Input { x: f64, y: f64, viewport: Viewport },
    /// Host event routed through the listener policy.
    Event(PointerEvent),
    Start,
    Stop,
    /// Dispose the engine and end the task.
    Shutdown,
}

/// Handle to a running engine task.
#[derive(Debug)]
pub struct MotionDriver {
    commands: mpsc::UnboundedSender<MotionCommand>,
    state: watch::Receiver<MotionState>,
    task: JoinHandle<()>,
}

impl MotionDriver {
    /// Validate `config` and spawn the engine task on the current runtime.
    pub fn spawn(config: MotionConfig) -> Result<Self, MotionError> {
        config.validate()?;

        let (commands, rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(MotionState::default());
        let task = tokio::spawn(run(config, rx, state_tx));

        info!(
            smoothing = config.smoothing,
            frame_rate_hz = config.frame_rate_hz,
            "motion driver started"
        );

        Ok(Self {
            commands,
            state,
            task,
        })
    }

    /// Queue a command for the engine task.
    pub fn send(&self, command: MotionCommand) -> Result<(), MotionError> {
        self.commands
            .send(command)
            .map_err(|_| MotionError::DriverClosed)
    }

    pub fn init(&self, viewport: Viewport) -> Result<(), MotionError> {
        self.send(MotionCommand::Init(viewport))
    }

    pub fn report_raw_input(&self, x: f64, y: f64, viewport: Viewport) -> Result<(), MotionError> {
        self.send(MotionCommand::Input { x, y, viewport })
    }

    pub fn handle_event(&self, event: PointerEvent) -> Result<(), MotionError> {
        self.send(MotionCommand::Event(event))
    }

    pub fn start(&self) -> Result<(), MotionError> {
        self.send(MotionCommand::Start)
    }

    pub fn stop(&self) -> Result<(), MotionError> {
        self.send(MotionCommand::Stop)
    }

    /// Latest published state.
    pub fn state(&self) -> MotionState {
        *self.state.borrow()
    }

    /// A receiver that is notified after every tick.
    pub fn watch(&self) -> watch::Receiver<MotionState> {
        self.state.clone()
    }

    /// Dispose the engine and wait for the task to finish.
    pub async fn shutdown(self) {
        // The task may already be gone; joining below reports how it ended.
        let _ = self.commands.send(MotionCommand::Shutdown);
        if let Err(e) = self.task.await {
            warn!(error = %e, "motion task ended abnormally");
        }
    }
}

async fn run(
    config: MotionConfig,
    mut commands: mpsc::UnboundedReceiver<MotionCommand>,
    state_tx: watch::Sender<MotionState>,
) {
    let state_tx = Arc::new(state_tx);
    let mut engine = MotionEngine::new(config, ManualScheduler::new());

    let publisher = Arc::clone(&state_tx);
    let _publish = engine.subscribe(move |state| {
        publisher.send_replace(*state);
    });

    let mut frames = interval(config.frame_period());
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                None | Some(MotionCommand::Shutdown) => break,
                Some(command) => apply(&mut engine, command, &state_tx),
            },
            _ = frames.tick() => {
                engine.advance();
            }
        }
    }

    engine.dispose();
    state_tx.send_replace(engine.state());
    debug!(ticks = engine.tick_count(), "motion task finished");
}

fn apply(
    engine: &mut MotionEngine<ManualScheduler>,
    command: MotionCommand,
    state_tx: &watch::Sender<MotionState>,
) {
    match command {
        MotionCommand::Init(viewport) => engine.init(viewport),
        MotionCommand::Input { x, y, viewport } => engine.report_raw_input(x, y, viewport),
        MotionCommand::Event(event) => {
            engine.handle_event(&event);
        }
        MotionCommand::Start => engine.start(),
        MotionCommand::Stop => {
            engine.stop();
            // Stopping does not tick, so publish the inactive state here
            state_tx.send_replace(engine.state());
        }
        MotionCommand::Shutdown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_math::Vec2;
    use std::time::Duration;
    use tokio::time::sleep;

    fn viewport() -> Viewport {
        Viewport::new(1000.0, 500.0).unwrap()
    }

    #[tokio::test]
    async fn spawn_rejects_invalid_config() {
        let config = MotionConfig::default().with_smoothing(1.5);
        let err = MotionDriver::spawn(config).unwrap_err();
        assert_eq!(err, MotionError::InvalidSmoothing(1.5));
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_are_published_on_the_watch_channel() {
        let driver = MotionDriver::spawn(MotionConfig::default()).unwrap();
        let mut rx = driver.watch();

        driver.report_raw_input(100.0, 50.0, viewport()).unwrap();
        driver.start().unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().active);

        sleep(Duration::from_millis(500)).await;
        let state = driver.state();
        assert!(state.active);
        assert_eq!(state.target, Vec2::new(100.0, 50.0));
        assert!(state.current.x > 10.0 && state.current.x < 100.0);

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_published_state() {
        let driver = MotionDriver::spawn(MotionConfig::default()).unwrap();
        driver.report_raw_input(400.0, 300.0, viewport()).unwrap();
        driver.start().unwrap();
        sleep(Duration::from_millis(200)).await;

        driver.stop().unwrap();
        sleep(Duration::from_millis(50)).await;
        let frozen = driver.state();
        assert!(!frozen.active);

        sleep(Duration::from_secs(1)).await;
        assert_eq!(driver.state(), frozen);

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn init_and_events_flow_through_the_task() {
        let driver = MotionDriver::spawn(MotionConfig::default()).unwrap();
        driver
            .init(Viewport::new(1280.0, 720.0).unwrap())
            .unwrap();
        driver
            .handle_event(PointerEvent::mouse_move(1280.0, 0.0))
            .unwrap();
        sleep(Duration::from_millis(100)).await;

        let state = driver.state();
        assert!(state.active);
        assert_eq!(state.normalized, Vec2::new(1.0, -1.0));

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn narrow_viewport_never_starts_the_loop() {
        let driver = MotionDriver::spawn(MotionConfig::default()).unwrap();
        driver.init(Viewport::new(390.0, 844.0).unwrap()).unwrap();
        driver
            .handle_event(PointerEvent::mouse_move(100.0, 100.0))
            .unwrap();
        sleep(Duration::from_millis(200)).await;

        let state = driver.state();
        assert!(!state.active);
        assert_eq!(state.current, Vec2::ZERO);

        driver.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_publishes_inactive_state() {
        let driver = MotionDriver::spawn(MotionConfig::default()).unwrap();
        let rx = driver.watch();
        driver.start().unwrap();
        sleep(Duration::from_millis(50)).await;

        driver.shutdown().await;
        assert!(!rx.borrow().active);
    }
}
