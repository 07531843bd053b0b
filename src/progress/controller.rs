//! Timer-driven loading progress controller
//!
//! The controller owns its state behind an `Arc<Mutex<_>>`. Timer tasks hold a
//! `Weak` reference plus the generation they were spawned for, so a timer that
//! wakes after it was cancelled, after teardown or after the controller was
//! dropped exits without touching state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::config::ConfigError;
use crate::progress::config::ProgressConfig;
use crate::progress::status::{LoadingStatus, ProgressSnapshot, MAX_PROGRESS};

/// Invoked once when the controller enters `Completed`
pub type CompletionCallback = Box<dyn FnOnce() + Send + 'static>;

#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("progress controller must be created inside a tokio runtime")]
    NoRuntime,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result of evaluating a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickOutcome {
    Advanced,
    Paused,
    ArmCompletion,
}

struct ControllerState {
    config: ProgressConfig,
    progress: u8,
    status: LoadingStatus,
    threshold: u8,
    tick_timer: Option<JoinHandle<()>>,
    tick_generation: u64,
    completion_timer: Option<JoinHandle<()>>,
    completion_armed: bool,
    torn_down: bool,
    on_completed: Option<CompletionCallback>,
    updates: watch::Sender<ProgressSnapshot>,
}

impl ControllerState {
    fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            progress: self.progress,
            status: self.status,
            threshold: self.threshold,
            is_loaded: self.status == LoadingStatus::Completed,
        }
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }

    fn cancel_tick(&mut self) {
        if let Some(handle) = self.tick_timer.take() {
            handle.abort();
        }
        self.tick_generation = self.tick_generation.wrapping_add(1);
    }

    fn cancel_completion(&mut self) {
        if let Some(handle) = self.completion_timer.take() {
            handle.abort();
        }
    }

    fn evaluate_tick(&mut self) -> TickOutcome {
        let limit = self.threshold.min(MAX_PROGRESS);
        if self.progress >= limit {
            return self.pause_at_threshold();
        }

        self.progress = self
            .progress
            .saturating_add(self.config.increment_step)
            .min(MAX_PROGRESS);
        debug!(progress = self.progress, threshold = self.threshold, "Progress tick");

        if self.progress >= limit {
            self.pause_at_threshold()
        } else {
            self.publish();
            TickOutcome::Advanced
        }
    }

    // Called from inside the tick task, so the handle is detached rather than aborted.
    fn pause_at_threshold(&mut self) -> TickOutcome {
        self.tick_timer = None;
        self.tick_generation = self.tick_generation.wrapping_add(1);
        self.status = LoadingStatus::Paused;
        self.publish();
        info!(progress = self.progress, threshold = self.threshold, "Progress reached threshold");

        if self.claim_completion() {
            TickOutcome::ArmCompletion
        } else {
            TickOutcome::Paused
        }
    }

    /// Mark the completion timer as armed. Returns false when auto-completion
    /// is off or the timer was already armed once.
    fn claim_completion(&mut self) -> bool {
        if !self.config.auto_complete || self.completion_armed {
            return false;
        }
        self.completion_armed = true;
        true
    }

    fn arm_completion(&mut self, runtime: &Handle, state: Weak<Mutex<ControllerState>>) {
        let delay = self.config.completion_delay();
        debug!(delay_ms = delay.as_millis() as u64, "Arming completion timer");
        self.completion_timer = Some(runtime.spawn(run_completion_timer(state, delay)));
    }

    /// Move to `Completed` and hand back the callback for the caller to run
    /// once the lock is released.
    fn complete(&mut self, reason: &str) -> Option<CompletionCallback> {
        if self.torn_down || self.status.is_terminal() {
            return None;
        }

        self.cancel_tick();
        self.cancel_completion();
        self.progress = MAX_PROGRESS;
        self.status = LoadingStatus::Completed;
        self.publish();
        info!(reason, "Loading completed");

        self.on_completed.take()
    }
}

fn lock_state(state: &Mutex<ControllerState>) -> MutexGuard<'_, ControllerState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Simulated loading progress with a periodic tick timer and a one-shot
/// completion timer. Dropping the controller cancels both timers.
pub struct ProgressController {
    state: Arc<Mutex<ControllerState>>,
    runtime: Handle,
}

impl ProgressController {
    /// Create a controller. Must be called from within a tokio runtime.
    pub fn new(config: ProgressConfig) -> Result<Self, ProgressError> {
        Self::build(config, None)
    }

    /// Create a controller that runs `on_completed` when loading finishes
    pub fn with_completion_callback<F>(config: ProgressConfig, on_completed: F) -> Result<Self, ProgressError>
    where
        F: FnOnce() + Send + 'static,
    {
        Self::build(config, Some(Box::new(on_completed)))
    }

    fn build(config: ProgressConfig, on_completed: Option<CompletionCallback>) -> Result<Self, ProgressError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| ProgressError::NoRuntime)?;

        let threshold = config.initial_threshold;
        let auto_start = config.auto_start;
        let (updates, _) = watch::channel(ProgressSnapshot::initial(threshold));

        let controller = Self {
            state: Arc::new(Mutex::new(ControllerState {
                config,
                progress: 0,
                status: LoadingStatus::Idle,
                threshold,
                tick_timer: None,
                tick_generation: 0,
                completion_timer: None,
                completion_armed: false,
                torn_down: false,
                on_completed,
                updates,
            })),
            runtime,
        };

        if auto_start {
            controller.start();
        }

        Ok(controller)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        lock_state(&self.state)
    }

    /// Begin ticking from `Idle` or `Paused`. Ignored in any other state.
    pub fn start(&self) {
        let mut state = self.lock();
        if state.torn_down || !state.status.can_start() {
            debug!(status = %state.status, "Ignoring start");
            return;
        }
        self.begin_ticking(&mut state);
    }

    /// Stop ticking. Only has an effect while the tick timer is running.
    pub fn pause(&self) {
        let mut state = self.lock();
        if state.tick_timer.is_none() {
            debug!(status = %state.status, "Ignoring pause, no tick timer running");
            return;
        }

        state.cancel_tick();
        state.status = LoadingStatus::Paused;
        state.publish();
        info!(progress = state.progress, "Loading paused");
    }

    /// Resume ticking after a pause
    pub fn resume(&self) {
        let mut state = self.lock();
        if state.torn_down || state.status != LoadingStatus::Paused {
            debug!(status = %state.status, "Ignoring resume");
            return;
        }
        self.begin_ticking(&mut state);
    }

    /// Complete immediately. Ignored when auto-completion is enabled.
    pub fn done(&self) {
        let callback = {
            let mut state = self.lock();
            if state.config.auto_complete {
                debug!("Ignoring done, completion is automatic");
                return;
            }
            state.complete("done signalled")
        };

        if let Some(callback) = callback {
            callback();
        }
    }

    /// Change the threshold. While loading it takes effect on the next tick.
    /// While paused, a threshold at or below the current progress arms the
    /// completion timer if it has never been armed.
    pub fn set_threshold(&self, threshold: u8) {
        let mut state = self.lock();
        if state.torn_down {
            return;
        }
        state.threshold = threshold;
        state.publish();
        debug!(threshold, "Threshold updated");

        let reached = state.progress >= threshold.min(MAX_PROGRESS);
        if state.status == LoadingStatus::Paused && reached && state.claim_completion() {
            state.arm_completion(&self.runtime, Arc::downgrade(&self.state));
        }
    }

    pub fn progress(&self) -> u8 {
        self.lock().progress
    }

    pub fn loading_status(&self) -> LoadingStatus {
        self.lock().status
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().status == LoadingStatus::Completed
    }

    pub fn threshold(&self) -> u8 {
        self.lock().threshold
    }

    pub fn config(&self) -> ProgressConfig {
        self.lock().config.clone()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.lock().snapshot()
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.lock().updates.subscribe()
    }

    /// Cancel both timers and ignore all further commands
    pub fn shutdown(&self) {
        let mut state = self.lock();
        if state.torn_down {
            return;
        }
        state.torn_down = true;
        state.cancel_tick();
        state.cancel_completion();
        debug!(status = %state.status, "Progress controller torn down");
    }

    fn begin_ticking(&self, state: &mut ControllerState) {
        state.cancel_tick();
        let generation = state.tick_generation;
        let period = state.config.tick_interval();

        state.status = LoadingStatus::Loading;
        state.tick_timer = Some(self.runtime.spawn(run_tick_timer(
            Arc::downgrade(&self.state),
            generation,
            Instant::now() + period,
            period,
        )));
        state.publish();
        info!(progress = state.progress, threshold = state.threshold, "Loading started");
    }
}

impl Drop for ProgressController {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for ProgressController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressController")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

async fn run_tick_timer(state: Weak<Mutex<ControllerState>>, generation: u64, first_tick: Instant, period: Duration) {
    let mut ticker = tokio::time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let Some(shared) = state.upgrade() else {
            break;
        };
        if !on_tick(&shared, generation) {
            break;
        }
    }
}

/// Evaluate one tick. Returns whether the tick timer should keep running.
fn on_tick(state: &Arc<Mutex<ControllerState>>, generation: u64) -> bool {
    let mut guard = lock_state(state);
    if guard.torn_down || guard.tick_generation != generation {
        return false;
    }

    match guard.evaluate_tick() {
        TickOutcome::Advanced => true,
        TickOutcome::Paused => false,
        TickOutcome::ArmCompletion => {
            guard.arm_completion(&Handle::current(), Arc::downgrade(state));
            false
        }
    }
}

// Once armed this fires unconditionally; progress and threshold are not re-checked.
async fn run_completion_timer(state: Weak<Mutex<ControllerState>>, delay: Duration) {
    tokio::time::sleep(delay).await;
    let Some(shared) = state.upgrade() else {
        return;
    };

    let callback = {
        let mut guard = lock_state(&shared);
        guard.completion_timer = None;
        guard.complete("completion delay elapsed")
    };

    if let Some(callback) = callback {
        callback();
    }
}
