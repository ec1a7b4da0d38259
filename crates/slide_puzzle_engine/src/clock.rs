//! Per-session countdown.
//!
//! The clock does not own a timer. It asks a [`TickScheduler`] for a
//! recurring one-second schedule and keeps the returned [`TickHandle`] so
//! the schedule can be cancelled on every transition. The host feeds the
//! resulting ticks back through the session owner, tagged with the
//! [`ClockEpoch`] they were scheduled under; ticks from any earlier epoch
//! are discarded.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::{debug, info, instrument, trace};

/// Identifies one run of the clock. Bumped on every `start`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[display("epoch#{}", _0)]
pub struct ClockEpoch(u64);

impl ClockEpoch {
    /// Raw epoch value.
    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// A live recurring schedule.
pub trait TickHandle: Send {
    /// Stops further ticks. Calling it more than once has no effect.
    fn cancel(&mut self);
}

/// Creates recurring one-second schedules.
pub trait TickScheduler: Send {
    /// Begins delivering ticks tagged with `epoch` every second until the
    /// returned handle is cancelled.
    fn schedule(&mut self, epoch: ClockEpoch) -> Box<dyn TickHandle>;
}

/// Clock state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClockState {
    /// No schedule is live.
    Stopped,
    /// A schedule is live and ticks are being counted.
    Running,
}

/// What a tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to a cancelled schedule or the clock is stopped.
    Stale,
    /// One second elapsed; carries the time remaining.
    Ticked(u32),
    /// Time ran out on this tick. The clock has already stopped.
    Expired,
}

/// Countdown owned by the level progression.
pub struct GameClock {
    state: ClockState,
    epoch: ClockEpoch,
    handle: Option<Box<dyn TickHandle>>,
    scheduler: Box<dyn TickScheduler>,
}

impl std::fmt::Debug for GameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameClock")
            .field("state", &self.state)
            .field("epoch", &self.epoch)
            .field("scheduled", &self.handle.is_some())
            .finish()
    }
}

impl GameClock {
    /// Creates a stopped clock.
    pub fn new(scheduler: Box<dyn TickScheduler>) -> Self {
        Self {
            state: ClockState::Stopped,
            epoch: ClockEpoch(0),
            handle: None,
            scheduler,
        }
    }

    /// Starts a fresh countdown of `limit` seconds, writing it to `remaining`.
    ///
    /// Any previous schedule is cancelled first.
    #[instrument(skip(self, remaining), fields(previous = %self.epoch))]
    pub fn start(&mut self, limit: u32, remaining: &mut u32) -> ClockEpoch {
        self.stop();
        *remaining = limit;
        self.epoch = self.epoch.next();
        self.handle = Some(self.scheduler.schedule(self.epoch));
        self.state = ClockState::Running;
        info!(epoch = %self.epoch, limit, "Clock started");
        self.epoch
    }

    /// Cancels the live schedule, if any.
    #[instrument(skip(self), fields(epoch = %self.epoch))]
    pub fn stop(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.cancel();
            debug!("Clock schedule cancelled");
        }
        self.state = ClockState::Stopped;
    }

    /// Counts one second against `remaining`.
    ///
    /// Ticks from another epoch, or arriving while stopped, are ignored.
    pub fn tick(&mut self, epoch: ClockEpoch, remaining: &mut u32) -> TickOutcome {
        if self.state != ClockState::Running || epoch != self.epoch {
            trace!(%epoch, current = %self.epoch, "Discarding stale tick");
            return TickOutcome::Stale;
        }

        *remaining = remaining.saturating_sub(1);
        if *remaining == 0 {
            self.stop();
            info!(epoch = %self.epoch, "Clock expired");
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked(*remaining)
        }
    }

    /// Current state.
    pub fn state(&self) -> ClockState {
        self.state
    }

    /// True while a schedule is live.
    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    /// Epoch of the most recent start.
    pub fn epoch(&self) -> ClockEpoch {
        self.epoch
    }
}

impl Drop for GameClock {
    fn drop(&mut self) {
        self.stop();
    }
}

// ─────────────────────────────────────────────────────────────
//  Manual scheduler
// ─────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ManualShared {
    active: AtomicU64,
    scheduled: AtomicU32,
    cancelled: AtomicU32,
}

/// Scheduler that never fires on its own.
///
/// Hosts that advance time themselves (tests, replays, turn-based
/// frontends) use it and call the owner's `tick` with
/// [`ManualTickScheduler::active_epoch`]. Clones share state, so a test
/// can keep one for inspection after handing another to the engine.
#[derive(Debug, Clone, Default)]
pub struct ManualTickScheduler {
    shared: Arc<ManualShared>,
}

impl ManualTickScheduler {
    /// Creates a scheduler with no live schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Epoch of the live schedule, if one exists.
    pub fn active_epoch(&self) -> Option<ClockEpoch> {
        match self.shared.active.load(Ordering::SeqCst) {
            0 => None,
            epoch => Some(ClockEpoch(epoch)),
        }
    }

    /// Number of schedules ever created.
    pub fn schedules_created(&self) -> u32 {
        self.shared.scheduled.load(Ordering::SeqCst)
    }

    /// Number of schedules cancelled.
    pub fn schedules_cancelled(&self) -> u32 {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Schedules created but not yet cancelled.
    pub fn live_schedules(&self) -> u32 {
        self.schedules_created() - self.schedules_cancelled()
    }
}

impl TickScheduler for ManualTickScheduler {
    fn schedule(&mut self, epoch: ClockEpoch) -> Box<dyn TickHandle> {
        self.shared.active.store(epoch.value(), Ordering::SeqCst);
        self.shared.scheduled.fetch_add(1, Ordering::SeqCst);
        Box::new(ManualTickHandle {
            epoch,
            shared: Arc::clone(&self.shared),
            cancelled: false,
        })
    }
}

struct ManualTickHandle {
    epoch: ClockEpoch,
    shared: Arc<ManualShared>,
    cancelled: bool,
}

impl TickHandle for ManualTickHandle {
    fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        let _ = self.shared.active.compare_exchange(
            self.epoch.value(),
            0,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.shared.cancelled.fetch_add(1, Ordering::SeqCst);
    }
}
