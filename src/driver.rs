//! Async host for the engine.
//!
//! One tokio task owns the [`LevelProgression`] and applies commands in
//! arrival order, so clock ticks and player input are never interleaved.
//! Countdown schedules are tokio interval tasks that post
//! [`EngineCommand::Tick`] into the same queue.

use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use slide_puzzle_engine::{
    ClockEpoch, EngineOptions, HostNotifier, Level, LevelProgression, StateSnapshot, TickHandle,
    TickScheduler,
};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument, trace};

/// Countdown resolution.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Commands processed by the engine task.
#[derive(Debug)]
pub enum EngineCommand {
    /// `start_game(level, reset_timer)`.
    Start {
        /// Level to play.
        level: Level,
        /// Restart the countdown.
        reset_timer: bool,
        /// Receives the state after the start.
        reply: oneshot::Sender<StateSnapshot>,
    },
    /// `move_tile(index)`.
    Move {
        /// Cell index of the tile to slide.
        index: usize,
        /// Receives the outcome.
        reply: oneshot::Sender<MoveReply>,
    },
    /// One countdown tick from the schedule tagged `epoch`.
    Tick(ClockEpoch),
    /// `state()`.
    Snapshot {
        /// Receives the current state.
        reply: oneshot::Sender<StateSnapshot>,
    },
}

/// Result of a move request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveReply {
    /// Whether the tile moved.
    pub moved: bool,
    /// State after the move.
    pub state: StateSnapshot,
}

/// The engine task is no longer running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Engine task has stopped")]
pub struct EngineStopped;

// ─────────────────────────────────────────────────────────────
//  Tokio tick scheduler
// ─────────────────────────────────────────────────────────────

/// Schedules countdown ticks as tokio interval tasks.
///
/// Holds only a weak sender so the engine queue closes once every
/// [`EngineHandle`] is dropped.
#[derive(Debug, Clone)]
pub struct TokioTickScheduler {
    commands: mpsc::WeakUnboundedSender<EngineCommand>,
    period: Duration,
}

impl TokioTickScheduler {
    /// Creates a scheduler posting into `commands` every `period`.
    pub fn new(commands: &mpsc::UnboundedSender<EngineCommand>, period: Duration) -> Self {
        Self {
            commands: commands.downgrade(),
            period,
        }
    }
}

impl TickScheduler for TokioTickScheduler {
    #[instrument(skip(self))]
    fn schedule(&mut self, epoch: ClockEpoch) -> Box<dyn TickHandle> {
        let commands = self.commands.clone();
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let Some(sender) = commands.upgrade() else {
                    break;
                };
                if sender.send(EngineCommand::Tick(epoch)).is_err() {
                    break;
                }
                trace!(%epoch, "Tick posted");
            }
        });
        debug!(%epoch, "Tick task spawned");
        Box::new(TokioTickHandle { task: Some(task) })
    }
}

/// Aborts the interval task on cancel.
struct TokioTickHandle {
    task: Option<JoinHandle<()>>,
}

impl TickHandle for TokioTickHandle {
    fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ─────────────────────────────────────────────────────────────
//  Engine task and handle
// ─────────────────────────────────────────────────────────────

/// Cloneable handle for talking to the engine task.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<EngineCommand>,
}

impl EngineHandle {
    /// Starts or reshuffles a level.
    #[instrument(skip(self))]
    pub async fn start_game(
        &self,
        level: Level,
        reset_timer: bool,
    ) -> Result<StateSnapshot, EngineStopped> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Start {
            level,
            reset_timer,
            reply,
        })?;
        rx.await.map_err(|_| EngineStopped)
    }

    /// Slides the tile at `index`.
    #[instrument(skip(self))]
    pub async fn move_tile(&self, index: usize) -> Result<MoveReply, EngineStopped> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Move { index, reply })?;
        rx.await.map_err(|_| EngineStopped)
    }

    /// Current engine state.
    pub async fn state(&self) -> Result<StateSnapshot, EngineStopped> {
        let (reply, rx) = oneshot::channel();
        self.send(EngineCommand::Snapshot { reply })?;
        rx.await.map_err(|_| EngineStopped)
    }

    fn send(&self, command: EngineCommand) -> Result<(), EngineStopped> {
        self.commands.send(command).map_err(|_| EngineStopped)
    }
}

/// Spawns the engine task with the default one-second countdown.
pub fn spawn_engine(
    host: Box<dyn HostNotifier>,
    options: EngineOptions,
) -> (EngineHandle, JoinHandle<()>) {
    spawn_engine_with_period(host, options, TICK_PERIOD)
}

/// Spawns the engine task with a custom tick period.
#[instrument(skip(host))]
pub fn spawn_engine_with_period(
    host: Box<dyn HostNotifier>,
    options: EngineOptions,
    period: Duration,
) -> (EngineHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let scheduler = TokioTickScheduler::new(&tx, period);
    let engine = LevelProgression::new(Box::new(scheduler), host, options);
    let task = tokio::spawn(run_engine(engine, rx));
    info!("Engine task spawned");
    (EngineHandle { commands: tx }, task)
}

async fn run_engine(mut engine: LevelProgression, mut commands: mpsc::UnboundedReceiver<EngineCommand>) {
    while let Some(command) = commands.recv().await {
        match command {
            EngineCommand::Start {
                level,
                reset_timer,
                reply,
            } => {
                engine.start_game(level, reset_timer);
                let _ = reply.send(engine.state());
            }
            EngineCommand::Move { index, reply } => {
                let moved = engine.move_tile(index);
                let _ = reply.send(MoveReply::new(moved, engine.state()));
            }
            EngineCommand::Tick(epoch) => {
                engine.tick(epoch);
            }
            EngineCommand::Snapshot { reply } => {
                let _ = reply.send(engine.state());
            }
        }
    }
    info!("All engine handles dropped, stopping engine task");
}
