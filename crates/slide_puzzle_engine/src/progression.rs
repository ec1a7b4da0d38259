//! Level progression: the session state machine.
//!
//! `LevelProgression` owns the one [`GameSession`], the [`GameClock`] and
//! the shuffle RNG, and is the only writer of all three. Hosts serialize
//! `start_game`, `move_tile` and `tick` calls against it.
//!
//! ```text
//!   Idle ──start──▶ Playing ──solved──▶ Won ──(level < 3)──▶ Playing (next level)
//!                     │                  └──(level 3)──▶ game over
//!                     └──clock expires──▶ TimedOut ──start──▶ Playing
//! ```

use crate::clock::{ClockEpoch, GameClock, TickOutcome, TickScheduler};
use crate::host::HostNotifier;
use crate::invariants::debug_assert_invariants;
use crate::level::Level;
use crate::session::{GameSession, Message, Phase, StateSnapshot};
use crate::types::Board;
use crate::{EngineError, moves, score, shuffle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Tunables for a progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// Seed for board shuffles; `None` draws from the OS.
    pub seed: Option<u64>,
    /// Extra points added to level 3 when the whole run is completed.
    pub final_completion_bonus: u32,
    /// Clock ticks a per-move bonus message stays visible.
    pub bonus_message_ticks: u32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            seed: None,
            final_completion_bonus: 0,
            bonus_message_ticks: 1,
        }
    }
}

/// The engine's public contract.
pub struct LevelProgression {
    session: GameSession,
    clock: GameClock,
    rng: StdRng,
    host: Box<dyn HostNotifier>,
    options: EngineOptions,
}

impl std::fmt::Debug for LevelProgression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LevelProgression")
            .field("session", &self.session)
            .field("clock", &self.clock)
            .field("options", &self.options)
            .finish()
    }
}

impl LevelProgression {
    /// Creates an idle progression.
    #[instrument(skip(scheduler, host))]
    pub fn new(
        scheduler: Box<dyn TickScheduler>,
        host: Box<dyn HostNotifier>,
        options: EngineOptions,
    ) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            session: GameSession::new(),
            clock: GameClock::new(scheduler),
            rng,
            host,
            options,
        }
    }

    /// Starts (or reshuffles) a level.
    ///
    /// With `reset_timer` the countdown restarts from the level's limit.
    /// Without it the board is reshuffled and the running countdown is
    /// kept; if there is no running countdown for this level to keep, the
    /// call behaves as a full restart.
    #[instrument(skip(self), fields(current = %self.session.current_level))]
    pub fn start_game(&mut self, level: Level, reset_timer: bool) {
        let config = level.config();
        let board = shuffle::generate(config.size(), &mut self.rng);
        self.begin(level, board, reset_timer);
    }

    /// Starts `level` with a prepared layout and a fresh countdown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBoard`] if the layout is not a
    /// permutation sized for `level`.
    #[instrument(skip(self, board))]
    pub fn start_with_board(&mut self, level: Level, board: Board) -> Result<(), EngineError> {
        board.validate()?;
        if board.size() != level.config().size() {
            return Err(EngineError::InvalidBoard(format!(
                "{} needs a {}x{} board, got {}x{}",
                level,
                level.config().size(),
                level.config().size(),
                board.size(),
                board.size()
            )));
        }
        self.begin(level, board, true);
        Ok(())
    }

    fn begin(&mut self, level: Level, board: Board, reset_timer: bool) {
        let config = level.config();
        let keep_clock =
            !reset_timer && level == self.session.current_level && self.clock.is_running();
        if !reset_timer && !keep_clock {
            debug!("No running countdown to keep, restarting the clock");
        }

        self.session.current_level = level;
        if !keep_clock {
            self.clock
                .start(config.time_limit_seconds(), &mut self.session.time_remaining);
        }
        self.session.board = board;
        self.session.phase = Phase::Playing;
        self.session.message = Message::default();

        info!(
            level = %level,
            size = config.size(),
            time_remaining = self.session.time_remaining,
            kept_clock = keep_clock,
            "Level started"
        );
        debug_assert_invariants(&self.session);
        self.host.on_ready();
    }

    /// Slides the tile at `index` into the gap.
    ///
    /// Returns whether the tile moved. Ignored unless a level is being
    /// played with a live countdown.
    #[instrument(skip(self), fields(level = %self.session.current_level))]
    pub fn move_tile(&mut self, index: usize) -> bool {
        if self.session.phase != Phase::Playing || !self.clock.is_running() {
            debug!(phase = %self.session.phase, "Move ignored outside play");
            return false;
        }

        let before = score::correct_count(&self.session.board);
        let outcome = moves::try_move(&self.session.board, index);
        if !outcome.moved {
            debug!("Illegal move ignored");
            return false;
        }
        self.session.board = outcome.board;

        let after = score::correct_count(&self.session.board);
        let bonus = score::move_bonus(before, after);
        if bonus > 0 {
            let level = self.session.current_level;
            self.session.level_scores.add(level, bonus);
            self.session.message = Message::transient(
                format!("+{} points for correct placement!", bonus),
                self.options.bonus_message_ticks,
            );
            debug!(before, after, bonus, "Placement bonus awarded");
        }

        debug_assert_invariants(&self.session);
        self.host.on_haptic_feedback();

        if self.session.board.is_solved() {
            self.complete_level();
        }
        true
    }

    /// Feeds one clock tick from the host's scheduler.
    #[instrument(skip(self))]
    pub fn tick(&mut self, epoch: ClockEpoch) -> TickOutcome {
        let outcome = self.clock.tick(epoch, &mut self.session.time_remaining);
        match outcome {
            TickOutcome::Stale => {}
            TickOutcome::Ticked(_) => self.session.message.on_tick(),
            TickOutcome::Expired => self.time_out(),
        }
        outcome
    }

    fn complete_level(&mut self) {
        self.clock.stop();

        let level = self.session.current_level;
        let limit = level.config().time_limit_seconds();
        let win = score::win_score(self.session.time_remaining, limit);
        self.session.level_scores.set(level, win.total());
        self.session.phase = Phase::Won;
        info!(
            level = %level,
            time_remaining = self.session.time_remaining,
            base = win.base,
            bonus = win.bonus,
            "Level solved"
        );

        match level.next() {
            Some(next) => {
                self.start_game(next, true);
                self.session.message = Message::sticky(format!(
                    "{} complete! Score: {} (Base: {} + Bonus: {}). On to {}.",
                    level,
                    win.total(),
                    win.base,
                    win.bonus,
                    next.config().display_name()
                ));
            }
            None => {
                if self.options.final_completion_bonus > 0 {
                    self.session
                        .level_scores
                        .add(level, self.options.final_completion_bonus);
                }
                let total = self.session.total_score();
                self.session.message = Message::sticky(format!(
                    "Congratulations! You've completed all levels! Final score: {}",
                    total
                ));
                info!(total, "All levels completed");
                self.host.on_game_over(total);
            }
        }
    }

    fn time_out(&mut self) {
        let level = self.session.current_level;
        let result = score::timeout_score(&self.session.board, level.config().time_limit_seconds());
        self.session.level_scores.set(level, result.total());
        self.session.phase = Phase::TimedOut;

        let summary = format!(
            "Score: {} (Base: {} + Bonus: {})",
            result.total(),
            result.partial,
            result.bonus
        );
        self.session.message = if level.is_last() {
            Message::sticky(format!(
                "Time's up on {}! {}. So close to completing all levels! Try again!",
                level.config().display_name(),
                summary
            ))
        } else {
            Message::sticky(format!("Time's up! {}", summary))
        };
        warn!(
            level = %level,
            correct = result.correct,
            partial = result.partial,
            bonus = result.bonus,
            "Level timed out"
        );

        if level.is_last() {
            self.host.on_game_over(self.session.total_score());
        }
    }

    /// Serializable view for presentation layers.
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.session, self.clock.is_running())
    }

    /// The live session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Whether the countdown is live.
    pub fn timer_running(&self) -> bool {
        self.clock.is_running()
    }
}
