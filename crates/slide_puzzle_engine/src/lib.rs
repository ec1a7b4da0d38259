//! Sliding-tile puzzle engine.
//!
//! Pure game logic for a three-level sliding puzzle with a timed score:
//!
//! - **Board**: permutation of tiles, `0` for the gap
//! - **Shuffle**: uniform shuffles filtered by an inversion-parity check
//! - **Moves**: a tile slides only into an orthogonally adjacent gap
//! - **Score**: time tiers, completion bonus, placement and timeout scores
//! - **Clock**: an epoch-tagged countdown driven by a host scheduler
//! - **Progression**: the session state machine across levels 1 → 3
//!
//! # Example
//!
//! ```
//! use slide_puzzle_engine::{
//!     EngineOptions, Level, LevelProgression, ManualTickScheduler, NoopHost, Phase,
//! };
//!
//! let scheduler = ManualTickScheduler::new();
//! let mut engine = LevelProgression::new(
//!     Box::new(scheduler.clone()),
//!     Box::new(NoopHost),
//!     EngineOptions { seed: Some(1), ..EngineOptions::default() },
//! );
//! engine.start_game(Level::One, true);
//! assert_eq!(engine.state().phase, Phase::Playing);
//!
//! if let Some(epoch) = scheduler.active_epoch() {
//!     engine.tick(epoch);
//! }
//! assert_eq!(engine.state().time_remaining, 239);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod clock;
mod error;
mod host;
mod invariants;
mod level;
mod moves;
mod progression;
mod score;
mod session;
mod shuffle;
mod types;

pub use clock::{
    ClockEpoch, ClockState, GameClock, ManualTickScheduler, TickHandle, TickOutcome, TickScheduler,
};
pub use error::EngineError;
pub use host::{HostEvent, HostNotifier, NoopHost, RecordingHost};
pub use invariants::{
    BoardIsPermutation, BoardMatchesLevel, Invariant, InvariantSet, InvariantViolation,
    SessionInvariants, TimeWithinLimit, check_session,
};
pub use level::{LEVELS, Level, LevelConfig};
pub use moves::{MoveOutcome, is_adjacent_to_empty, movable_indices, try_move};
pub use progression::{EngineOptions, LevelProgression};
pub use score::{
    COMPLETION_BONUS, CORRECT_TILE_BONUS, TimeoutScore, WinScore, correct_count, move_bonus,
    tier_score, timeout_score, win_score,
};
pub use session::{GameSession, LevelScores, Message, Phase, StateSnapshot};
pub use shuffle::{generate, inversion_count, is_solvable};
pub use types::{Board, EMPTY, Tile};
