//! Scoring rules.
//!
//! All functions here are pure. The session decides whether a result
//! adds to the running level score (per-move bonus) or replaces it
//! (win and timeout).

use crate::types::{Board, EMPTY};
use serde::{Deserialize, Serialize};

/// Fixed bonus added to the tier score on completing a level.
pub const COMPLETION_BONUS: u32 = 50;

/// Points per tile newly placed in its solved position.
pub const CORRECT_TILE_BONUS: u32 = 125;

/// `(minimum ratio, score)` tiers, checked top-down.
const TIERS: [(f64, u32); 5] = [(0.9, 300), (0.75, 250), (0.5, 200), (0.25, 150), (0.1, 100)];

/// Score when less than a tenth of the time is left.
const FLOOR_TIER: u32 = 50;

/// Number of cells holding their solved value, the empty cell included.
pub fn correct_count(board: &Board) -> usize {
    let tiles = board.tiles();
    let Some((&last, rest)) = tiles.split_last() else {
        return 0;
    };
    let placed = rest
        .iter()
        .enumerate()
        .filter(|&(i, &tile)| tile == i + 1)
        .count();
    placed + usize::from(last == EMPTY)
}

/// Score tier for the fraction of time remaining.
pub fn tier_score(time_remaining: u32, time_limit: u32) -> u32 {
    let ratio = f64::from(time_remaining) / f64::from(time_limit);
    TIERS
        .iter()
        .find(|&&(min, _)| ratio >= min)
        .map(|&(_, score)| score)
        .unwrap_or(FLOOR_TIER)
}

/// Breakdown of a completed level's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinScore {
    /// Tier score at the moment of completion.
    pub base: u32,
    /// Fixed completion bonus.
    pub bonus: u32,
}

impl WinScore {
    /// Final level score.
    pub fn total(&self) -> u32 {
        self.base + self.bonus
    }
}

/// Score for solving a level with `time_remaining` seconds left.
pub fn win_score(time_remaining: u32, time_limit: u32) -> WinScore {
    WinScore {
        base: tier_score(time_remaining, time_limit),
        bonus: COMPLETION_BONUS,
    }
}

/// Running bonus for a move that raised the correct count.
pub fn move_bonus(before: usize, after: usize) -> u32 {
    CORRECT_TILE_BONUS * after.saturating_sub(before) as u32
}

/// Breakdown of the partial score awarded when the clock runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeoutScore {
    /// Top tier scaled by the fraction of cells in place, rounded down.
    pub partial: u32,
    /// `correct × 125`.
    pub bonus: u32,
    /// Cells in place when time ran out.
    pub correct: usize,
}

impl TimeoutScore {
    /// Final level score.
    pub fn total(&self) -> u32 {
        self.partial + self.bonus
    }
}

/// Partial score for a board left unsolved at timeout.
///
/// The top tier (full time remaining) is the scaling base regardless of
/// how the level was played.
pub fn timeout_score(board: &Board, time_limit: u32) -> TimeoutScore {
    let correct = correct_count(board);
    let cells = board.len().max(1) as u64;
    let top = u64::from(tier_score(time_limit, time_limit));
    let partial = (top * correct as u64 / cells) as u32;
    TimeoutScore {
        partial,
        bonus: move_bonus(0, correct),
        correct,
    }
}
