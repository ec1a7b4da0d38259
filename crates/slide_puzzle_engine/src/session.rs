//! Session state owned by the level progression.

use crate::level::Level;
use crate::types::Board;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Phase of the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No level has been started yet.
    Idle,
    /// The board accepts moves.
    Playing,
    /// The level was solved.
    Won,
    /// The clock ran out.
    #[display("Timed out")]
    TimedOut,
}

/// Per-level scores. Every level is always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelScores([u32; 3]);

impl LevelScores {
    fn slot(level: Level) -> usize {
        usize::from(level.number() - 1)
    }

    /// Score recorded for `level`.
    pub fn get(&self, level: Level) -> u32 {
        self.0[Self::slot(level)]
    }

    /// Replaces the score for `level`.
    pub fn set(&mut self, level: Level, score: u32) {
        self.0[Self::slot(level)] = score;
    }

    /// Adds to the running score for `level`, saturating at `u32::MAX`.
    pub fn add(&mut self, level: Level, points: u32) {
        let slot = &mut self.0[Self::slot(level)];
        *slot = slot.saturating_add(points);
    }

    /// Sum over all levels, saturating at `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.0.iter().fold(0, |sum, &score| sum.saturating_add(score))
    }

    /// `(level, score)` pairs in level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, u32)> + '_ {
        Level::iter().map(|level| (level, self.get(level)))
    }
}

/// Last user-facing status line.
///
/// Transient messages disappear after a number of clock ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    text: String,
    ticks_left: Option<u32>,
}

impl Message {
    /// A message that stays until replaced.
    pub fn sticky(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ticks_left: None,
        }
    }

    /// A message cleared after `ticks` clock ticks (at least one).
    pub fn transient(text: impl Into<String>, ticks: u32) -> Self {
        Self {
            text: text.into(),
            ticks_left: Some(ticks.max(1)),
        }
    }

    /// Message text; empty when nothing is shown.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True when nothing is shown.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Counts one tick against a transient message.
    pub(crate) fn on_tick(&mut self) {
        match self.ticks_left {
            Some(1) => *self = Self::default(),
            Some(n) => self.ticks_left = Some(n - 1),
            None => {}
        }
    }
}

/// The one live game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    pub(crate) current_level: Level,
    pub(crate) board: Board,
    pub(crate) time_remaining: u32,
    pub(crate) level_scores: LevelScores,
    pub(crate) message: Message,
    pub(crate) phase: Phase,
}

impl GameSession {
    /// A session before the first start: level 1, solved board, full time.
    pub fn new() -> Self {
        let config = Level::FIRST.config();
        Self {
            current_level: Level::FIRST,
            board: Board::solved(config.size()),
            time_remaining: config.time_limit_seconds(),
            level_scores: LevelScores::default(),
            message: Message::default(),
            phase: Phase::Idle,
        }
    }

    /// Level being played.
    pub fn current_level(&self) -> Level {
        self.current_level
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Seconds left on the countdown.
    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Per-level scores.
    pub fn level_scores(&self) -> &LevelScores {
        &self.level_scores
    }

    /// Sum of all level scores.
    pub fn total_score(&self) -> u32 {
        self.level_scores.total()
    }

    /// Last status message.
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Phase of the current level.
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of the session handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Tiles in row-major order, `0` for the gap.
    pub board: Vec<usize>,
    /// Grid side length.
    pub size: usize,
    /// Level number (1..=3).
    pub current_level: Level,
    /// Display name of the current level.
    pub level_name: String,
    /// Seconds left.
    pub time_remaining: u32,
    /// Whether the countdown is live.
    pub timer_running: bool,
    /// Score per level number.
    pub level_scores: BTreeMap<u8, u32>,
    /// Sum of level scores.
    pub total_score: u32,
    /// Status line, empty when none.
    pub message: String,
    /// Phase of the current level.
    pub phase: Phase,
}

impl StateSnapshot {
    pub(crate) fn capture(session: &GameSession, timer_running: bool) -> Self {
        Self {
            board: session.board.tiles().to_vec(),
            size: session.board.size(),
            current_level: session.current_level,
            level_name: session.current_level.config().display_name().to_string(),
            time_remaining: session.time_remaining,
            timer_running,
            level_scores: session
                .level_scores
                .iter()
                .map(|(level, score)| (level.number(), score))
                .collect(),
            total_score: session.total_score(),
            message: session.message.text().to_string(),
            phase: session.phase,
        }
    }

    /// Countdown formatted as `MM:SS`.
    pub fn clock_label(&self) -> String {
        format!("{:02}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scores_default_to_zero_for_all_levels() {
        let scores = LevelScores::default();
        let all: Vec<_> = scores.iter().collect();
        assert_eq!(all, vec![(Level::One, 0), (Level::Two, 0), (Level::Three, 0)]);
        assert_eq!(scores.total(), 0);
    }

    #[test]
    fn test_add_accumulates_and_set_replaces() {
        let mut scores = LevelScores::default();
        scores.add(Level::One, 125);
        scores.add(Level::One, 250);
        assert_eq!(scores.get(Level::One), 375);
        scores.set(Level::One, 350);
        scores.set(Level::Two, 100);
        assert_eq!(scores.get(Level::One), 350);
        assert_eq!(scores.total(), 450);
    }

    #[test]
    fn test_scores_saturate_instead_of_overflowing() {
        let mut scores = LevelScores::default();
        scores.set(Level::Three, u32::MAX - 10);
        scores.add(Level::Three, 500);
        assert_eq!(scores.get(Level::Three), u32::MAX);

        scores.set(Level::One, 350);
        assert_eq!(scores.total(), u32::MAX);
    }

    #[test]
    fn test_transient_message_expires() {
        let mut message = Message::transient("+125", 2);
        message.on_tick();
        assert_eq!(message.text(), "+125");
        message.on_tick();
        assert!(message.is_empty());
    }

    #[test]
    fn test_sticky_message_survives_ticks() {
        let mut message = Message::sticky("done");
        message.on_tick();
        message.on_tick();
        assert_eq!(message.text(), "done");
    }

    #[test]
    fn test_snapshot_clock_label() {
        let mut session = GameSession::new();
        session.time_remaining = 125;
        let snapshot = StateSnapshot::capture(&session, true);
        assert_eq!(snapshot.clock_label(), "02:05");
        assert_eq!(snapshot.level_scores.len(), 3);
        assert_eq!(snapshot.phase, Phase::Idle);
    }
}
