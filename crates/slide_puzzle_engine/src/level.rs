//! The fixed three-level table.

use crate::EngineError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the three puzzle levels, played in order 1 → 2 → 3.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    /// 3×3, four minutes.
    #[display("Level 1")]
    One,
    /// 4×4, seven minutes.
    #[display("Level 2")]
    Two,
    /// 5×5, ten minutes.
    #[display("Level 3")]
    Three,
}

impl Level {
    /// The first level of a session.
    pub const FIRST: Level = Level::One;

    /// The terminal level.
    pub const LAST: Level = Level::Three;

    /// Level number (1..=3).
    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    /// The level that follows this one, or `None` after the last level.
    pub fn next(self) -> Option<Level> {
        match self {
            Level::One => Some(Level::Two),
            Level::Two => Some(Level::Three),
            Level::Three => None,
        }
    }

    /// True for the terminal level.
    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// Fixed configuration for this level.
    pub fn config(self) -> &'static LevelConfig {
        &LEVELS[usize::from(self.number() - 1)]
    }
}

impl TryFrom<u8> for Level {
    type Error = EngineError;

    #[instrument]
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            other => Err(EngineError::UnknownLevel(other.into())),
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.number()
    }
}

/// Immutable per-level settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelConfig {
    level: u8,
    size: usize,
    time_limit_seconds: u32,
    asset_ref: &'static str,
    display_name: &'static str,
}

impl LevelConfig {
    /// Level number this entry belongs to.
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Grid side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Countdown length in seconds.
    pub fn time_limit_seconds(&self) -> u32 {
        self.time_limit_seconds
    }

    /// Opaque image reference for presentation layers.
    pub fn asset_ref(&self) -> &'static str {
        self.asset_ref
    }

    /// Human-readable level name.
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }
}

/// The level table, indexed by `level - 1`.
pub const LEVELS: [LevelConfig; 3] = [
    LevelConfig {
        level: 1,
        size: 3,
        time_limit_seconds: 240,
        asset_ref: "/assets/monad.jpg",
        display_name: "Level 1 (Easy)",
    },
    LevelConfig {
        level: 2,
        size: 4,
        time_limit_seconds: 420,
        asset_ref: "/assets/patapak.png",
        display_name: "Level 2 (Medium)",
    },
    LevelConfig {
        level: 3,
        size: 5,
        time_limit_seconds: 600,
        asset_ref: "/assets/indonads.jpg",
        display_name: "Level 3 (Expert)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_level_table() {
        let table: Vec<_> = Level::iter()
            .map(|level| {
                let config = level.config();
                (config.level(), config.size(), config.time_limit_seconds())
            })
            .collect();
        assert_eq!(table, vec![(1, 3, 240), (2, 4, 420), (3, 5, 600)]);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert_eq!(Level::try_from(0), Err(EngineError::UnknownLevel(0)));
        assert_eq!(Level::try_from(4), Err(EngineError::UnknownLevel(4)));
        assert_eq!(Level::try_from(2), Ok(Level::Two));
    }

    #[test]
    fn test_progression_order() {
        assert_eq!(Level::One.next(), Some(Level::Two));
        assert_eq!(Level::Two.next(), Some(Level::Three));
        assert_eq!(Level::Three.next(), None);
        assert!(Level::Three.is_last());
    }

    #[test]
    fn test_level_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Level::Two).unwrap(), "2");
        let level: Level = serde_json::from_str("3").unwrap();
        assert_eq!(level, Level::Three);
        assert!(serde_json::from_str::<Level>("7").is_err());
    }
}
