//! Engine error types.

use derive_more::{Display, Error};

/// Errors raised at the boundary of the puzzle engine.
///
/// Gameplay itself never fails: illegal moves are ignored and timer
/// races are resolved by epochs. These errors only surface when a caller
/// hands the engine malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The level number is not in the fixed level table.
    #[display("Unknown level {}: expected 1, 2 or 3", _0)]
    UnknownLevel(#[error(not(source))] i64),

    /// A tile layout is not a permutation of `0..size²`.
    #[display("Invalid board: {}", _0)]
    InvalidBoard(#[error(not(source))] String),

    /// A session invariant failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
