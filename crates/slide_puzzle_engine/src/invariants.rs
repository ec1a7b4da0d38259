//! First-class session invariants.
//!
//! Invariants are logical properties that must hold after every
//! transition. The progression checks them in debug builds; hosts can
//! call [`check_session`] at any time.

use crate::EngineError;
use crate::session::GameSession;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The board holds every tile in `0..size²` exactly once.
pub struct BoardIsPermutation;

impl Invariant<GameSession> for BoardIsPermutation {
    fn holds(session: &GameSession) -> bool {
        session.board().validate().is_ok()
    }

    fn description() -> &'static str {
        "Board is a permutation of 0..size²"
    }
}

/// The board size matches the current level.
pub struct BoardMatchesLevel;

impl Invariant<GameSession> for BoardMatchesLevel {
    fn holds(session: &GameSession) -> bool {
        session.board().size() == session.current_level().config().size()
    }

    fn description() -> &'static str {
        "Board size matches the current level"
    }
}

/// Remaining time never exceeds the level's limit.
pub struct TimeWithinLimit;

impl Invariant<GameSession> for TimeWithinLimit {
    fn holds(session: &GameSession) -> bool {
        session.time_remaining() <= session.current_level().config().time_limit_seconds()
    }

    fn description() -> &'static str {
        "Remaining time is within the level's limit"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (BoardIsPermutation, BoardMatchesLevel, TimeWithinLimit);

/// Checks every session invariant.
///
/// # Errors
///
/// Returns [`EngineError::InvariantViolation`] listing each failed property.
pub fn check_session(session: &GameSession) -> Result<(), EngineError> {
    SessionInvariants::check_all(session).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Session invariant violated");
        EngineError::InvariantViolation(descriptions)
    })
}

/// Panics in debug builds if an invariant fails.
pub(crate) fn debug_assert_invariants(session: &GameSession) {
    if cfg!(debug_assertions)
        && let Err(err) = check_session(session)
    {
        panic!("{}", err);
    }
}
