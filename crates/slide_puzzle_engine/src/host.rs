//! Notifications the engine emits to its host platform.

use std::sync::{Arc, Mutex, PoisonError};

/// Fire-and-forget callbacks into the hosting platform.
pub trait HostNotifier: Send {
    /// A playable board is ready.
    fn on_ready(&mut self);

    /// A move was accepted.
    fn on_haptic_feedback(&mut self);

    /// The session ended (level 3 won or timed out).
    fn on_game_over(&mut self, total_score: u32);
}

/// Host that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl HostNotifier for NoopHost {
    fn on_ready(&mut self) {}

    fn on_haptic_feedback(&mut self) {}

    fn on_game_over(&mut self, _total_score: u32) {}
}

/// A notification captured by [`RecordingHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// `on_ready`
    Ready,
    /// `on_haptic_feedback`
    HapticFeedback,
    /// `on_game_over`
    GameOver(u32),
}

/// Host that records notifications in order.
///
/// Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Arc<Mutex<Vec<HostEvent>>>,
}

impl RecordingHost {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Scores passed to `on_game_over`, in order.
    pub fn game_overs(&self) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::GameOver(score) => Some(score),
                _ => None,
            })
            .collect()
    }

    fn push(&self, event: HostEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl HostNotifier for RecordingHost {
    fn on_ready(&mut self) {
        self.push(HostEvent::Ready);
    }

    fn on_haptic_feedback(&mut self) {
        self.push(HostEvent::HapticFeedback);
    }

    fn on_game_over(&mut self, total_score: u32) {
        self.push(HostEvent::GameOver(total_score));
    }
}
