//! Host notifications routed into tracing.

use slide_puzzle_engine::HostNotifier;
use tracing::{debug, info};

/// Logs every engine notification.
///
/// The terminal and HTTP frontends have no haptics or native bridge, so
/// the notifications only show up in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHost;

impl HostNotifier for TracingHost {
    fn on_ready(&mut self) {
        info!("Board ready");
    }

    fn on_haptic_feedback(&mut self) {
        debug!("Haptic feedback");
    }

    fn on_game_over(&mut self, total_score: u32) {
        info!(total_score, "Game over");
    }
}
