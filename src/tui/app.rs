//! Application state and logic.

use crate::driver::{EngineHandle, EngineStopped};
use slide_puzzle_engine::StateSnapshot;
use tracing::{debug, info, instrument};

use super::input::Action;

/// Main application state.
pub struct App {
    engine: EngineHandle,
    state: StateSnapshot,
    quit: bool,
}

impl App {
    /// Creates an application showing `state`.
    pub fn new(engine: EngineHandle, state: StateSnapshot) -> Self {
        Self {
            engine,
            state,
            quit: false,
        }
    }

    /// Latest engine state.
    pub fn state(&self) -> &StateSnapshot {
        &self.state
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Pulls the latest state from the engine.
    pub async fn refresh(&mut self) -> Result<(), EngineStopped> {
        self.state = self.engine.state().await?;
        Ok(())
    }

    /// Applies a key action.
    #[instrument(skip(self))]
    pub async fn handle(&mut self, action: Action) -> Result<(), EngineStopped> {
        let level = self.state.current_level;
        match action {
            Action::Quit => {
                info!("User quit");
                self.quit = true;
            }
            Action::Slide(index) => {
                let reply = self.engine.move_tile(index).await?;
                debug!(moved = reply.moved, "Move applied");
                self.state = reply.state;
            }
            Action::Shuffle => {
                self.state = self.engine.start_game(level, false).await?;
            }
            Action::Restart => {
                self.state = self.engine.start_game(level, true).await?;
            }
            Action::SelectLevel(level) => {
                self.state = self.engine.start_game(level, true).await?;
            }
        }
        Ok(())
    }
}
