//! Terminal UI for the slide puzzle

mod app;
mod input;
mod ui;

pub use input::{Action, action_for_key};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use slide_puzzle_engine::Level;
use std::io;
use tokio::time::Duration;
use tracing::{error, info, instrument};

use crate::driver::EngineHandle;
use app::App;

/// How long to wait for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Runs the terminal UI against an engine task until the user quits.
#[instrument(skip(engine))]
pub async fn run_tui(engine: EngineHandle, level: Level) -> Result<()> {
    info!("Starting slide puzzle TUI");

    let state = engine.start_game(level, true).await?;
    let mut app = App::new(engine, state);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, &mut app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    info!(total_score = app.state().total_score, "TUI closed");
    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app.state()))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let state = app.state();
            if let Some(action) = action_for_key(key.code, &state.board, state.size) {
                app.handle(action).await?;
            }
        }

        if app.should_quit() {
            return Ok(());
        }

        app.refresh().await?;
    }
}
