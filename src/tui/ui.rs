//! Stateless UI rendering for the puzzle.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use slide_puzzle_engine::{EMPTY, Phase, StateSnapshot};

const CELL_WIDTH: u16 = 5;
const HELP: &str = "←↑→↓ slide  s shuffle  r restart  1-3 level  q quit";

/// Renders the full screen for `state`.
pub fn draw(frame: &mut Frame, state: &StateSnapshot) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Clock and scores
            Constraint::Min(7),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(1), // Help
        ])
        .split(area);

    let title = Paragraph::new(format!("Slide Puzzle - {}", state.level_name))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    frame.render_widget(status_bar(state), chunks[1]);
    draw_board(frame, chunks[2], state);

    let message = Paragraph::new(state.message.as_str())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, chunks[3]);

    let help = Paragraph::new(HELP)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[4]);
}

fn status_bar(state: &StateSnapshot) -> Paragraph<'static> {
    let clock_style = match (state.phase, state.time_remaining) {
        (Phase::TimedOut, _) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        (_, t) if t <= 30 => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::Green),
    };

    let mut spans = vec![
        Span::styled(format!("⏱ {}", state.clock_label()), clock_style),
        Span::raw("   "),
    ];
    for (level, score) in &state.level_scores {
        spans.push(Span::raw(format!("L{}: {}  ", level, score)));
    }
    spans.push(Span::styled(
        format!("Total: {}", state.total_score),
        Style::default().add_modifier(Modifier::BOLD),
    ));

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn draw_board(frame: &mut Frame, area: Rect, state: &StateSnapshot) {
    let size = state.size.max(1);
    let width = CELL_WIDTH * size as u16 + 2;
    let height = size as u16 + 2;
    let board_area = center_rect(area, width, height);

    let lines: Vec<Line> = state
        .board
        .chunks(size)
        .enumerate()
        .map(|(row, tiles)| {
            Line::from(
                tiles
                    .iter()
                    .enumerate()
                    .map(|(col, &tile)| cell(tile, row * size + col))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    let border = if state.phase == Phase::Playing {
        Color::White
    } else {
        Color::DarkGray
    };
    let board = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(board, board_area);
}

fn cell(tile: usize, index: usize) -> Span<'static> {
    if tile == EMPTY {
        return Span::raw(" ".repeat(CELL_WIDTH as usize));
    }
    let style = if tile == index + 1 {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Blue)
    };
    Span::styled(format!("{:>4} ", tile), style)
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
