//! Keyboard mapping for the puzzle.

use crossterm::event::KeyCode;
use slide_puzzle_engine::{EMPTY, Level};

/// What a key press asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Slide the tile at this index into the gap.
    Slide(usize),
    /// Reshuffle the current level, keeping the countdown.
    Shuffle,
    /// Restart the current level with a fresh countdown.
    Restart,
    /// Jump to a level with a fresh countdown.
    SelectLevel(Level),
    /// Leave the terminal UI.
    Quit,
}

/// Maps a key to an action for the given board.
///
/// Arrow keys push a tile in the pressed direction: `Up` slides the
/// tile below the gap upward, `Left` the tile right of the gap, and so on.
pub fn action_for_key(key: KeyCode, board: &[usize], size: usize) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('s') => Some(Action::Shuffle),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char(c @ '1'..='3') => c
            .to_digit(10)
            .and_then(|d| Level::try_from(d as u8).ok())
            .map(Action::SelectLevel),
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            let empty = board.iter().position(|&t| t == EMPTY)?;
            slide_source(empty, size, key).map(Action::Slide)
        }
        _ => None,
    }
}

/// Index of the tile that moves into the gap for an arrow key.
fn slide_source(empty: usize, size: usize, key: KeyCode) -> Option<usize> {
    if size == 0 {
        return None;
    }
    let (row, col) = (empty / size, empty % size);
    match key {
        KeyCode::Up if row + 1 < size => Some(empty + size),
        KeyCode::Down if row > 0 => Some(empty - size),
        KeyCode::Left if col + 1 < size => Some(empty + 1),
        KeyCode::Right if col > 0 => Some(empty - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 2 3
    // 4 0 5
    // 6 7 8
    const CENTER_GAP: [usize; 9] = [1, 2, 3, 4, 0, 5, 6, 7, 8];

    // 1 2 3
    // 4 5 6
    // 7 8 0
    const SOLVED: [usize; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 0];

    #[test]
    fn test_arrows_pick_neighbours_of_gap() {
        assert_eq!(
            action_for_key(KeyCode::Up, &CENTER_GAP, 3),
            Some(Action::Slide(7))
        );
        assert_eq!(
            action_for_key(KeyCode::Down, &CENTER_GAP, 3),
            Some(Action::Slide(1))
        );
        assert_eq!(
            action_for_key(KeyCode::Left, &CENTER_GAP, 3),
            Some(Action::Slide(5))
        );
        assert_eq!(
            action_for_key(KeyCode::Right, &CENTER_GAP, 3),
            Some(Action::Slide(3))
        );
    }

    #[test]
    fn test_arrows_ignore_edges() {
        assert_eq!(action_for_key(KeyCode::Up, &SOLVED, 3), None);
        assert_eq!(action_for_key(KeyCode::Left, &SOLVED, 3), None);
        assert_eq!(
            action_for_key(KeyCode::Down, &SOLVED, 3),
            Some(Action::Slide(5))
        );
        assert_eq!(
            action_for_key(KeyCode::Right, &SOLVED, 3),
            Some(Action::Slide(7))
        );
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(action_for_key(KeyCode::Char('q'), &SOLVED, 3), Some(Action::Quit));
        assert_eq!(action_for_key(KeyCode::Char('s'), &SOLVED, 3), Some(Action::Shuffle));
        assert_eq!(action_for_key(KeyCode::Char('r'), &SOLVED, 3), Some(Action::Restart));
        assert_eq!(
            action_for_key(KeyCode::Char('2'), &SOLVED, 3),
            Some(Action::SelectLevel(Level::Two))
        );
        assert_eq!(action_for_key(KeyCode::Char('4'), &SOLVED, 3), None);
        assert_eq!(action_for_key(KeyCode::Char('x'), &SOLVED, 3), None);
    }
}
