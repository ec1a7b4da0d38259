//! Move validation: a tile slides only into an orthogonally adjacent gap.

use crate::types::Board;
use tracing::{instrument, trace};

/// Result of attempting to slide a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after the attempt (unchanged when `moved` is false).
    pub board: Board,
    /// Whether the tile actually moved.
    pub moved: bool,
}

/// True iff `index` is exactly one orthogonal step from the empty cell.
pub fn is_adjacent_to_empty(board: &Board, index: usize) -> bool {
    let Some(empty) = board.empty_index() else {
        return false;
    };
    if index >= board.len() {
        return false;
    }
    let (row, col) = board.row_col(index);
    let (empty_row, empty_col) = board.row_col(empty);
    row.abs_diff(empty_row) + col.abs_diff(empty_col) == 1
}

/// Slides the tile at `index` into the empty cell if they are adjacent.
///
/// Out-of-range indices, diagonal neighbours, distant tiles and the
/// empty cell itself leave the board untouched.
#[instrument(skip(board), fields(size = board.size()))]
pub fn try_move(board: &Board, index: usize) -> MoveOutcome {
    if !is_adjacent_to_empty(board, index) {
        trace!("Move rejected");
        return MoveOutcome {
            board: board.clone(),
            moved: false,
        };
    }

    let mut next = board.clone();
    if let Some(empty) = board.empty_index() {
        next.swap(index, empty);
    }
    MoveOutcome {
        board: next,
        moved: true,
    }
}

/// Indices of the tiles that can currently slide into the gap.
pub fn movable_indices(board: &Board) -> Vec<usize> {
    (0..board.len())
        .filter(|&index| is_adjacent_to_empty(board, index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centre_gap() -> Board {
        Board::from_tiles(3, vec![1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap()
    }

    #[test]
    fn test_all_orthogonal_neighbours_move() {
        for index in [1, 3, 5, 7] {
            let outcome = try_move(&centre_gap(), index);
            assert!(outcome.moved, "index {} should move", index);
            assert_eq!(outcome.board.get(4), centre_gap().get(index));
            assert_eq!(outcome.board.get(index), Some(0));
        }
    }

    #[test]
    fn test_diagonals_and_self_do_not_move() {
        for index in [0, 2, 4, 6, 8] {
            let outcome = try_move(&centre_gap(), index);
            assert!(!outcome.moved, "index {} should not move", index);
            assert_eq!(outcome.board, centre_gap());
        }
    }

    #[test]
    fn test_out_of_range_ignored() {
        let outcome = try_move(&centre_gap(), 9);
        assert!(!outcome.moved);
        assert_eq!(outcome.board, centre_gap());
    }

    #[test]
    fn test_row_wrap_is_not_adjacent() {
        // Gap at the end of row 0; index 3 starts row 1 and is one cell
        // further in memory but not adjacent on the grid.
        let board = Board::from_tiles(3, vec![1, 2, 0, 3, 4, 5, 6, 7, 8]).unwrap();
        assert!(!try_move(&board, 3).moved);
        assert!(try_move(&board, 5).moved);
    }

    #[test]
    fn test_movable_indices_corner_gap() {
        let board = Board::solved(4);
        assert_eq!(movable_indices(&board), vec![11, 14]);
    }
}
