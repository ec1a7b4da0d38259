//! Core domain types for the sliding puzzle.

use crate::EngineError;
use serde::Serialize;
use tracing::instrument;

/// Tile identifier. `0` is the empty cell.
pub type Tile = usize;

/// The identifier of the empty cell.
pub const EMPTY: Tile = 0;

/// A square sliding-puzzle grid.
///
/// Tiles are stored in row-major order. A well-formed board holds every
/// value in `0..size²` exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Board {
    /// Side length of the grid.
    size: usize,
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
}

impl Board {
    /// Returns the unshuffled starting sequence `[0, 1, …, size²−1]`.
    pub fn identity(size: usize) -> Self {
        Self {
            size,
            tiles: (0..size * size).collect(),
        }
    }

    /// Returns the solved arrangement `[1, 2, …, size²−1, 0]`.
    pub fn solved(size: usize) -> Self {
        let len = size * size;
        let tiles = (1..len).chain(std::iter::once(EMPTY)).collect();
        Self { size, tiles }
    }

    /// Builds a board from an explicit layout.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidBoard`] if the layout length is not
    /// `size²` or the tiles are not a permutation of `0..size²`.
    #[instrument]
    pub fn from_tiles(size: usize, tiles: Vec<Tile>) -> Result<Self, EngineError> {
        let board = Self { size, tiles };
        board.validate()?;
        Ok(board)
    }

    /// Checks that the board is a permutation of `0..size²`.
    pub fn validate(&self) -> Result<(), EngineError> {
        let len = self.size * self.size;
        if self.tiles.len() != len {
            return Err(EngineError::InvalidBoard(format!(
                "expected {} tiles for size {}, found {}",
                len,
                self.size,
                self.tiles.len()
            )));
        }

        let mut seen = vec![false; len];
        for &tile in &self.tiles {
            match seen.get_mut(tile) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(EngineError::InvalidBoard(format!("tile {} appears twice", tile)));
                }
                None => {
                    return Err(EngineError::InvalidBoard(format!(
                        "tile {} is out of range for size {}",
                        tile, self.size
                    )));
                }
            }
        }
        Ok(())
    }

    /// Side length of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (`size²`).
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// True for a zero-sized board.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<Tile> {
        self.tiles.get(index).copied()
    }

    /// Position of the empty cell.
    pub fn empty_index(&self) -> Option<usize> {
        self.tiles.iter().position(|&tile| tile == EMPTY)
    }

    /// Row and column of a cell index.
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// True iff the board equals `[1, 2, …, n−1, 0]` exactly.
    pub fn is_solved(&self) -> bool {
        let last = self.tiles.len().saturating_sub(1);
        !self.tiles.is_empty()
            && self.tiles[last] == EMPTY
            && self.tiles[..last]
                .iter()
                .enumerate()
                .all(|(i, &tile)| tile == i + 1)
    }

    /// Swaps two cells (unchecked; callers validate adjacency).
    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.tiles.swap(a, b);
    }

    /// Mutable access for the shuffler.
    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Formats the board as a human-readable grid.
    pub fn display(&self) -> String {
        let width = self.len().saturating_sub(1).to_string().len();
        self.tiles
            .chunks(self.size.max(1))
            .map(|row| {
                row.iter()
                    .map(|&tile| {
                        if tile == EMPTY {
                            format!("{:>width$}", ".")
                        } else {
                            format!("{:>width$}", tile)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solved_layout() {
        assert_eq!(Board::solved(3).tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert!(Board::solved(4).is_solved());
    }

    #[test]
    fn test_identity_is_not_solved() {
        assert!(!Board::identity(3).is_solved());
    }

    #[test]
    fn test_one_swap_away_is_not_solved() {
        let board = Board::from_tiles(3, vec![1, 2, 3, 4, 5, 6, 7, 0, 8]).unwrap();
        assert!(!board.is_solved());
        let board = Board::from_tiles(3, vec![2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        assert!(!board.is_solved());
    }

    #[test]
    fn test_from_tiles_rejects_duplicates() {
        let err = Board::from_tiles(2, vec![1, 1, 2, 0]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidBoard(_)));
    }

    #[test]
    fn test_from_tiles_rejects_wrong_length() {
        assert!(Board::from_tiles(3, vec![1, 2, 0]).is_err());
    }

    #[test]
    fn test_from_tiles_rejects_out_of_range() {
        assert!(Board::from_tiles(2, vec![1, 2, 9, 0]).is_err());
    }

    #[test]
    fn test_empty_index_and_row_col() {
        let board = Board::from_tiles(3, vec![1, 2, 3, 4, 0, 5, 6, 7, 8]).unwrap();
        assert_eq!(board.empty_index(), Some(4));
        assert_eq!(board.row_col(4), (1, 1));
        assert_eq!(board.row_col(7), (2, 1));
    }

    #[test]
    fn test_display_marks_empty_cell() {
        let board = Board::solved(2);
        assert_eq!(board.display(), "1 2\n3 .");
    }

    #[test]
    fn test_board_serializes_but_is_only_built_through_validation() {
        let board = Board::solved(2);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json, serde_json::json!({ "size": 2, "tiles": [1, 2, 3, 0] }));

        // A layout read back from JSON goes through `from_tiles`.
        let tiles: Vec<Tile> = serde_json::from_value(json["tiles"].clone()).unwrap();
        assert_eq!(Board::from_tiles(2, tiles).unwrap(), board);
        assert!(Board::from_tiles(2, vec![1, 1, 3, 0]).is_err());
    }
}
