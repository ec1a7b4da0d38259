//! Shuffled board generation.
//!
//! Boards are drawn uniformly with a Fisher–Yates shuffle and rejected
//! until they pass [`is_solvable`]. About half of all permutations pass,
//! so the expected number of retries is small.

use crate::types::{Board, EMPTY};
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Generates a shuffled board of side `size` that passes [`is_solvable`].
///
/// Deterministic for a seeded `rng`.
#[instrument(skip(rng))]
pub fn generate<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Board {
    debug_assert!(size >= 2, "board size must be at least 2");

    let mut board = Board::identity(size);
    let mut attempts = 0u32;
    loop {
        attempts += 1;
        board.tiles_mut().shuffle(rng);
        if is_solvable(&board) {
            debug!(attempts, "Generated solvable board");
            return board;
        }
    }
}

/// Number of pairs `i < j` with both tiles non-empty and `board[i] > board[j]`.
pub fn inversion_count(board: &Board) -> usize {
    let tiles = board.tiles();
    tiles
        .iter()
        .enumerate()
        .filter(|&(_, &a)| a != EMPTY)
        .map(|(i, &a)| {
            tiles[i + 1..]
                .iter()
                .filter(|&&b| b != EMPTY && a > b)
                .count()
        })
        .sum()
}

/// The engine's solvability predicate: the inversion count is even.
///
/// The blank tile's row is not taken into account, so for even widths
/// this does not match the exact 15-puzzle criterion.
pub fn is_solvable(board: &Board) -> bool {
    inversion_count(board) % 2 == 0
}
