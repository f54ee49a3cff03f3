//! This module contains the pure rule queries of the engine: peer sets,
//! conflict detection, placement legality, and solved-detection.
//!
//! All functions in this module are read-only. They answer questions about a
//! [Board] without ever changing it, which makes them safe to call from any
//! layer (presentation, history management, generation) at any time.
//!
//! A *peer* of a cell is any other cell sharing its row, column, or 3x3 box.
//! Two filled peers holding the same digit are in *conflict*.

use crate::{Board, BOARD_SIZE};
use crate::error::{SudokuError, SudokuResult};
use crate::util;

use std::collections::HashSet;

fn verify_coordinates(row: usize, column: usize) -> SudokuResult<()> {
    if row >= BOARD_SIZE || column >= BOARD_SIZE {
        Err(SudokuError::OutOfBounds)
    }
    else {
        Ok(())
    }
}

/// Computes the set of peers of the cell at the specified position, that is,
/// all coordinates sharing its row, column, or 3x3 box, excluding the cell
/// itself. For a 9x9 board this is always a set of 20 coordinates.
///
/// # Arguments
///
/// * `row`: The row (y-coordinate) of the reference cell. Must be in the
/// range `[0, 8]`.
/// * `column`: The column (x-coordinate) of the reference cell. Must be in
/// the range `[0, 8]`.
///
/// # Errors
///
/// If either `row` or `column` are not in the specified range. In that case,
/// `SudokuError::OutOfBounds` is returned.
pub fn peers_of(row: usize, column: usize)
        -> SudokuResult<HashSet<(usize, usize)>> {
    verify_coordinates(row, column)?;

    let mut peers = HashSet::new();

    for i in 0..BOARD_SIZE {
        peers.insert((row, i));
        peers.insert((i, column));
    }

    let box_row = row / 3 * 3;
    let box_column = column / 3 * 3;

    for r in box_row..(box_row + 3) {
        for c in box_column..(box_column + 3) {
            peers.insert((r, c));
        }
    }

    peers.remove(&(row, column));
    Ok(peers)
}

/// Computes the set of coordinates whose cells conflict with the cell at the
/// specified position, that is, the peers holding the same digit.
///
/// If the cell at the given position is empty, the result is empty. The
/// result never contains the queried coordinate itself.
///
/// # Arguments
///
/// * `board`: The board on which to search for conflicts.
/// * `row`: The row (y-coordinate) of the checked cell. Must be in the range
/// `[0, 8]`.
/// * `column`: The column (x-coordinate) of the checked cell. Must be in the
/// range `[0, 8]`.
///
/// # Errors
///
/// If either `row` or `column` are not in the specified range. In that case,
/// `SudokuError::OutOfBounds` is returned.
pub fn conflicts_for_cell(board: &Board, row: usize, column: usize)
        -> SudokuResult<HashSet<(usize, usize)>> {
    let cell = board.cell_at(row, column)?;
    let digit = match cell.value() {
        Some(digit) => digit,
        None => return Ok(HashSet::new())
    };

    let mut conflicts = HashSet::new();

    for (peer_row, peer_column) in peers_of(row, column)? {
        if board.cell_at(peer_row, peer_column)?.value() == Some(digit) {
            conflicts.insert((peer_row, peer_column));
        }
    }

    Ok(conflicts)
}

/// Indicates whether placing the given digit at the specified position would
/// be legal under standard Sudoku rules.
///
/// Legality is defined as follows:
///
/// * Re-placing the digit a cell already holds is legal (idempotence).
/// * Placing over a different existing value is illegal.
/// * Otherwise, the placement is legal if and only if no peer holds the
/// digit.
///
/// Note that the `given` flag is *not* consulted; protecting givens from
/// edits is a policy of the board operations, not a rule-legality concern.
///
/// # Arguments
///
/// * `board`: The board on which the placement is checked.
/// * `row`: The row (y-coordinate) of the checked cell. Must be in the range
/// `[0, 8]`.
/// * `column`: The column (x-coordinate) of the checked cell. Must be in the
/// range `[0, 8]`.
/// * `digit`: The digit whose placement is checked. Must be in the range
/// `[1, 9]`.
///
/// # Errors
///
/// * `SudokuError::OutOfBounds` If either `row` or `column` are not in the
/// specified range.
/// * `SudokuError::InvalidNumber` If `digit` is not in the specified range.
pub fn is_legal_placement(board: &Board, row: usize, column: usize, digit: u8)
        -> SudokuResult<bool> {
    if !util::is_valid_digit(digit) {
        return Err(SudokuError::InvalidNumber);
    }

    let cell = board.cell_at(row, column)?;

    if cell.value() == Some(digit) {
        return Ok(true);
    }

    if cell.value().is_some() {
        return Ok(false);
    }

    for (peer_row, peer_column) in peers_of(row, column)? {
        if board.cell_at(peer_row, peer_column)?.value() == Some(digit) {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Indicates whether any filled cell on the board conflicts with another
/// filled cell.
pub fn has_any_conflicts(board: &Board) -> bool {
    for row in 0..BOARD_SIZE {
        for column in 0..BOARD_SIZE {
            // Coordinates are in range, so the queries cannot fail.
            let cell = board.cell_at(row, column).unwrap();

            if cell.value().is_none() {
                continue;
            }

            let conflicts = conflicts_for_cell(board, row, column).unwrap();

            if !conflicts.is_empty() {
                return true;
            }
        }
    }

    false
}

/// Indicates whether the board is solved, that is, every cell is filled and
/// no two peers hold the same digit.
pub fn is_solved(board: &Board) -> bool {
    board.is_full() && !has_any_conflicts(board)
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::PuzzleGrid;

    /// A classic completely solved grid, used as a fixture by several tests.
    const SOLVED_GRID: [[u8; 9]; 9] = [
        [5, 3, 4, 6, 7, 8, 9, 1, 2],
        [6, 7, 2, 1, 9, 5, 3, 4, 8],
        [1, 9, 8, 3, 4, 2, 5, 6, 7],
        [8, 5, 9, 7, 6, 1, 4, 2, 3],
        [4, 2, 6, 8, 5, 3, 7, 9, 1],
        [7, 1, 3, 9, 2, 4, 8, 5, 6],
        [9, 6, 1, 5, 3, 7, 2, 8, 4],
        [2, 8, 7, 4, 1, 9, 6, 3, 5],
        [3, 4, 5, 2, 8, 6, 1, 7, 9]
    ];

    fn solved_board() -> Board {
        let mut grid: PuzzleGrid = Default::default();

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                grid[row][column] = Some(SOLVED_GRID[row][column]);
            }
        }

        Board::from_grid(&grid, true).unwrap()
    }

    #[test]
    fn peers_have_expected_shape() {
        let peers = peers_of(4, 4).unwrap();

        assert_eq!(20, peers.len());
        assert!(!peers.contains(&(4, 4)));
        assert!(peers.contains(&(4, 0)));
        assert!(peers.contains(&(0, 4)));
        assert!(peers.contains(&(3, 3)));
        assert!(!peers.contains(&(0, 0)));
    }

    #[test]
    fn peers_of_corner() {
        let peers = peers_of(0, 0).unwrap();

        assert_eq!(20, peers.len());
        assert!(peers.contains(&(0, 8)));
        assert!(peers.contains(&(8, 0)));
        assert!(peers.contains(&(2, 2)));
        assert!(!peers.contains(&(3, 3)));
    }

    #[test]
    fn peers_of_out_of_bounds() {
        assert_eq!(Err(SudokuError::OutOfBounds), peers_of(9, 0));
        assert_eq!(Err(SudokuError::OutOfBounds), peers_of(0, 9));
    }

    #[test]
    fn empty_cell_has_no_conflicts() {
        let board = Board::empty().set_value(0, 0, Some(5)).unwrap();

        assert!(conflicts_for_cell(&board, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn conflicts_never_contain_queried_cell() {
        let board = Board::empty()
            .set_value(0, 0, Some(5)).unwrap()
            .set_value(0, 1, Some(5)).unwrap()
            .set_value(8, 0, Some(5)).unwrap();

        for &(row, column) in &[(0, 0), (0, 1), (8, 0)] {
            let conflicts = conflicts_for_cell(&board, row, column).unwrap();

            assert!(!conflicts.contains(&(row, column)));
            assert!(!conflicts.is_empty());
        }
    }

    #[test]
    fn row_conflict_detected() {
        let board = Board::empty()
            .set_value(0, 0, Some(5)).unwrap()
            .set_value(0, 1, Some(5)).unwrap();
        let conflicts = conflicts_for_cell(&board, 0, 1).unwrap();

        assert!(conflicts.contains(&(0, 0)));
        assert_eq!(1, conflicts.len());
    }

    #[test]
    fn column_and_box_conflicts_detected() {
        let board = Board::empty()
            .set_value(1, 1, Some(3)).unwrap()
            .set_value(7, 1, Some(3)).unwrap()
            .set_value(2, 2, Some(3)).unwrap();
        let conflicts = conflicts_for_cell(&board, 1, 1).unwrap();

        assert!(conflicts.contains(&(7, 1)));
        assert!(conflicts.contains(&(2, 2)));
        assert_eq!(2, conflicts.len());
    }

    #[test]
    fn different_digits_do_not_conflict() {
        let board = Board::empty()
            .set_value(0, 0, Some(5)).unwrap()
            .set_value(0, 1, Some(6)).unwrap();

        assert!(conflicts_for_cell(&board, 0, 0).unwrap().is_empty());
        assert!(conflicts_for_cell(&board, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn replacement_of_same_digit_is_legal() {
        let board = Board::empty().set_value(0, 0, Some(5)).unwrap();

        assert!(is_legal_placement(&board, 0, 0, 5).unwrap());
    }

    #[test]
    fn placement_over_different_digit_is_illegal() {
        let board = Board::empty().set_value(0, 0, Some(5)).unwrap();

        assert!(!is_legal_placement(&board, 0, 0, 6).unwrap());
    }

    #[test]
    fn placement_conflicting_with_peer_is_illegal() {
        let board = Board::empty().set_value(0, 0, Some(5)).unwrap();

        assert!(!is_legal_placement(&board, 0, 8, 5).unwrap());
        assert!(!is_legal_placement(&board, 8, 0, 5).unwrap());
        assert!(!is_legal_placement(&board, 2, 2, 5).unwrap());
        assert!(is_legal_placement(&board, 3, 3, 5).unwrap());
    }

    #[test]
    fn legality_ignores_given_flag() {
        let mut grid: PuzzleGrid = Default::default();
        grid[0][0] = Some(5);
        let board = Board::from_grid(&grid, true).unwrap();

        // Whether the cell may actually be edited is a caller-level policy.
        assert!(is_legal_placement(&board, 0, 0, 5).unwrap());
        assert!(!is_legal_placement(&board, 0, 0, 6).unwrap());
    }

    #[test]
    fn legality_rejects_invalid_digit() {
        let board = Board::empty();

        assert_eq!(Err(SudokuError::InvalidNumber),
            is_legal_placement(&board, 0, 0, 0));
        assert_eq!(Err(SudokuError::InvalidNumber),
            is_legal_placement(&board, 0, 0, 10));
    }

    #[test]
    fn empty_board_has_no_conflicts_and_is_not_solved() {
        let board = Board::empty();

        assert!(!has_any_conflicts(&board));
        assert!(!is_solved(&board));
    }

    #[test]
    fn conflicting_board_detected() {
        let board = Board::empty()
            .set_value(0, 0, Some(5)).unwrap()
            .set_value(0, 1, Some(5)).unwrap();

        assert!(has_any_conflicts(&board));
        assert!(!is_solved(&board));
    }

    #[test]
    fn solved_grid_is_solved() {
        let board = solved_board();

        assert!(board.is_full());
        assert!(!has_any_conflicts(&board));
        assert!(is_solved(&board));
    }

    #[test]
    fn almost_solved_grid_is_not_solved() {
        let mut grid: PuzzleGrid = Default::default();

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                grid[row][column] = Some(SOLVED_GRID[row][column]);
            }
        }

        grid[8][8] = None;

        let board = Board::from_grid(&grid, true).unwrap();

        assert!(!board.is_full());
        assert!(!is_solved(&board));
    }

    #[test]
    fn full_board_with_conflict_is_not_solved() {
        let mut grid: PuzzleGrid = Default::default();

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                grid[row][column] = Some(SOLVED_GRID[row][column]);
            }
        }

        // Duplicate the top-left digit at the bottom-right corner.
        grid[8][8] = grid[0][0];

        let board = Board::from_grid(&grid, true).unwrap();

        assert!(board.is_full());
        assert!(has_any_conflicts(&board));
        assert!(!is_solved(&board));
    }
}
