// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(broken_intra_doc_links)]
#![warn(missing_docs)]
#![warn(missing_crate_level_docs)]
#![warn(invalid_codeblock_attributes)]

//! This crate implements the core engine of a single-player Sudoku game. It
//! supports the following key features:
//!
//! * An immutable 9x9 [Board] of [Cell]s with values, givens, and pencil-mark
//! notes, with invariants enforced at construction
//! * Pure rule queries for peer sets, conflicts, placement legality, and
//! solved-detection in the [rules] module
//! * Given-respecting board edits ([Board::set_value], [Board::clear_value],
//! [Board::toggle_note]) that return a new board and leave the old one
//! untouched
//! * Randomized generation of full solutions and difficulty-tiered puzzles
//! via the [generator] and [catalog] modules
//! * Serialization of boards to a schema-tagged, JSON-compatible format in
//! the [save] module, with full invariant re-validation on load
//!
//! # Editing a board
//!
//! All edits go through the three board operations, which enforce the domain
//! rules: givens are immutable, filled cells carry no notes, and clearing a
//! value preserves notes.
//!
//! ```
//! use sudoku_engine::Board;
//!
//! let board = Board::empty();
//! let board = board.set_value(0, 0, Some(5)).unwrap();
//!
//! assert_eq!(Some(5), board.cell_at(0, 0).unwrap().value());
//! ```
//!
//! # Checking rules
//!
//! The [rules] module answers all read-side questions about a board. As an
//! example, placing the same digit twice in a row is detected as a conflict.
//!
//! ```
//! use sudoku_engine::Board;
//! use sudoku_engine::rules;
//!
//! let board = Board::empty()
//!     .set_value(0, 0, Some(5)).unwrap()
//!     .set_value(0, 1, Some(5)).unwrap();
//! let conflicts = rules::conflicts_for_cell(&board, 0, 1).unwrap();
//!
//! assert!(conflicts.contains(&(0, 0)));
//! ```
//!
//! # Generating puzzles
//!
//! Puzzles are produced by generating a full solution with randomized
//! backtracking and then masking it down to a difficulty-dependent number of
//! givens while keeping the blank pattern 180°-rotationally symmetric. The
//! random source is injected, so generation is deterministic under a fixed
//! seed.
//!
//! ```
//! use rand::thread_rng;
//! use sudoku_engine::catalog::{self, Difficulty};
//! use sudoku_engine::rules;
//!
//! let puzzle = catalog::generate_puzzle(Difficulty::Easy, thread_rng())
//!     .unwrap();
//! let board = puzzle.to_board().unwrap();
//!
//! assert!(!rules::has_any_conflicts(&board));
//! ```
//!
//! # Note regarding performance
//!
//! Generation uses a backtracking search over the full grid. It is strongly
//! recommended to use at least `opt-level = 2`, even in tests that generate
//! puzzles.

pub mod catalog;
pub mod error;
pub mod generator;
pub mod rules;
pub mod save;
pub mod util;

use error::{SudokuError, SudokuResult};
use util::DigitSet;

use serde::{Deserialize, Serialize};

/// The number of rows and columns of a Sudoku board.
pub const BOARD_SIZE: usize = 9;

/// A 9x9 row-major matrix of optional digits, used as the generation-time
/// intermediate between the [generator](crate::generator) and a [Board]. It
/// carries no given/notes distinction by design.
pub type PuzzleGrid = [[Option<u8>; BOARD_SIZE]; BOARD_SIZE];

/// A single Sudoku cell: an optional value, a flag marking the value as a
/// puzzle clue (a given), and a set of pencil-mark notes.
///
/// Cells are immutable value objects. The following invariants are enforced
/// at construction and can therefore never be observed to be violated:
///
/// * The value, if present, is a digit from 1 to 9.
/// * A cell with a value carries no notes.
/// * A given cell always carries a value.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "save::CellData")]
#[serde(try_from = "save::CellData")]
pub struct Cell {
    value: Option<u8>,
    given: bool,
    notes: DigitSet
}

impl Cell {

    /// Creates a new, empty, editable cell without notes.
    pub fn empty() -> Cell {
        Cell {
            value: None,
            given: false,
            notes: DigitSet::new()
        }
    }

    /// Creates a new cell from its parts, verifying all cell-level
    /// invariants.
    ///
    /// # Arguments
    ///
    /// * `value`: The value of the cell, or `None` for an empty cell. Must be
    /// in the range `[1, 9]` if present.
    /// * `given`: Whether the value is a puzzle clue. Given cells are not
    /// editable through the board operations.
    /// * `notes`: The pencil-mark notes of the cell. Must be empty if `value`
    /// is present.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidNumber` If `value` is present but not in the
    /// range `[1, 9]`.
    /// * `SudokuError::InvalidCellState` If `value` is present while `notes`
    /// is non-empty, or if `given` is true while `value` is absent.
    pub fn new(value: Option<u8>, given: bool, notes: DigitSet)
            -> SudokuResult<Cell> {
        if let Some(digit) = value {
            if !util::is_valid_digit(digit) {
                return Err(SudokuError::InvalidNumber);
            }

            if !notes.is_empty() {
                return Err(SudokuError::InvalidCellState);
            }
        }
        else if given {
            return Err(SudokuError::InvalidCellState);
        }

        Ok(Cell {
            value,
            given,
            notes
        })
    }

    /// Gets the value of this cell, or `None` if it is empty.
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    /// Indicates whether the value of this cell is a puzzle clue (a given).
    pub fn is_given(&self) -> bool {
        self.given
    }

    /// Gets the pencil-mark notes of this cell. Guaranteed to be empty if the
    /// cell holds a value.
    pub fn notes(&self) -> DigitSet {
        self.notes
    }
}

pub(crate) fn index(row: usize, column: usize) -> usize {
    row * BOARD_SIZE + column
}

fn verify_coordinates(row: usize, column: usize) -> SudokuResult<()> {
    if row >= BOARD_SIZE || column >= BOARD_SIZE {
        Err(SudokuError::OutOfBounds)
    }
    else {
        Ok(())
    }
}

/// An immutable 9x9 Sudoku board. Cells are stored in left-to-right,
/// top-to-bottom order, where rows are together.
///
/// All edits produce a new board and leave the old one unchanged. An edit
/// that changes nothing returns a board equal to the input, so callers can
/// detect no-ops by structural equality and short-circuit history writes.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(into = "save::BoardData")]
#[serde(try_from = "save::BoardData")]
pub struct Board {
    cells: Vec<Cell>
}

impl Board {

    /// Creates a new, empty, editable board without any givens.
    pub fn empty() -> Board {
        Board {
            cells: vec![Cell::empty(); BOARD_SIZE * BOARD_SIZE]
        }
    }

    /// Creates a board from a 9x9 grid of optional values, such as a
    /// [Puzzle](crate::catalog::Puzzle)'s grid. All cells start without
    /// notes.
    ///
    /// # Arguments
    ///
    /// * `values`: A 9x9 row-major grid of `None` or digits 1 to 9.
    /// * `as_givens`: If true, every non-empty cell is marked as a given and
    /// thereby protected from later edits.
    ///
    /// # Errors
    ///
    /// If any entry of `values` is present but not in the range `[1, 9]`. In
    /// that case, `SudokuError::InvalidNumber` is returned.
    pub fn from_grid(values: &PuzzleGrid, as_givens: bool)
            -> SudokuResult<Board> {
        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

        for row in values.iter() {
            for &value in row.iter() {
                let given = as_givens && value.is_some();
                cells.push(Cell::new(value, given, DigitSet::new())?);
            }
        }

        Ok(Board {
            cells
        })
    }

    /// Gets the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, 8]`.
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, 8]`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn cell_at(&self, row: usize, column: usize) -> SudokuResult<Cell> {
        verify_coordinates(row, column)?;
        Ok(self.cells[index(row, column)])
    }

    pub(crate) fn from_cells(cells: Vec<Cell>) -> Board {
        Board {
            cells
        }
    }

    fn with_cell(&self, row: usize, column: usize, cell: Cell) -> Board {
        let mut cells = self.cells.clone();
        cells[index(row, column)] = cell;

        Board {
            cells
        }
    }

    /// Returns a new board with the cell at the specified position set to
    /// the given value, or cleared if `value` is `None`.
    ///
    /// The domain rules are enforced here rather than left to callers:
    ///
    /// * Givens are immutable; targeting a given returns a board equal to
    /// this one.
    /// * Setting a non-empty value clears the cell's notes, since a filled
    /// cell cannot carry pencil marks.
    /// * Clearing a value preserves existing notes.
    ///
    /// Note that rule legality is *not* checked; placing a conflicting digit
    /// is a legal edit which [rules::conflicts_for_cell] will report.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, 8]`.
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, 8]`.
    /// * `value`: The new value of the cell, or `None` to clear it. Must be
    /// in the range `[1, 9]` if present.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `row` or `column` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `value` is present but not in the
    /// specified range.
    pub fn set_value(&self, row: usize, column: usize, value: Option<u8>)
            -> SudokuResult<Board> {
        let cell = self.cell_at(row, column)?;

        if let Some(digit) = value {
            if !util::is_valid_digit(digit) {
                return Err(SudokuError::InvalidNumber);
            }

            if cell.given {
                return Ok(self.clone());
            }

            let new_cell = Cell {
                value: Some(digit),
                given: false,
                notes: DigitSet::new()
            };

            if new_cell == cell {
                Ok(self.clone())
            }
            else {
                Ok(self.with_cell(row, column, new_cell))
            }
        }
        else {
            if cell.given {
                return Ok(self.clone());
            }

            // Clearing is a soft-undo that keeps scratch marks.
            let new_cell = Cell {
                value: None,
                given: false,
                notes: cell.notes
            };

            if new_cell == cell {
                Ok(self.clone())
            }
            else {
                Ok(self.with_cell(row, column, new_cell))
            }
        }
    }

    /// Returns a new board with the cell at the specified position cleared.
    /// Equivalent to [Board::set_value] with a value of `None`.
    ///
    /// # Errors
    ///
    /// If either `row` or `column` are not in the range `[0, 8]`. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_value(&self, row: usize, column: usize)
            -> SudokuResult<Board> {
        self.set_value(row, column, None)
    }

    /// Returns a new board with the membership of the given digit flipped in
    /// the notes of the cell at the specified position.
    ///
    /// Notes are only meaningful on empty, editable cells: targeting a given
    /// or a cell that currently holds a value returns a board equal to this
    /// one.
    ///
    /// # Arguments
    ///
    /// * `row`: The row (y-coordinate) of the annotated cell. Must be in the
    /// range `[0, 8]`.
    /// * `column`: The column (x-coordinate) of the annotated cell. Must be
    /// in the range `[0, 8]`.
    /// * `digit`: The pencil-mark digit to toggle. Must be in the range
    /// `[1, 9]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `row` or `column` are not in
    /// the specified range.
    /// * `SudokuError::InvalidNumber` If `digit` is not in the specified
    /// range.
    pub fn toggle_note(&self, row: usize, column: usize, digit: u8)
            -> SudokuResult<Board> {
        let cell = self.cell_at(row, column)?;

        if !util::is_valid_digit(digit) {
            return Err(SudokuError::InvalidNumber);
        }

        if cell.given || cell.value.is_some() {
            return Ok(self.clone());
        }

        let mut notes = cell.notes;
        notes.toggle(digit)?;

        let new_cell = Cell {
            value: None,
            given: false,
            notes
        };

        Ok(self.with_cell(row, column, new_cell))
    }

    /// Counts the number of filled cells on this board.
    pub fn count_filled(&self) -> usize {
        self.cells.iter().filter(|c| c.value.is_some()).count()
    }

    /// Indicates whether this board is full, i.e. every cell is filled with
    /// a value. Note that a full board is not necessarily solved, see
    /// [rules::is_solved].
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.value.is_some())
    }
}
