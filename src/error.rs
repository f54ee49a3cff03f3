//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};

/// An enumeration of the errors that can occur on methods of the core domain
/// types and the puzzle generation pipeline. Errors concerning the decoding
/// of save data are kept separate, see [SaveError](enum.SaveError.html).
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that some digit is invalid. This is the case if it is less
    /// than 1 or greater than 9.
    InvalidNumber,

    /// Indicates that a cell would violate a cell-level invariant, that is,
    /// it would carry notes together with a value or it would be marked as a
    /// given without holding a value.
    InvalidCellState,

    /// Indicates that the specified coordinates (row and column) lie outside
    /// the 9x9 board. This is the case if either is greater than 8.
    OutOfBounds,

    /// Indicates that a difficulty label provided by the user could not be
    /// recognized. This is an expected failure mode for user input; callers
    /// should catch it and present a friendly message.
    UnknownDifficulty,

    /// Indicates that a puzzle id was looked up in the catalog which does not
    /// exist. This is an expected failure mode for user input.
    UnknownPuzzleId,

    /// An error that is raised when the backtracking search exhausts all
    /// possibilities without producing a complete grid. For generation from
    /// an empty grid this indicates an internal-consistency fault in the
    /// legality rules rather than a legitimate runtime condition.
    GenerationFailure
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;

/// An enumeration of the errors that may occur when decoding saved board
/// data. Malformed save data must never crash the application, so every
/// violation surfaces as a value of this type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SaveError {

    /// Indicates that the save data carries a schema tag this version of the
    /// crate does not understand.
    UnsupportedSchema,

    /// Indicates that the board data does not contain exactly 9 rows.
    WrongNumberOfRows,

    /// Indicates that some row of the board data does not contain exactly 9
    /// cells.
    WrongNumberOfCells,

    /// Indicates that a cell value or note in the save data is outside the
    /// range of valid digits (1 to 9).
    InvalidNumber,

    /// Indicates that a decoded cell would violate a cell-level invariant
    /// (notes together with a value, or a given without a value).
    InvalidCellState
}

impl Display for SaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::UnsupportedSchema =>
                write!(f, "unsupported save schema"),
            SaveError::WrongNumberOfRows =>
                write!(f, "board must have exactly 9 rows"),
            SaveError::WrongNumberOfCells =>
                write!(f, "each board row must have exactly 9 cells"),
            SaveError::InvalidNumber =>
                write!(f, "cell values and notes must be digits 1 to 9"),
            SaveError::InvalidCellState =>
                write!(f, "cell violates a cell-level invariant")
        }
    }
}

/// Syntactic sugar for `Result<V, SaveError>`.
pub type SaveResult<V> = Result<V, SaveError>;
