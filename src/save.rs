//! This module contains the save-data representation of boards and cells.
//!
//! [Board] and [Cell] serialize through the raw data structures defined
//! here, which describe the JSON-compatible on-disk format: one object per
//! cell with `value`, `given`, and `notes` fields, collected into a 9x9
//! row-major matrix and wrapped with a schema tag for forward compatibility.
//!
//! Deserialization re-validates everything the constructors validate, so a
//! malformed or tampered save file surfaces as a [SaveError]-based
//! deserialization error instead of an invalid board. Loading bad data is an
//! expected, recoverable failure and must never crash the application.

use crate::{Board, Cell, BOARD_SIZE};
use crate::error::{SaveError, SaveResult, SudokuError};
use crate::util::DigitSet;

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;

/// The schema tag written into serialized boards. Decoding rejects data
/// carrying any other tag.
pub const SCHEMA: &str = "sudoku.save.v1";

/// The raw save-data form of a [Cell]: an optional value, the given flag,
/// and the notes as a list of digits in ascending order.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CellData {

    /// The value of the cell, or `None` for an empty cell.
    pub value: Option<u8>,

    /// Whether the value is a puzzle clue.
    pub given: bool,

    /// The pencil-mark notes of the cell, in ascending order.
    pub notes: Vec<u8>
}

/// The raw save-data form of a [Board]: a schema tag and a 9x9 row-major
/// matrix of [CellData].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BoardData {

    /// The schema tag, expected to equal [SCHEMA].
    pub schema: String,

    /// The cells of the board, as 9 rows of 9 cells each.
    pub rows: Vec<Vec<CellData>>
}

impl From<Cell> for CellData {
    fn from(cell: Cell) -> CellData {
        CellData {
            value: cell.value(),
            given: cell.is_given(),
            notes: cell.notes().iter().collect()
        }
    }
}

fn convert_error(error: SudokuError) -> SaveError {
    match error {
        SudokuError::InvalidCellState => SaveError::InvalidCellState,
        _ => SaveError::InvalidNumber
    }
}

impl TryFrom<CellData> for Cell {
    type Error = SaveError;

    fn try_from(data: CellData) -> SaveResult<Cell> {
        let notes = DigitSet::from_digits(data.notes)
            .map_err(convert_error)?;

        Cell::new(data.value, data.given, notes).map_err(convert_error)
    }
}

impl From<Board> for BoardData {
    fn from(board: Board) -> BoardData {
        let rows = (0..BOARD_SIZE)
            .map(|row| (0..BOARD_SIZE)
                .map(|column| {
                    // Coordinates are in range, so the query cannot fail.
                    let cell = board.cell_at(row, column).unwrap();
                    CellData::from(cell)
                })
                .collect())
            .collect();

        BoardData {
            schema: String::from(SCHEMA),
            rows
        }
    }
}

impl TryFrom<BoardData> for Board {
    type Error = SaveError;

    fn try_from(data: BoardData) -> SaveResult<Board> {
        if data.schema != SCHEMA {
            return Err(SaveError::UnsupportedSchema);
        }

        if data.rows.len() != BOARD_SIZE {
            return Err(SaveError::WrongNumberOfRows);
        }

        let mut cells = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);

        for row_data in data.rows {
            if row_data.len() != BOARD_SIZE {
                return Err(SaveError::WrongNumberOfCells);
            }

            for cell_data in row_data {
                cells.push(Cell::try_from(cell_data)?);
            }
        }

        Ok(Board::from_cells(cells))
    }
}
