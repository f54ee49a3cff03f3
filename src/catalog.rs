//! This module contains the puzzle catalog and the difficulty policy.
//!
//! A [Puzzle] is an immutable template: a 9x9 grid of givens together with an
//! id and a [Difficulty]. Puzzles come from two sources: the randomized
//! pipeline of [generate_puzzle], which orchestrates the
//! [Generator](crate::generator::Generator) and
//! [Masker](crate::generator::Masker), and a small static catalog of
//! hand-authored seed puzzles retrievable by id for deterministic or offline
//! use. Seed puzzles can additionally be varied without changing their
//! character using [randomize_grid].

use crate::{Board, BOARD_SIZE, PuzzleGrid};
use crate::error::{SudokuError, SudokuResult};
use crate::generator::{shuffle, Generator, Masker};

use rand::Rng;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// The difficulty tier of a puzzle. Difficulty is approximated purely by the
/// number of givens the masker leaves on the board; no human-style solving
/// techniques are rated.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Difficulty {

    /// The easiest tier, with a target of 40 givens.
    Easy,

    /// The middle tier, with a target of 32 givens.
    Medium,

    /// The hardest tier, with a target of 26 givens.
    Hard
}

impl Difficulty {

    /// Gets the number of givens the [Masker](crate::generator::Masker)
    /// aims to leave on a puzzle of this difficulty.
    pub fn target_givens(&self) -> usize {
        match self {
            Difficulty::Easy => 40,
            Difficulty::Medium => 32,
            Difficulty::Hard => 26
        }
    }
}

impl FromStr for Difficulty {
    type Err = SudokuError;

    /// Parses a difficulty label. Labels are trimmed and matched
    /// case-insensitively; anything other than `easy`, `medium`, or `hard`
    /// is rejected with `SudokuError::UnknownDifficulty`. There is
    /// deliberately no fallback tier for unrecognized labels.
    fn from_str(label: &str) -> SudokuResult<Difficulty> {
        match label.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SudokuError::UnknownDifficulty)
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard")
        }
    }
}

/// A Sudoku puzzle template: a grid of givens with an id and a difficulty.
/// Puzzles are immutable once created; play happens on the [Board] obtained
/// from [Puzzle::to_board].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Puzzle {
    id: String,
    difficulty: Difficulty,
    grid: PuzzleGrid
}

impl Puzzle {

    /// Gets the id of this puzzle. For generated puzzles this encodes the
    /// difficulty and a random suffix for traceability; it is not guaranteed
    /// to be globally unique.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Gets the difficulty tier of this puzzle.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Gets the grid of this puzzle, where `None` marks a cell the player
    /// has to fill in.
    pub fn grid(&self) -> &PuzzleGrid {
        &self.grid
    }

    /// Converts this puzzle into a playable [Board] on which every filled
    /// cell is marked as a given.
    ///
    /// # Errors
    ///
    /// If the grid contains an entry outside the range `[1, 9]`, which
    /// cannot happen for puzzles obtained from this module. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn to_board(&self) -> SudokuResult<Board> {
        Board::from_grid(&self.grid, true)
    }
}

const STARTER_GRID: PuzzleGrid = [
    [Some(5), Some(3), None, None, Some(7), None, None, None, None],
    [Some(6), None, None, Some(1), Some(9), Some(5), None, None, None],
    [None, Some(9), Some(8), None, None, None, None, Some(6), None],
    [Some(8), None, None, None, Some(6), None, None, None, Some(3)],
    [Some(4), None, None, Some(8), None, Some(3), None, None, Some(1)],
    [Some(7), None, None, None, Some(2), None, None, None, Some(6)],
    [None, Some(6), None, None, None, None, Some(2), Some(8), None],
    [None, None, None, Some(4), Some(1), Some(9), None, None, Some(5)],
    [None, None, None, None, Some(8), None, None, Some(7), Some(9)]
];

const CLASSIC_MEDIUM_GRID: PuzzleGrid = [
    [None, None, Some(3), None, Some(2), None, Some(6), None, None],
    [Some(9), None, None, Some(3), None, Some(5), None, None, Some(1)],
    [None, None, Some(1), Some(8), None, Some(6), Some(4), None, None],
    [None, None, Some(8), Some(1), None, Some(2), Some(9), None, None],
    [Some(7), None, None, None, None, None, None, None, Some(8)],
    [None, None, Some(6), Some(7), None, Some(8), Some(2), None, None],
    [None, None, Some(2), Some(6), None, Some(9), Some(5), None, None],
    [Some(8), None, None, Some(2), None, Some(3), None, None, Some(9)],
    [None, None, Some(5), None, Some(1), None, Some(3), None, None]
];

const CLASSIC_HARD_GRID: PuzzleGrid = [
    [None, None, None, None, None, None, None, Some(1), Some(2)],
    [None, None, None, None, Some(3), Some(5), None, None, None],
    [None, None, None, Some(7), None, None, Some(3), None, None],
    [None, Some(3), None, None, None, None, None, None, None],
    [Some(1), None, None, None, None, None, None, None, Some(6)],
    [None, None, None, None, None, None, None, Some(7), None],
    [None, None, Some(5), None, None, Some(8), None, None, None],
    [None, None, None, Some(2), Some(9), None, None, None, None],
    [Some(7), Some(2), None, None, None, None, None, None, None]
];

fn seed_puzzles() -> Vec<Puzzle> {
    vec![
        Puzzle {
            id: String::from("starter"),
            difficulty: Difficulty::Easy,
            grid: STARTER_GRID
        },
        Puzzle {
            id: String::from("classic-medium"),
            difficulty: Difficulty::Medium,
            grid: CLASSIC_MEDIUM_GRID
        },
        Puzzle {
            id: String::from("classic-hard"),
            difficulty: Difficulty::Hard,
            grid: CLASSIC_HARD_GRID
        }
    ]
}

/// Fetches a hand-authored seed puzzle from the static catalog by its id.
/// These puzzles are fixed, so they are suitable for deterministic or
/// offline use, independent of the randomized generator.
///
/// # Errors
///
/// If no puzzle with the given id exists. In that case,
/// `SudokuError::UnknownPuzzleId` is returned.
pub fn get_puzzle(id: &str) -> SudokuResult<Puzzle> {
    seed_puzzles().into_iter()
        .find(|puzzle| puzzle.id == id)
        .ok_or(SudokuError::UnknownPuzzleId)
}

/// Returns all hand-authored seed puzzles in the static catalog.
pub fn list_puzzles() -> Vec<Puzzle> {
    seed_puzzles()
}

/// Generates a new random puzzle of the given difficulty: a complete
/// solution is produced by a [Generator] and then masked down to the
/// difficulty's target given-count by a [Masker], keeping the blank pattern
/// 180°-rotationally symmetric. The puzzle id encodes the difficulty and a
/// random suffix.
///
/// The generated puzzle is guaranteed to be solvable; uniqueness of the
/// solution is *not* verified.
///
/// # Arguments
///
/// * `difficulty`: The difficulty tier of the generated puzzle.
/// * `rng`: The random number generator deciding the solution content and
/// the masked cells. Inject a seeded generator for deterministic output.
///
/// # Errors
///
/// If the backtracking search fails to produce a full solution, which
/// indicates an internal-consistency fault. In that case,
/// `SudokuError::GenerationFailure` is returned.
pub fn generate_puzzle<R: Rng>(difficulty: Difficulty, mut rng: R)
        -> SudokuResult<Puzzle> {
    let solution = Generator::new(&mut rng).generate_solution()?;
    let grid = Masker::new(&mut rng).mask(&solution, difficulty);
    let id = format!("{}_gen_{:08x}", difficulty, rng.gen::<u32>());

    Ok(Puzzle {
        id,
        difficulty,
        grid
    })
}

/// Produces a random variation of the given grid while preserving Sudoku
/// validity, using only structure-preserving transforms:
///
/// * relabeling the digits with a random permutation of 1 to 9,
/// * permuting the rows within each 3-row band and the bands themselves,
/// * permuting the columns within each 3-column stack and the stacks
/// themselves.
///
/// The number of filled cells is unchanged, so the variation plays at the
/// same difficulty as the input. This allows a small seed catalog to yield
/// many distinct-looking puzzles.
pub fn randomize_grid<R: Rng>(grid: &PuzzleGrid, rng: &mut R) -> PuzzleGrid {
    let relabeling = shuffle(rng, 1..=(BOARD_SIZE as u8));

    let mut row_order = Vec::with_capacity(BOARD_SIZE);

    for band in shuffle(rng, 0..3usize) {
        for row in shuffle(rng, 0..3usize) {
            row_order.push(band * 3 + row);
        }
    }

    let mut column_order = Vec::with_capacity(BOARD_SIZE);

    for stack in shuffle(rng, 0..3usize) {
        for column in shuffle(rng, 0..3usize) {
            column_order.push(stack * 3 + column);
        }
    }

    let mut result: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];

    for (new_row, &old_row) in row_order.iter().enumerate() {
        for (new_column, &old_column) in column_order.iter().enumerate() {
            result[new_row][new_column] = grid[old_row][old_column]
                .map(|digit| relabeling[digit as usize - 1]);
        }
    }

    result
}
