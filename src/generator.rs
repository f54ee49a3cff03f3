//! This module contains logic for generating random Sudoku puzzles.
//!
//! Generation is done in two steps: a [Generator] produces a complete,
//! conflict-free [SolutionGrid] using randomized backtracking, and a [Masker]
//! removes clues from it in 180°-rotationally-symmetric pairs until the
//! target given-count of the requested difficulty is reached.
//!
//! Both take their random source by injection, so the whole pipeline is
//! deterministic under a fixed seed.

use crate::{BOARD_SIZE, PuzzleGrid};
use crate::catalog::Difficulty;
use crate::error::{SudokuError, SudokuResult};
use crate::util;

use rand::Rng;
use rand::rngs::ThreadRng;

/// A 9x9 row-major matrix of digits representing a complete, conflict-free
/// assignment, as produced by [Generator::generate_solution].
pub type SolutionGrid = [[u8; BOARD_SIZE]; BOARD_SIZE];

pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..len {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

/// Indicates whether placing `digit` at the specified position of the
/// working grid violates no row, column, or box constraint. This is the
/// legality check of [crate::rules::is_legal_placement] specialized to a raw
/// grid.
fn is_legal(grid: &PuzzleGrid, row: usize, column: usize, digit: u8) -> bool {
    for i in 0..BOARD_SIZE {
        if grid[row][i] == Some(digit) || grid[i][column] == Some(digit) {
            return false;
        }
    }

    let box_row = row / 3 * 3;
    let box_column = column / 3 * 3;

    for r in box_row..(box_row + 3) {
        for c in box_column..(box_column + 3) {
            if grid[r][c] == Some(digit) {
                return false;
            }
        }
    }

    true
}

fn first_empty(grid: &PuzzleGrid) -> Option<(usize, usize)> {
    for row in 0..BOARD_SIZE {
        for column in 0..BOARD_SIZE {
            if grid[row][column].is_none() {
                return Some((row, column));
            }
        }
    }

    None
}

/// A generator randomly produces complete, conflict-free solution grids. It
/// uses a random number generator to decide the content. For most cases,
/// sensible defaults are provided by [Generator::new_default].
pub struct Generator<R: Rng> {
    rng: R
}

impl Generator<ThreadRng> {

    /// Creates a new generator that uses a [ThreadRng] to generate the
    /// random digits.
    pub fn new_default() -> Generator<ThreadRng> {
        Generator::new(rand::thread_rng())
    }
}

impl<R: Rng> Generator<R> {

    /// Creates a new generator that uses the given random number generator
    /// to generate random digits.
    pub fn new(rng: R) -> Generator<R> {
        Generator {
            rng
        }
    }

    fn fill_rec(&mut self, work: &mut PuzzleGrid) -> bool {
        let (row, column) = match first_empty(work) {
            Some(coordinates) => coordinates,
            None => return true
        };

        for digit in shuffle(&mut self.rng, 1..=(BOARD_SIZE as u8)) {
            if is_legal(work, row, column, digit) {
                work[row][column] = Some(digit);

                if self.fill_rec(work) {
                    return true;
                }

                work[row][column] = None;
            }
        }

        false
    }

    /// Generates a complete solution grid, that is, an assignment of all 81
    /// cells in which every row, column, and 3x3 box is a permutation of the
    /// digits 1 to 9.
    ///
    /// # Errors
    ///
    /// If the backtracking search exhausts all possibilities without filling
    /// the grid. Starting from an empty grid the search space is always
    /// satisfiable, so this indicates a defect in the legality rules rather
    /// than a condition callers should expect to recover from. In that case,
    /// `SudokuError::GenerationFailure` is returned.
    pub fn generate_solution(&mut self) -> SudokuResult<SolutionGrid> {
        let mut work: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];

        self.complete_work(&mut work)
    }

    /// Fills the empty cells of the given grid with random digits such that
    /// the result is a complete, conflict-free solution containing all
    /// digits already present. This doubles as an exhaustive solvability
    /// check: it succeeds exactly when the grid admits at least one
    /// solution.
    ///
    /// # Arguments
    ///
    /// * `grid`: The partially-filled grid to complete. It is not modified;
    /// the completed assignment is returned separately.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidNumber` If any entry of `grid` is present but
    /// not in the range `[1, 9]`.
    /// * `SudokuError::GenerationFailure` If no assignment of the empty
    /// cells yields a conflict-free grid, i.e. the grid is unsolvable.
    pub fn complete(&mut self, grid: &PuzzleGrid)
            -> SudokuResult<SolutionGrid> {
        for row in grid.iter() {
            for &value in row.iter() {
                if let Some(digit) = value {
                    if !util::is_valid_digit(digit) {
                        return Err(SudokuError::InvalidNumber);
                    }
                }
            }
        }

        let mut work = *grid;

        self.complete_work(&mut work)
    }

    fn complete_work(&mut self, work: &mut PuzzleGrid)
            -> SudokuResult<SolutionGrid> {
        if !self.fill_rec(work) {
            return Err(SudokuError::GenerationFailure);
        }

        let mut solution = [[0u8; BOARD_SIZE]; BOARD_SIZE];

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                // fill_rec succeeded, so every cell is filled.
                solution[row][column] = work[row][column].unwrap();
            }
        }

        Ok(solution)
    }
}

/// A masker can be applied to the output of a [Generator] to remove clues
/// from the grid until the target given-count of a [Difficulty] is reached.
/// The blank pattern is kept 180°-rotationally symmetric: the cell at
/// `(r, c)` is blank if and only if the cell at `(8 - r, 8 - c)` is blank. A
/// random number generator decides which clues are removed.
///
/// The resulting puzzle is always solvable (the input solution solves it),
/// but uniqueness of the solution is *not* verified.
pub struct Masker<R: Rng> {
    rng: R
}

impl Masker<ThreadRng> {

    /// Creates a new masker that uses a [ThreadRng] to decide which clues
    /// are removed.
    pub fn new_default() -> Masker<ThreadRng> {
        Masker::new(rand::thread_rng())
    }
}

impl<R: Rng> Masker<R> {

    /// Creates a new masker that uses the given random number generator to
    /// decide which clues are removed.
    pub fn new(rng: R) -> Masker<R> {
        Masker {
            rng
        }
    }

    /// Removes clues from the given solution grid until the number of
    /// remaining givens reaches the target of the given difficulty, walking
    /// removal candidates in random order and always removing a cell
    /// together with its 180°-rotational partner. A candidate whose removal
    /// would take the given count *below* the target is skipped, so the
    /// result carries the target count exactly, or one more if only
    /// two-cell removals remained near the end.
    ///
    /// # Arguments
    ///
    /// * `solution`: The complete solution grid to mask. It is not modified;
    /// the masked grid is returned separately.
    /// * `difficulty`: The difficulty whose target given-count determines
    /// how many clues remain.
    pub fn mask(&mut self, solution: &SolutionGrid, difficulty: Difficulty)
            -> PuzzleGrid {
        let target = difficulty.target_givens();
        let mut work: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                work[row][column] = Some(solution[row][column]);
            }
        }

        // One half of the grid under 180° rotation: the first four rows
        // plus the middle row up to and including the center. Together with
        // its rotation this covers all 81 cells, the center mapping to
        // itself.
        let half = (0..BOARD_SIZE)
            .flat_map(|row| (0..BOARD_SIZE)
                .map(move |column| (row, column)))
            .filter(|&(row, column)| row < 4 || (row == 4 && column <= 4));
        let candidates = shuffle(&mut self.rng, half);
        let mut givens = BOARD_SIZE * BOARD_SIZE;

        for (row, column) in candidates {
            if givens <= target {
                break;
            }

            let partner_row = BOARD_SIZE - 1 - row;
            let partner_column = BOARD_SIZE - 1 - column;

            // Count the cells this step would actually blank, so the given
            // count cannot drift.
            let mut removal = 0;

            if work[row][column].is_some() {
                removal += 1;
            }

            if (partner_row, partner_column) != (row, column)
                    && work[partner_row][partner_column].is_some() {
                removal += 1;
            }

            if removal == 0 || givens - removal < target {
                continue;
            }

            work[row][column] = None;
            work[partner_row][partner_column] = None;
            givens -= removal;
        }

        work
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::Board;
    use crate::rules;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn to_puzzle_grid(solution: &SolutionGrid) -> PuzzleGrid {
        let mut grid: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                grid[row][column] = Some(solution[row][column]);
            }
        }

        grid
    }

    fn count_givens(grid: &PuzzleGrid) -> usize {
        grid.iter()
            .flat_map(|row| row.iter())
            .filter(|value| value.is_some())
            .count()
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut shuffled = shuffle(&mut rng, 1..=9u8);
        shuffled.sort_unstable();

        assert_eq!((1..=9u8).collect::<Vec<_>>(), shuffled);
    }

    #[test]
    fn generated_solution_is_solved() {
        for seed in 0..5 {
            let mut generator =
                Generator::new(ChaCha8Rng::seed_from_u64(seed));
            let solution = generator.generate_solution().unwrap();
            let board =
                Board::from_grid(&to_puzzle_grid(&solution), true).unwrap();

            assert!(board.is_full());
            assert!(rules::is_solved(&board));
        }
    }

    #[test]
    fn generated_solution_rows_are_permutations() {
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(7));
        let solution = generator.generate_solution().unwrap();

        for row in solution.iter() {
            let mut digits = row.to_vec();
            digits.sort_unstable();

            assert_eq!((1..=9u8).collect::<Vec<_>>(), digits);
        }
    }

    #[test]
    fn generation_is_deterministic_for_fixed_seed() {
        let mut generator_a = Generator::new(ChaCha8Rng::seed_from_u64(123));
        let mut generator_b = Generator::new(ChaCha8Rng::seed_from_u64(123));

        assert_eq!(generator_a.generate_solution().unwrap(),
            generator_b.generate_solution().unwrap());
    }

    #[test]
    fn complete_keeps_existing_digits() {
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(11));
        let mut grid: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];
        grid[0][1] = Some(1);
        grid[0][3] = Some(3);
        grid[1][0] = Some(2);
        grid[2][1] = Some(4);

        let solution = generator.complete(&grid).unwrap();

        assert_eq!(1, solution[0][1]);
        assert_eq!(3, solution[0][3]);
        assert_eq!(2, solution[1][0]);
        assert_eq!(4, solution[2][1]);

        let board =
            Board::from_grid(&to_puzzle_grid(&solution), true).unwrap();

        assert!(rules::is_solved(&board));
    }

    #[test]
    fn complete_fails_on_unsolvable_grid() {
        // The top-left cell is empty, but its row, column, and box together
        // contain all nine digits, so the search cannot place anything.
        let mut grid: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];
        grid[0][1] = Some(1);
        grid[0][2] = Some(2);
        grid[0][3] = Some(3);
        grid[0][4] = Some(4);
        grid[1][0] = Some(5);
        grid[2][0] = Some(6);
        grid[3][0] = Some(7);
        grid[4][0] = Some(8);
        grid[1][1] = Some(9);

        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(0));

        assert_eq!(Err(SudokuError::GenerationFailure),
            generator.complete(&grid));
    }

    #[test]
    fn complete_rejects_invalid_digit() {
        let mut grid: PuzzleGrid = [[None; BOARD_SIZE]; BOARD_SIZE];
        grid[4][4] = Some(10);

        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(0));

        assert_eq!(Err(SudokuError::InvalidNumber),
            generator.complete(&grid));
    }

    fn masked_puzzle(difficulty: Difficulty, seed: u64) -> PuzzleGrid {
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(seed));
        let solution = generator.generate_solution().unwrap();
        let mut masker = Masker::new(ChaCha8Rng::seed_from_u64(seed));

        masker.mask(&solution, difficulty)
    }

    #[test]
    fn masked_easy_puzzle_has_expected_givens() {
        let puzzle = masked_puzzle(Difficulty::Easy, 1);
        let givens = count_givens(&puzzle);

        assert!((36..=45).contains(&givens),
            "Easy puzzle has {} givens.", givens);
    }

    #[test]
    fn masked_medium_puzzle_has_expected_givens() {
        let puzzle = masked_puzzle(Difficulty::Medium, 2);
        let givens = count_givens(&puzzle);

        assert!((28..=35).contains(&givens),
            "Medium puzzle has {} givens.", givens);
    }

    #[test]
    fn masked_hard_puzzle_has_expected_givens() {
        let puzzle = masked_puzzle(Difficulty::Hard, 3);
        let givens = count_givens(&puzzle);

        assert!((22..=30).contains(&givens),
            "Hard puzzle has {} givens.", givens);
    }

    #[test]
    fn masked_puzzle_is_rotationally_symmetric() {
        for &(difficulty, seed) in &[
            (Difficulty::Easy, 1),
            (Difficulty::Medium, 2),
            (Difficulty::Hard, 3)
        ] {
            let puzzle = masked_puzzle(difficulty, seed);

            for row in 0..BOARD_SIZE {
                for column in 0..BOARD_SIZE {
                    let partner = puzzle[BOARD_SIZE - 1 - row]
                        [BOARD_SIZE - 1 - column];

                    assert_eq!(puzzle[row][column].is_none(),
                        partner.is_none(),
                        "Asymmetric blank at ({}, {}).", row, column);
                }
            }
        }
    }

    #[test]
    fn masked_puzzle_has_no_conflicts() {
        let puzzle = masked_puzzle(Difficulty::Medium, 4);
        let board = Board::from_grid(&puzzle, true).unwrap();

        assert!(!rules::has_any_conflicts(&board));
    }

    #[test]
    fn masked_puzzle_is_solvable() {
        for &(difficulty, seed) in &[
            (Difficulty::Easy, 5),
            (Difficulty::Medium, 6),
            (Difficulty::Hard, 7)
        ] {
            let puzzle = masked_puzzle(difficulty, seed);
            let mut solver = Generator::new(ChaCha8Rng::seed_from_u64(99));

            assert!(solver.complete(&puzzle).is_ok(),
                "Masked puzzle is not solvable.");
        }
    }

    #[test]
    fn masking_preserves_remaining_clues() {
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(8));
        let solution = generator.generate_solution().unwrap();
        let mut masker = Masker::new(ChaCha8Rng::seed_from_u64(8));
        let puzzle = masker.mask(&solution, Difficulty::Easy);

        for row in 0..BOARD_SIZE {
            for column in 0..BOARD_SIZE {
                if let Some(digit) = puzzle[row][column] {
                    assert_eq!(solution[row][column], digit);
                }
            }
        }
    }
}
