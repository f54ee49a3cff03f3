//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! pencil-mark notes on cells.

use crate::error::{SudokuError, SudokuResult};

/// The lowest digit that can appear on a Sudoku board.
pub const MIN_DIGIT: u8 = 1;

/// The highest digit that can appear on a Sudoku board.
pub const MAX_DIGIT: u8 = 9;

/// Indicates whether the given number is a valid Sudoku digit, i.e. lies in
/// the range 1 to 9.
pub(crate) fn is_valid_digit(digit: u8) -> bool {
    (MIN_DIGIT..=MAX_DIGIT).contains(&digit)
}

/// A set of Sudoku digits (1 to 9) that is implemented as a bit mask. Each
/// digit is represented by one bit in a `u16`. This generally has better
/// performance than a `HashSet` and makes the containing [Cell](crate::Cell)
/// a cheap `Copy` type.
///
/// All mutating operations reject digits outside the range 1 to 9 with
/// [SudokuError::InvalidNumber], so a `DigitSet` can never hold an invalid
/// digit.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct DigitSet {
    mask: u16
}

impl DigitSet {

    /// Creates a new, empty digit set.
    pub fn new() -> DigitSet {
        DigitSet {
            mask: 0
        }
    }

    /// Creates a digit set containing all digits yielded by the given
    /// iterator. Duplicates are permitted and have no additional effect.
    ///
    /// # Errors
    ///
    /// If any yielded digit is not in the range 1 to 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn from_digits(digits: impl IntoIterator<Item = u8>)
            -> SudokuResult<DigitSet> {
        let mut set = DigitSet::new();

        for digit in digits {
            set.insert(digit)?;
        }

        Ok(set)
    }

    /// Indicates whether this set contains the given digit. Numbers outside
    /// the range 1 to 9 are never contained.
    pub fn contains(&self, digit: u8) -> bool {
        is_valid_digit(digit) && self.mask & (1 << digit) != 0
    }

    /// Inserts the given digit into this set. Returns `true` if the set
    /// changed, i.e. the digit was not present before.
    ///
    /// # Errors
    ///
    /// If `digit` is not in the range 1 to 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn insert(&mut self, digit: u8) -> SudokuResult<bool> {
        if !is_valid_digit(digit) {
            return Err(SudokuError::InvalidNumber);
        }

        let old_mask = self.mask;
        self.mask |= 1 << digit;
        Ok(self.mask != old_mask)
    }

    /// Removes the given digit from this set. Returns `true` if the set
    /// changed, i.e. the digit was present before.
    ///
    /// # Errors
    ///
    /// If `digit` is not in the range 1 to 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn remove(&mut self, digit: u8) -> SudokuResult<bool> {
        if !is_valid_digit(digit) {
            return Err(SudokuError::InvalidNumber);
        }

        let old_mask = self.mask;
        self.mask &= !(1 << digit);
        Ok(self.mask != old_mask)
    }

    /// Flips the membership of the given digit in this set. Returns `true`
    /// if the digit is contained after the operation.
    ///
    /// # Errors
    ///
    /// If `digit` is not in the range 1 to 9. In that case,
    /// `SudokuError::InvalidNumber` is returned.
    pub fn toggle(&mut self, digit: u8) -> SudokuResult<bool> {
        if !is_valid_digit(digit) {
            return Err(SudokuError::InvalidNumber);
        }

        self.mask ^= 1 << digit;
        Ok(self.mask & (1 << digit) != 0)
    }

    /// Gets the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Indicates whether this set contains no digits.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Returns an iterator over the digits contained in this set, in
    /// ascending order.
    pub fn iter(&self) -> DigitSetIter {
        DigitSetIter {
            mask: self.mask,
            next_digit: MIN_DIGIT
        }
    }
}

/// An iterator over the content of a [DigitSet], in ascending order.
pub struct DigitSetIter {
    mask: u16,
    next_digit: u8
}

impl Iterator for DigitSetIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.next_digit <= MAX_DIGIT {
            let digit = self.next_digit;
            self.next_digit += 1;

            if self.mask & (1 << digit) != 0 {
                return Some(digit);
            }
        }

        None
    }
}

impl IntoIterator for &DigitSet {
    type Item = u8;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}
