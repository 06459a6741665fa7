//! This module contains the error and result definitions used in this crate.

/// The errors that can occur when constructing a board or applying moves to
/// it. All of them are raised synchronously at the offending call, before any
/// state is mutated, so a failed operation always leaves the board unchanged.
#[derive(Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that a root, row, column, or move value argument is not in
    /// the valid range for the board in question. For roots this is
    /// [Dimensions::VALID_ROOTS](crate::Dimensions::VALID_ROOTS), for rows and
    /// columns `[1, size]`, and for move values `[0, size]`, where 0 denotes
    /// an empty cell.
    OutOfRange,

    /// Indicates that it was attempted to place a value onto a cell which
    /// already holds one. The occupied cell must be cleared first.
    CellOccupied,

    /// Indicates that it was attempted to place a value which is not in the
    /// target cell's current candidate set, that is, the value already occurs
    /// in the cell's row, column, or block.
    MoveDenied,

    /// Indicates that a group was given more cells than the board size
    /// permits. This is a construction invariant violation and hence a bug,
    /// not a user error; it cannot be raised by a successfully constructed
    /// board.
    GroupFull
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;
