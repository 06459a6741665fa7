// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]

//! This crate implements an easy-to-understand Sudoku engine that derives
//! *logically forced* moves. It supports the following key features:
//!
//! * Boards of root 2, 3, and 4 (that is, 4x4, 9x9, and 16x16 grids)
//! * Incremental maintenance of the legal-move sets of every cell and every
//! row, column, and block as values are placed or retracted
//! * A pipeline of deduction [strategies](solver::strategy::Strategy) which
//! prune candidates and yield the next forced move, without guessing or
//! backtracking search
//! * An append-only move log and a serializable [GameRecord] which replays
//! into an identical board, suitable as a persisted-game format
//!
//! Note that this crate is deliberately *not* a brute-force solver: if no
//! registered strategy can prove a move, [Board::find_move] reports that no
//! move was found rather than guessing. It also does not generate puzzles.
//!
//! # Making moves
//!
//! A board is created from its root and an ordered strategy list. Moves are
//! addressed 1-based by row, column, and value, where the value 0 clears a
//! cell.
//!
//! ```
//! use sudoku_deduce::{Board, Move, Strategy};
//!
//! let mut board = Board::new(3, Strategy::default_pipeline()).unwrap();
//!
//! board.make_moves(&[Move::new(1, 3, 4)]).unwrap();
//!
//! assert_eq!(4, board.cell(1, 3).unwrap().value());
//!
//! // 4 is now excluded everywhere in row 1, column 3, and block 1.
//! assert!(!board.cell(1, 5).unwrap().candidate_set().contains(4));
//! assert!(!board.cell(7, 3).unwrap().candidate_set().contains(4));
//! assert!(!board.cell(2, 2).unwrap().candidate_set().contains(4));
//! ```
//!
//! # Finding forced moves
//!
//! [Board::find_move] runs the strategy pipeline over a snapshot of the
//! current candidates and returns at most one certain move. In the position
//! below, the last cell of the first row is the only place a 9 can go.
//!
//! ```
//! use sudoku_deduce::{Board, Move, Strategy};
//!
//! let mut board = Board::new(3, Strategy::default_pipeline()).unwrap();
//! let moves: Vec<Move> = (1..=8).map(|c| Move::new(1, c, c)).collect();
//! board.make_moves(&moves).unwrap();
//!
//! let forced = board.find_move().unwrap();
//! assert_eq!(Move::new(1, 9, 9), forced);
//! ```
//!
//! # Solving
//!
//! [Board::solve] applies forced moves until the board is finished or the
//! pipeline runs dry. Its return value states whether the board was
//! completed; a `false` result means the position requires search, which is
//! out of scope for this engine.
//!
//! # Saving and loading
//!
//! The move log mirrors every accepted placement and retraction.
//! [Board::record] captures it together with the root as a [GameRecord],
//! which serializes with [serde](https://serde.rs/) and replays against a
//! freshly constructed board:
//!
//! ```
//! use sudoku_deduce::{Board, Move, Strategy};
//!
//! let mut board = Board::new(2, Strategy::default_pipeline()).unwrap();
//! board.make_moves(&[Move::new(1, 1, 3), Move::new(4, 4, 3)]).unwrap();
//!
//! let record = board.record();
//! let restored = record.replay(Strategy::default_pipeline()).unwrap();
//!
//! assert_eq!(3, restored.cell(1, 1).unwrap().value());
//! assert_eq!(3, restored.cell(4, 4).unwrap().value());
//! ```

pub mod board;
pub mod error;
pub mod solver;
pub mod util;

#[cfg(test)]
mod random_tests;

pub use board::{Board, Cell, GameRecord, Group, GroupKind, Move};
pub use error::{SudokuError, SudokuResult};
pub use solver::Candidates;
pub use solver::strategy::Strategy;

use crate::util::MoveSet;

/// Computes the arena index of the cell at the given 1-based coordinates on a
/// board of the given size.
pub(crate) fn index(row: usize, col: usize, size: usize) -> usize {
    (row - 1) * size + (col - 1)
}

/// The size parameters of a board and the universe of its legal move values.
/// A `Dimensions` instance is an immutable value object: the root is fixed at
/// construction and everything else is derived from it.
///
/// For an ordinary Sudoku board the root is 3, giving a size of 9, that is, 9
/// rows, columns, and blocks of 9 cells each, filled with the values 1 to 9.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Dimensions {
    root: usize,
    size: usize
}

impl Dimensions {

    /// The roots accepted by [Dimensions::new]. Roots below 2 give degenerate
    /// boards and roots above 4 exceed the `u16` universe of
    /// [MoveSet](crate::util::MoveSet).
    pub const VALID_ROOTS: [usize; 3] = [2, 3, 4];

    /// Creates the dimensions for a board with the given root, which is the
    /// side length of one block.
    ///
    /// # Errors
    ///
    /// If `root` is not contained in [Dimensions::VALID_ROOTS]. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn new(root: usize) -> SudokuResult<Dimensions> {
        if !Dimensions::VALID_ROOTS.contains(&root) {
            return Err(SudokuError::OutOfRange);
        }

        Ok(Dimensions {
            root,
            size: root * root
        })
    }

    /// Gets the root of the board, i.e. the side length of one block.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Gets the size of the board, which is the square of the root. This is
    /// the number of rows, columns, and blocks, the number of cells in each
    /// of them, and the largest legal move value.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets the universe of legal move values, that is, the full set
    /// `1..=size`.
    pub fn all_moves(&self) -> MoveSet {
        MoveSet::full(self.size)
    }

    /// Checks that the given move value is in the range `[0, size]`, where 0
    /// denotes an empty cell, and returns it unchanged.
    ///
    /// # Errors
    ///
    /// If `value > size`. In that case, `SudokuError::OutOfRange` is
    /// returned.
    pub fn check_value(&self, value: usize) -> SudokuResult<usize> {
        if value <= self.size {
            Ok(value)
        }
        else {
            Err(SudokuError::OutOfRange)
        }
    }

    /// Checks that the given 1-based row, column, or block index is in the
    /// range `[1, size]` and returns it unchanged.
    ///
    /// # Errors
    ///
    /// If `index` is 0 or greater than the size. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn check_index(&self, index: usize) -> SudokuResult<usize> {
        if index >= 1 && index <= self.size {
            Ok(index)
        }
        else {
            Err(SudokuError::OutOfRange)
        }
    }
}
