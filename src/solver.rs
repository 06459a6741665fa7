//! This module contains the deduction pipeline which derives logically
//! forced moves from a board position.
//!
//! The pipeline operates on a [Candidates] snapshot: a detached map from
//! every cell to the values it may still take, built fresh for each
//! deduction pass. Registered [strategies](strategy::Strategy) prune the
//! snapshot in place (they only ever *remove* candidates, and only ones
//! that are provably impossible) and the pruned snapshot is then scanned
//! for a cell whose move is certain. Since all of this happens on the
//! snapshot, finding a move is side-effect-free on the board.
//!
//! The scan recognizes the two single patterns:
//!
//! * a *naked single*, a cell with exactly one remaining candidate, found in
//! arena order, and
//! * a *hidden single*, a value admitted by exactly one empty cell of some
//! group, found in group-then-value order (rows, then columns, then
//! blocks).
//!
//! The strength of the pipeline is exactly the union of its registered
//! strategies: with only [Strategy::Base](strategy::Strategy::Base) it finds
//! singles alone, and every further strategy strictly increases solving
//! power without ever producing an incorrect deduction.

pub mod strategy;

use crate::board::{Board, CellId, Move};
use crate::error::{SudokuError, SudokuResult};
use crate::util::MoveSet;

/// The candidate snapshot a deduction pass works on: one [MoveSet] per cell,
/// holding for every empty cell the values it may still take and for every
/// occupied cell the empty set.
///
/// A snapshot is created by [Board::candidates] from the intersection of the
/// legal-move sets of each cell's row, column, and block. It is not stored
/// on any entity; strategies mutate it freely and it is discarded after the
/// pass.
#[derive(Clone, Debug)]
pub struct Candidates {
    size: usize,
    options: Vec<MoveSet>
}

impl Candidates {

    pub(crate) fn from_board(board: &Board) -> Candidates {
        let size = board.size();
        let empty = MoveSet::new(size);
        let options = board.cells().iter()
            .map(|cell| if cell.is_empty() {
                let row = board.rows()[cell.row() - 1].allowed_moves();
                let col = board.cols()[cell.col() - 1].allowed_moves();
                let block = board.blocks()[cell.block() - 1].allowed_moves();
                row & col & block
            }
            else {
                empty
            })
            .collect();

        Candidates {
            size,
            options
        }
    }

    /// Gets the candidate set of the cell at the given 1-based coordinates.
    /// For occupied cells this is the empty set.
    ///
    /// # Errors
    ///
    /// If `row` or `col` is not in the range `[1, size]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn options(&self, row: usize, col: usize) -> SudokuResult<MoveSet> {
        if row < 1 || row > self.size || col < 1 || col > self.size {
            return Err(SudokuError::OutOfRange);
        }

        Ok(self.options[crate::index(row, col, self.size)])
    }

    /// Gets the candidate set of the cell with the given arena id.
    pub(crate) fn get(&self, id: CellId) -> MoveSet {
        self.options[id]
    }

    /// Gets a mutable reference to the candidate set of the cell with the
    /// given arena id, for strategies to prune.
    pub(crate) fn get_mut(&mut self, id: CellId) -> &mut MoveSet {
        &mut self.options[id]
    }
}

/// Runs the full deduction procedure for [Board::find_move]: build the
/// snapshot, let every registered strategy prune it in order, then scan for
/// a naked single and finally for a hidden single.
pub(crate) fn find_move(board: &Board) -> Option<Move> {
    let mut candidates = board.candidates();

    for strategy in board.strategies() {
        strategy.reduce(board, &mut candidates);
    }

    for (id, cell) in board.cells().iter().enumerate() {
        if cell.is_empty() && candidates.get(id).len() == 1 {
            let value = candidates.get(id).iter().next().unwrap();
            return Some(Move::new(cell.row(), cell.col(), value));
        }
    }

    for group in board.all_groups() {
        if let Some(found) = group.find_forced_move(board.cells(), &candidates) {
            return Some(found);
        }
    }

    None
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::error::SudokuError;
    use crate::solver::strategy::Strategy;

    fn base_board() -> Board {
        Board::new(3, vec![Strategy::Base]).unwrap()
    }

    #[test]
    fn snapshot_intersects_the_three_group_sets() {
        let mut board = base_board();
        board.make_moves(&[Move::new(1, 1, 5)]).unwrap();

        let candidates = board.candidates();

        // The occupied cell has no candidates.
        assert!(candidates.options(1, 1).unwrap().is_empty());

        // A cell sharing a group lost exactly the placed value.
        let mut expected = board.dimensions().all_moves();
        expected.remove(5);
        assert_eq!(expected, candidates.options(1, 2).unwrap());
        assert_eq!(expected, candidates.options(7, 1).unwrap());
        assert_eq!(expected, candidates.options(3, 3).unwrap());

        // An unrelated cell still has the full universe.
        assert_eq!(board.dimensions().all_moves(),
            candidates.options(5, 5).unwrap());

        assert_eq!(Err(SudokuError::OutOfRange), candidates.options(0, 1));
        assert_eq!(Err(SudokuError::OutOfRange), candidates.options(1, 10));
    }

    #[test]
    fn an_empty_board_has_no_forced_move() {
        let mut board = base_board();

        assert_eq!(None, board.find_move());
        assert!(!board.solve());
        assert!(board.moves().is_empty());
    }

    #[test]
    fn the_last_cell_of_a_row_is_forced() {
        let mut board = base_board();
        let moves: Vec<Move> = (1..=8).map(|c| Move::new(1, c, c)).collect();
        board.make_moves(&moves).unwrap();

        assert_eq!(Some(Move::new(1, 9, 9)), board.find_move());
    }

    #[test]
    fn find_move_does_not_mutate_the_board() {
        let mut board = base_board();
        let moves: Vec<Move> = (1..=8).map(|c| Move::new(1, c, c)).collect();
        board.make_moves(&moves).unwrap();

        let first = board.find_move();
        let second = board.find_move();

        assert_eq!(first, second);
        assert_eq!(8, board.moves().len());
        assert_eq!(73, board.empty_cell_count());
    }

    #[test]
    fn a_hidden_single_in_a_row_is_found() {
        let mut board = base_board();
        let mut moves: Vec<Move> =
            (1..=6).map(|c| Move::new(1, c, c)).collect();
        moves.push(Move::new(4, 7, 8));
        moves.push(Move::new(8, 9, 8));
        board.make_moves(&moves).unwrap();

        // Column 7 and column 9 already contain an 8, so within row 1 the 8
        // can only go to column 8, even though that cell has other
        // candidates.
        assert!(board.cell(1, 8).unwrap().candidate_set().len() > 1);
        assert_eq!(Some(Move::new(1, 8, 8)), board.find_move());

        // Applying and retracting the move leads to the same deduction
        // again.
        board.make_moves(&[Move::new(1, 8, 8)]).unwrap();
        board.make_moves(&[Move::new(1, 8, 0)]).unwrap();

        assert_eq!(Some(Move::new(1, 8, 8)), board.find_move());
    }

    #[test]
    fn group_local_search_respects_the_snapshot() {
        let mut board = base_board();
        let moves: Vec<Move> = (1..=6).map(|c| Move::new(1, c, c)).collect();
        board.make_moves(&moves).unwrap();

        let mut candidates = board.candidates();

        // Without pruning, every value of 7..9 fits three cells.
        assert_eq!(None,
            board.row(1).unwrap()
                .find_forced_move(board.cells(), &candidates));

        // Pruning the 8 from columns 7 and 9 makes it unique in the row.
        candidates.get_mut(crate::index(1, 7, 9)).remove(8);
        candidates.get_mut(crate::index(1, 9, 9)).remove(8);

        assert_eq!(Some(Move::new(1, 8, 8)),
            board.row(1).unwrap()
                .find_forced_move(board.cells(), &candidates));
    }

    #[test]
    fn crossing_exclusions_force_a_hidden_single_in_a_block() {
        let mut board = base_board();
        board.make_moves(&[
            Move::new(1, 1, 1),
            Move::new(4, 3, 1),
            Move::new(7, 4, 1),
            Move::new(9, 9, 1)
        ]).unwrap();

        // Block 7 has no 1 yet, and the cell at (8, 2) is the only one in it
        // that still admits one.
        assert!(board.block(7).unwrap().allowed_moves().contains(1));
        assert!(board.cell(8, 2).unwrap().is_allowed(1));
        assert!(!board.cell(8, 1).unwrap().is_allowed(1));
        assert!(!board.cell(8, 3).unwrap().is_allowed(1));

        for &row in &[7, 9] {
            for col in 1..=3 {
                assert!(!board.cell(row, col).unwrap().is_allowed(1));
            }
        }

        assert_eq!(Some(Move::new(8, 2, 1)), board.find_move());

        // The full pipeline agrees; the extra strategies have nothing to
        // prune here.
        let replayed = board.record()
            .replay(Strategy::default_pipeline())
            .unwrap();

        assert_eq!(Some(Move::new(8, 2, 1)), replayed.find_move());
    }

    #[test]
    fn solve_completes_a_singles_puzzle() {
        // The solution grid with its main diagonal removed; every hole is a
        // naked single.
        let mut board = Board::new(2, Strategy::default_pipeline()).unwrap();
        board.make_moves(&[
            Move::new(1, 2, 2), Move::new(1, 3, 3), Move::new(1, 4, 4),
            Move::new(2, 1, 3), Move::new(2, 3, 1), Move::new(2, 4, 2),
            Move::new(3, 1, 2), Move::new(3, 2, 1), Move::new(3, 4, 3),
            Move::new(4, 1, 4), Move::new(4, 2, 3), Move::new(4, 3, 2)
        ]).unwrap();

        assert!(board.solve());
        assert!(board.finished());
        assert_eq!(1, board.cell(1, 1).unwrap().value());
        assert_eq!(4, board.cell(2, 2).unwrap().value());
        assert_eq!(4, board.cell(3, 3).unwrap().value());
        assert_eq!(1, board.cell(4, 4).unwrap().value());
        assert_eq!(16, board.moves().len());
    }

    #[test]
    fn solve_stops_when_no_strategy_fires() {
        let mut board = base_board();
        board.make_moves(&[Move::new(5, 5, 5)]).unwrap();

        assert!(!board.solve());
        assert!(!board.finished());
        assert_eq!(1, board.moves().len());
    }
}
