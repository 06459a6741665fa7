//! This module contains the deduction strategies which prune candidate
//! snapshots for the [pipeline](crate::solver).
//!
//! The strategy set is closed by design: the engine ships exactly the
//! variants of [Strategy], ordered lists of which are handed to
//! [Board::new](crate::Board::new). Every strategy only ever removes
//! candidates that are provably impossible, so adding strategies to a
//! pipeline strictly increases its solving power and can never produce an
//! incorrect deduction.

use crate::board::{Board, CellId, Group};
use crate::solver::Candidates;
use crate::util::MoveSet;

/// A deduction strategy: one rule for removing provably impossible values
/// from a [Candidates] snapshot. Strategies are stateless; their order in
/// the board's pipeline determines the order of pruning, and the pipeline's
/// strength is exactly the union of its members.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Strategy {

    /// The required first member of every pipeline. It prunes nothing: a
    /// board running only this strategy finds exactly the naked and hidden
    /// singles present in the unpruned snapshot.
    Base,

    /// The row/col-confined-in-block rule. For each block and each of its
    /// outstanding values: if all cells of the block admitting that value
    /// lie in a single board row, no cell of that row outside the block can
    /// hold the value; likewise for a single column. When exactly one cell
    /// qualifies, both conditions hold and the row is used.
    ///
    /// As a visualization, if the cells marked A are the only ones of their
    /// block that admit a 5, the cells marked x cannot be a 5:
    ///
    /// ```text
    /// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
    /// ║ A │ A │ A ║ x │ x │ x ║ x │ x │ x ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║ 1 │ 2 │ 3 ║   │   │   ║   │   │   ║
    /// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
    /// ║ 4 │ 6 │ 8 ║   │   │   ║   │   │   ║
    /// ╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝
    /// ```
    LockedCandidates,

    /// The naked subset rule. If exactly `k` empty cells of a group share
    /// one identical candidate set of size `k`, with `2 <= k <= root`, those
    /// `k` values are spoken for and can be removed from every other empty
    /// cell of the group.
    Tuples
}

impl Strategy {

    /// The full pipeline in its canonical order: [Strategy::Base], then
    /// [Strategy::LockedCandidates], then [Strategy::Tuples].
    pub fn default_pipeline() -> Vec<Strategy> {
        vec![
            Strategy::Base,
            Strategy::LockedCandidates,
            Strategy::Tuples
        ]
    }

    /// Applies this strategy to the given snapshot, removing candidates the
    /// rule proves impossible in the board's current position. Candidates
    /// are never added back.
    ///
    /// This method returns `true` if and only if at least one candidate was
    /// removed.
    pub fn reduce(&self, board: &Board, candidates: &mut Candidates) -> bool {
        match self {
            Strategy::Base => false,
            Strategy::LockedCandidates =>
                reduce_locked_candidates(board, candidates),
            Strategy::Tuples => reduce_tuples(board, candidates)
        }
    }
}

/// Removes `value` from the snapshot entries of all empty cells of `line`
/// which do not belong to the block with the given index.
fn deny_outside_block(board: &Board, line: &Group, block_index: usize,
        value: usize, candidates: &mut Candidates) -> bool {
    let mut changed = false;

    for &id in line.cell_ids() {
        let cell = &board.cells()[id];

        if cell.is_empty() && cell.block() != block_index {
            changed |= candidates.get_mut(id).remove(value);
        }
    }

    changed
}

fn reduce_locked_candidates(board: &Board, candidates: &mut Candidates)
        -> bool {
    let mut changed = false;

    for block in board.blocks() {
        for value in block.allowed_moves().iter() {
            let mut rows = Vec::new();
            let mut cols = Vec::new();

            for &id in block.cell_ids() {
                let cell = &board.cells()[id];

                if cell.is_empty() && candidates.get(id).contains(value) {
                    if !rows.contains(&cell.row()) {
                        rows.push(cell.row());
                    }

                    if !cols.contains(&cell.col()) {
                        cols.push(cell.col());
                    }
                }
            }

            if rows.len() == 1 {
                let line = &board.rows()[rows[0] - 1];
                changed |= deny_outside_block(board, line, block.index(),
                    value, candidates);
            }
            else if cols.len() == 1 {
                let line = &board.cols()[cols[0] - 1];
                changed |= deny_outside_block(board, line, block.index(),
                    value, candidates);
            }
        }
    }

    changed
}

fn reduce_tuples(board: &Board, candidates: &mut Candidates) -> bool {
    let root = board.dimensions().root();
    let mut changed = false;

    for group in board.all_groups() {
        let mut tuples: Vec<(MoveSet, Vec<CellId>)> = Vec::new();

        for &id in group.cell_ids() {
            if !board.cells()[id].is_empty() {
                continue;
            }

            let options = candidates.get(id);

            if options.len() < 2 || options.len() > root {
                continue;
            }

            match tuples.iter_mut().find(|(set, _)| *set == options) {
                Some((_, ids)) => ids.push(id),
                None => tuples.push((options, vec![id]))
            }
        }

        for (set, ids) in tuples {
            if ids.len() != set.len() {
                continue;
            }

            for &id in group.cell_ids() {
                if board.cells()[id].is_empty() && !ids.contains(&id) {
                    changed |= candidates.get_mut(id).difference_assign(set);
                }
            }
        }
    }

    changed
}
