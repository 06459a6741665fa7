//! This module contains the board model: [Cell]s holding a value and a set of
//! legal moves, [Group]s tying the cells of one row, column, or block
//! together, and the [Board] which owns both and applies moves.
//!
//! Cells and groups are stored in flat vectors on the board and reference
//! each other by index, so a cell's three owning groups are three small
//! integers rather than shared mutable references. Change notifications flow
//! from a mutated cell to its groups and only then to the board itself; the
//! board relies on that order when it rebuilds legal-move sets after a
//! retraction.

use serde::{Deserialize, Serialize};

use crate::{Dimensions, index};
use crate::error::{SudokuError, SudokuResult};
use crate::solver;
use crate::solver::Candidates;
use crate::solver::strategy::Strategy;
use crate::util::MoveSet;

/// The index of a cell in the board's flat cell vector. Cells are stored in
/// left-to-right, top-to-bottom order, where rows are together.
pub type CellId = usize;

/// A single move: a value placed on (or cleared from) the cell at the given
/// 1-based coordinates. A value of 0 denotes a retraction, i.e. clearing the
/// cell.
///
/// Moves are the exchange currency of this crate: they are applied in batches
/// by [Board::make_moves], returned by [Board::find_move], and recorded in
/// the board's move log, from which they serialize into the persisted-game
/// format (see [GameRecord]).
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Move {

    /// The 1-based row of the affected cell.
    pub row: usize,

    /// The 1-based column of the affected cell.
    pub col: usize,

    /// The placed value in `1..=size`, or 0 for clearing the cell.
    pub value: usize
}

impl Move {

    /// Creates a new move from its 1-based row and column and the value, with
    /// 0 denoting a retraction.
    pub fn new(row: usize, col: usize, value: usize) -> Move {
        Move {
            row,
            col,
            value
        }
    }

    /// Indicates whether this move clears a cell rather than placing a value.
    pub fn is_clear(&self) -> bool {
        self.value == 0
    }
}

/// A single board position. A cell holds an optional value (0 meaning empty),
/// its immutable 1-based coordinates, and the set of moves currently legal on
/// it. The legal set shrinks whenever one of the cell's three owning groups
/// receives a value and is rebuilt by the board whenever any value is
/// retracted.
///
/// Cells are created by [Board::new] and mutated exclusively through
/// [Board::make_moves]; the public cell API is read-only introspection for
/// rendering and tooling layers.
#[derive(Clone, Debug)]
pub struct Cell {
    dimensions: Dimensions,
    value: usize,
    row: usize,
    col: usize,
    block: usize,
    allowed: MoveSet
}

impl Cell {

    fn new(dimensions: Dimensions, row: usize, col: usize, block: usize)
            -> Cell {
        Cell {
            dimensions,
            value: 0,
            row,
            col,
            block,
            allowed: dimensions.all_moves()
        }
    }

    /// Gets the value held by this cell, or 0 if it is empty.
    pub fn value(&self) -> usize {
        self.value
    }

    /// Indicates whether this cell is empty.
    pub fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Gets the 1-based row this cell belongs to.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Gets the 1-based column this cell belongs to.
    pub fn col(&self) -> usize {
        self.col
    }

    /// Gets the 1-based index of the block this cell belongs to. Blocks are
    /// numbered left-to-right, top-to-bottom, so on a 9x9 board the central
    /// block has index 5.
    pub fn block(&self) -> usize {
        self.block
    }

    /// Gets the set of values that can currently be placed on this cell. For
    /// an occupied cell this set is empty, since the only legal move on it is
    /// clearing.
    pub fn candidate_set(&self) -> MoveSet {
        if self.value == 0 {
            self.allowed
        }
        else {
            MoveSet::new(self.dimensions.size())
        }
    }

    /// Indicates whether the given value is contained in this cell's current
    /// [candidate set](Cell::candidate_set).
    pub fn is_allowed(&self, value: usize) -> bool {
        self.candidate_set().contains(value)
    }

    /// Validates and applies the given value to this cell, returning the
    /// previous value. Group and board bookkeeping is the caller's
    /// responsibility.
    fn place(&mut self, value: usize) -> SudokuResult<usize> {
        let value = self.dimensions.check_value(value)?;

        if self.value != 0 && value != 0 {
            return Err(SudokuError::CellOccupied);
        }

        if value != 0 && !self.allowed.contains(value) {
            return Err(SudokuError::MoveDenied);
        }

        let old_value = self.value;
        self.value = value;
        Ok(old_value)
    }

    fn deny(&mut self, value: usize) {
        self.allowed.remove(value);
    }

    fn allow_all(&mut self) {
        self.allowed = self.dimensions.all_moves();
    }
}

/// The three kinds of cell groups on a board.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupKind {

    /// A horizontal line of cells.
    Row,

    /// A vertical line of cells.
    Column,

    /// A root-by-root sub-grid of cells.
    Block
}

/// A collection of exactly `size` cells forming one row, column, or block.
/// A group tracks the set of values not yet placed in it and knows which
/// board rows and columns its cells span, which is how blocks expose their
/// geometry to the confinement strategy and to tooling.
///
/// Groups do not own their cells; they hold [CellId]s into the board's cell
/// vector, since every cell is shared between one group of each kind.
#[derive(Clone, Debug)]
pub struct Group {
    dimensions: Dimensions,
    kind: GroupKind,
    index: usize,
    cells: Vec<CellId>,
    allowed: MoveSet,
    rows: Vec<usize>,
    cols: Vec<usize>
}

impl Group {

    fn new(dimensions: Dimensions, kind: GroupKind, index: usize) -> Group {
        Group {
            dimensions,
            kind,
            index,
            cells: Vec::with_capacity(dimensions.size()),
            allowed: dimensions.all_moves(),
            rows: Vec::new(),
            cols: Vec::new()
        }
    }

    /// Registers a cell as a member of this group and records the board row
    /// and column it adds to the group's span.
    ///
    /// # Errors
    ///
    /// If the group already holds `size` cells. In that case,
    /// `SudokuError::GroupFull` is returned.
    fn add_cell(&mut self, id: CellId, cell: &Cell) -> SudokuResult<()> {
        if self.cells.len() == self.dimensions.size() {
            return Err(SudokuError::GroupFull);
        }

        self.cells.push(id);

        if !self.rows.contains(&cell.row()) {
            self.rows.push(cell.row());
        }

        if !self.cols.contains(&cell.col()) {
            self.cols.push(cell.col());
        }

        Ok(())
    }

    /// Gets the kind of this group.
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    /// Gets the 1-based index of this group among the groups of its kind.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Gets the ids of the member cells in group-local order: left-to-right
    /// for rows, top-to-bottom for columns, and left-to-right, top-to-bottom
    /// for blocks.
    pub fn cell_ids(&self) -> &[CellId] {
        &self.cells
    }

    /// Gets the set of values not yet placed in this group.
    pub fn allowed_moves(&self) -> MoveSet {
        self.allowed
    }

    /// Gets the sorted 1-based board rows spanned by this group's cells. For
    /// a row group this is just its own index, for a column group all rows;
    /// the interesting case is a block, which spans `root` consecutive rows.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Gets the sorted 1-based board columns spanned by this group's cells,
    /// analogously to [Group::rows].
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Reacts to a value having been placed on a member cell: the value is no
    /// longer legal anywhere in this group. Retractions are deliberately not
    /// handled here, since restoring a value's legality requires inspecting the
    /// other two groups of every member cell, which is the board's global
    /// recompute (see [Board::make_moves]).
    fn cell_changed(&mut self, cells: &mut [Cell], value_placed: usize) {
        self.allowed.remove(value_placed);

        for &id in &self.cells {
            cells[id].deny(value_placed);
        }
    }

    fn allow_all(&mut self) {
        self.allowed = self.dimensions.all_moves();
    }

    /// Searches this group for a hidden single under the given candidate
    /// snapshot: a value which, according to the snapshot, is admitted by
    /// exactly one empty member cell. Values are tried in ascending order and
    /// the first match is returned as a ready-to-apply [Move].
    pub fn find_forced_move(&self, cells: &[Cell], candidates: &Candidates)
            -> Option<Move> {
        for value in self.allowed.iter() {
            let mut unique = None;

            for &id in &self.cells {
                if cells[id].is_empty() && candidates.get(id).contains(value) {
                    if unique.is_none() {
                        unique = Some(id);
                    }
                    else {
                        unique = None;
                        break;
                    }
                }
            }

            if let Some(id) = unique {
                let cell = &cells[id];
                return Some(Move::new(cell.row(), cell.col(), value));
            }
        }

        None
    }
}

/// An N²×N² Sudoku board. The board owns all cells and the row, column, and
/// block groups partitioning them, applies moves, tracks completion, keeps
/// the move log, and runs the deduction pipeline configured at construction.
///
/// A board is created for one game and replaced wholesale for the next; there
/// is no resizing or partial reset beyond placing and clearing values.
#[derive(Clone, Debug)]
pub struct Board {
    dimensions: Dimensions,
    cells: Vec<Cell>,
    rows: Vec<Group>,
    cols: Vec<Group>,
    blocks: Vec<Group>,
    empty_cells: usize,
    moves: Vec<Move>,
    strategies: Vec<Strategy>
}

fn block_of(row: usize, col: usize, root: usize) -> usize {
    (row - 1) / root * root + (col - 1) / root + 1
}

impl Board {

    /// Creates a new, empty board with the given root and the ordered list of
    /// deduction strategies used by [Board::find_move]. The list should start
    /// with [Strategy::Base]; [Strategy::default_pipeline] yields the full
    /// pipeline.
    ///
    /// # Errors
    ///
    /// If `root` is not contained in [Dimensions::VALID_ROOTS]. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn new(root: usize, strategies: Vec<Strategy>) -> SudokuResult<Board> {
        let dimensions = Dimensions::new(root)?;
        let size = dimensions.size();
        let make_groups = |kind| (1..=size)
            .map(|i| Group::new(dimensions, kind, i))
            .collect::<Vec<Group>>();
        let mut rows = make_groups(GroupKind::Row);
        let mut cols = make_groups(GroupKind::Column);
        let mut blocks = make_groups(GroupKind::Block);
        let mut cells = Vec::with_capacity(size * size);

        for row in 1..=size {
            for col in 1..=size {
                let block = block_of(row, col, root);
                let cell = Cell::new(dimensions, row, col, block);
                let id = cells.len();

                rows[row - 1].add_cell(id, &cell)?;
                cols[col - 1].add_cell(id, &cell)?;
                blocks[block - 1].add_cell(id, &cell)?;
                cells.push(cell);
            }
        }

        Ok(Board {
            dimensions,
            cells,
            rows,
            cols,
            blocks,
            empty_cells: size * size,
            moves: Vec::new(),
            strategies
        })
    }

    /// Gets the dimensions of this board.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Gets the size of this board, i.e. the number of rows, columns, and
    /// blocks as well as the number of cells in each of them.
    pub fn size(&self) -> usize {
        self.dimensions.size()
    }

    /// Gets all cells of this board in arena order (left-to-right,
    /// top-to-bottom, where rows are together).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at the given 1-based coordinates.
    ///
    /// # Errors
    ///
    /// If `row` or `col` is not in the range `[1, size]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn cell(&self, row: usize, col: usize) -> SudokuResult<&Cell> {
        let row = self.dimensions.check_index(row)?;
        let col = self.dimensions.check_index(col)?;
        Ok(&self.cells[index(row, col, self.size())])
    }

    /// Gets the row group with the given 1-based index.
    ///
    /// # Errors
    ///
    /// If `index` is not in the range `[1, size]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn row(&self, index: usize) -> SudokuResult<&Group> {
        Ok(&self.rows[self.dimensions.check_index(index)? - 1])
    }

    /// Gets the column group with the given 1-based index.
    ///
    /// # Errors
    ///
    /// If `index` is not in the range `[1, size]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn col(&self, index: usize) -> SudokuResult<&Group> {
        Ok(&self.cols[self.dimensions.check_index(index)? - 1])
    }

    /// Gets the block group with the given 1-based index. Blocks are numbered
    /// left-to-right, top-to-bottom.
    ///
    /// # Errors
    ///
    /// If `index` is not in the range `[1, size]`. In that case,
    /// `SudokuError::OutOfRange` is returned.
    pub fn block(&self, index: usize) -> SudokuResult<&Group> {
        Ok(&self.blocks[self.dimensions.check_index(index)? - 1])
    }

    /// Gets all row groups in index order.
    pub fn rows(&self) -> &[Group] {
        &self.rows
    }

    /// Gets all column groups in index order.
    pub fn cols(&self) -> &[Group] {
        &self.cols
    }

    /// Gets all block groups in index order.
    pub fn blocks(&self) -> &[Group] {
        &self.blocks
    }

    /// Gets an iterator over every group of this board: all rows, then all
    /// columns, then all blocks.
    pub fn all_groups(&self) -> impl Iterator<Item = &Group> {
        self.rows.iter()
            .chain(self.cols.iter())
            .chain(self.blocks.iter())
    }

    /// Gets the ordered strategy list this board runs in [Board::find_move].
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Indicates whether this board is finished, i.e. every cell holds a
    /// value.
    pub fn finished(&self) -> bool {
        self.empty_cells == 0
    }

    /// Gets the number of cells currently empty.
    pub fn empty_cell_count(&self) -> usize {
        self.empty_cells
    }

    /// Gets the move log: every accepted placement and retraction, in order.
    /// The log is append-only and mirrors exactly the sequence of accepted
    /// state changes, which makes it suitable for serialization and replay
    /// (see [Board::record]).
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Applies the given moves in order. Each move is validated against the
    /// current board state: coordinates and value must be in range, a
    /// non-zero value requires an empty target cell and must be contained in
    /// its candidate set, and a zero value clears the cell. Clearing an
    /// already-empty cell is a no-op which notifies nobody and is not logged.
    ///
    /// Placing a value removes it from the legal sets of the cell's row,
    /// column, and block. Clearing a value triggers a full recomputation of
    /// all legal-move sets: every cell and group is reset to the universe
    /// and every placed value is re-announced. That recompute is O(size²),
    /// which is the deliberate simplicity trade-off for the rare retraction
    /// path; restoring legality incrementally would require consulting all
    /// three groups of every affected sibling cell.
    ///
    /// # Errors
    ///
    /// `SudokuError::OutOfRange`, `SudokuError::CellOccupied`, or
    /// `SudokuError::MoveDenied`, raised by the first offending move. The
    /// batch is aborted at that point: moves before the failing one remain
    /// applied, the failing and all later moves are not. Callers that need
    /// atomicity should snapshot [Board::moves] first and restore by replay.
    pub fn make_moves(&mut self, moves: &[Move]) -> SudokuResult<()> {
        for &m in moves {
            self.apply_move(m)?;
        }

        Ok(())
    }

    fn apply_move(&mut self, m: Move) -> SudokuResult<()> {
        let row = self.dimensions.check_index(m.row)?;
        let col = self.dimensions.check_index(m.col)?;
        let id = index(row, col, self.size());

        if m.value == 0 && self.cells[id].is_empty() {
            return Ok(());
        }

        let old_value = self.cells[id].place(m.value)?;
        let placed = m.value != 0;

        if placed {
            // Groups are notified strictly before the board's own
            // bookkeeping; the recompute path re-announces placements through
            // the same calls and depends on this order.
            let block = self.cells[id].block();
            self.rows[row - 1].cell_changed(&mut self.cells, m.value);
            self.cols[col - 1].cell_changed(&mut self.cells, m.value);
            self.blocks[block - 1].cell_changed(&mut self.cells, m.value);
            self.empty_cells -= 1;
        }
        else {
            debug_assert!(old_value != 0);
            self.empty_cells += 1;
            self.recompute_allowed_moves();
        }

        self.moves.push(Move::new(row, col, m.value));
        Ok(())
    }

    /// Rebuilds every legal-move set from scratch: all cells and groups are
    /// reset to the universe, then each placed value is re-announced to its
    /// three groups to re-derive all denials. The empty-cell counter is
    /// re-derived along the way.
    fn recompute_allowed_moves(&mut self) {
        let size = self.size();
        self.empty_cells = size * size;

        for cell in &mut self.cells {
            cell.allow_all();
        }

        for group in self.rows.iter_mut()
                .chain(self.cols.iter_mut())
                .chain(self.blocks.iter_mut()) {
            group.allow_all();
        }

        for id in 0..self.cells.len() {
            let value = self.cells[id].value();

            if value == 0 {
                continue;
            }

            let row = self.cells[id].row();
            let col = self.cells[id].col();
            let block = self.cells[id].block();
            self.rows[row - 1].cell_changed(&mut self.cells, value);
            self.cols[col - 1].cell_changed(&mut self.cells, value);
            self.blocks[block - 1].cell_changed(&mut self.cells, value);
            self.empty_cells -= 1;
        }
    }

    /// Builds the candidate snapshot for the current position: for every
    /// empty cell the intersection of the legal-move sets of its row, column,
    /// and block, and for every occupied cell the empty set. The snapshot is
    /// detached from the board; strategies prune it freely without touching
    /// board state.
    pub fn candidates(&self) -> Candidates {
        Candidates::from_board(self)
    }

    /// Runs the deduction pipeline over the current position and returns at
    /// most one logically certain move, never a guess. The candidate
    /// snapshot is pruned by every registered strategy in order, then scanned
    /// for a naked single (first in arena order) and, failing that, for a
    /// hidden single (first in group-then-value order, rows before columns
    /// before blocks).
    ///
    /// `None` is the normal negative result meaning that the registered
    /// strategies cannot prove any move; the board is left untouched either
    /// way.
    pub fn find_move(&self) -> Option<Move> {
        solver::find_move(self)
    }

    /// Repeatedly applies the moves returned by [Board::find_move] until the
    /// board is finished, in which case `true` is returned, or no further
    /// move can be derived, in which case `false` is returned and the board
    /// remains in the furthest state reached.
    pub fn solve(&mut self) -> bool {
        while !self.finished() {
            match self.find_move() {
                // Forced moves are drawn from the pruned snapshot, which is a
                // subset of the cells' candidate sets, so applying them
                // cannot fail.
                Some(m) => self.make_moves(&[m]).unwrap(),
                None => return false
            }
        }

        true
    }

    /// Captures the persisted-game shape of this board: its root and the
    /// full move log. Replaying the record against a fresh board (see
    /// [GameRecord::replay]) reproduces an identical cell-value grid.
    pub fn record(&self) -> GameRecord {
        GameRecord {
            root: self.dimensions.root(),
            moves: self.moves.clone()
        }
    }
}

/// The persisted-game format: the board root together with the ordered move
/// log, including retractions. The record serializes with serde and is the
/// complete exchange shape consumed and produced by save/load layers; replay
/// reconstructs the board state through the ordinary move path.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct GameRecord {

    /// The root of the recorded board.
    pub root: usize,

    /// Every accepted placement and retraction, in order.
    pub moves: Vec<Move>
}

impl GameRecord {

    /// Constructs a fresh board with this record's root and the given
    /// strategy list, and replays the recorded moves against it in order.
    ///
    /// # Errors
    ///
    /// If the root is invalid or any recorded move fails to apply, which can
    /// only happen for records not produced by [Board::record]. The error of
    /// the offending move is returned.
    pub fn replay(&self, strategies: Vec<Strategy>) -> SudokuResult<Board> {
        let mut board = Board::new(self.root, strategies)?;
        board.make_moves(&self.moves)?;
        Ok(board)
    }
}
