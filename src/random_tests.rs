//! Randomized consistency tests. Boards are driven through random legal
//! move sequences from seeded RNGs, so every run exercises the same walks.

use crate::board::{Board, Move};
use crate::solver::strategy::Strategy;
use crate::util::MoveSet;

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const WALKS_PER_ROOT: u64 = 8;
const MOVES_PER_WALK: usize = 30;

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Applies up to `limit` random moves to a fresh board of the given root,
/// each drawn from the candidate set of a random open cell, so every single
/// move is legal at the time it is made.
fn random_walk(root: usize, rng: &mut ChaCha8Rng, limit: usize) -> Board {
    let mut board = Board::new(root, Strategy::default_pipeline()).unwrap();

    for _ in 0..limit {
        let open: Vec<(usize, usize, MoveSet)> = board.cells().iter()
            .filter(|c| c.is_empty() && !c.candidate_set().is_empty())
            .map(|c| (c.row(), c.col(), c.candidate_set()))
            .collect();

        if open.is_empty() {
            break;
        }

        let (row, col, options) = open[rng.gen_range(0..open.len())];
        let values: Vec<usize> = options.iter().collect();
        let value = values[rng.gen_range(0..values.len())];
        board.make_moves(&[Move::new(row, col, value)]).unwrap();
    }

    board
}

fn assert_no_group_duplicates(board: &Board) {
    for group in board.all_groups() {
        let mut seen = MoveSet::new(board.size());

        for &id in group.cell_ids() {
            let value = board.cells()[id].value();

            if value != 0 {
                assert!(seen.insert(value),
                    "duplicate {} in {:?} {}", value, group.kind(),
                    group.index());
            }
        }
    }
}

#[test]
fn random_walks_preserve_uniqueness() {
    for &root in &[2, 3] {
        for walk in 0..WALKS_PER_ROOT {
            let mut rng = rng(walk);
            let board = random_walk(root, &mut rng, MOVES_PER_WALK);
            assert_no_group_duplicates(&board);
        }
    }
}

#[test]
fn strategies_are_monotone_on_random_positions() {
    for walk in 0..WALKS_PER_ROOT {
        let mut rng = rng(0x100 + walk);
        let board = random_walk(3, &mut rng, MOVES_PER_WALK);
        let base = board.candidates();
        let mut reduced = board.candidates();

        for strategy in board.strategies() {
            strategy.reduce(&board, &mut reduced);
        }

        for id in 0..board.cells().len() {
            assert!(reduced.get(id).is_subset(base.get(id)));
        }

        // If the pruned snapshot yields a move, it is a move the unpruned
        // snapshot already considered legal.
        if let Some(found) = board.find_move() {
            let cell = board.cell(found.row, found.col).unwrap();

            assert!(cell.is_empty());
            assert!(cell.is_allowed(found.value));
            assert!(base.options(found.row, found.col).unwrap()
                .contains(found.value));
        }
    }
}

#[test]
fn forced_moves_stay_legal_until_the_pipeline_runs_dry() {
    for walk in 0..WALKS_PER_ROOT {
        let mut rng = rng(0x200 + walk);
        let mut board = random_walk(3, &mut rng, MOVES_PER_WALK);

        while let Some(found) = board.find_move() {
            assert!(board.cell(found.row, found.col).unwrap()
                .is_allowed(found.value));
            board.make_moves(&[found]).unwrap();
        }

        assert_no_group_duplicates(&board);
    }
}

#[test]
fn retraction_recompute_matches_a_fresh_derivation() {
    for walk in 0..WALKS_PER_ROOT {
        let mut rng = rng(0x300 + walk);
        let mut board = random_walk(3, &mut rng, MOVES_PER_WALK);
        let placed: Vec<Move> = board.cells().iter()
            .filter(|c| !c.is_empty())
            .map(|c| Move::new(c.row(), c.col(), c.value()))
            .collect();

        // Clear a random placed cell and place its value back again, which
        // funnels the board through the full recompute path.
        let cleared = placed[rng.gen_range(0..placed.len())];
        board.make_moves(&[
            Move::new(cleared.row, cleared.col, 0),
            cleared
        ]).unwrap();

        // A board that never saw the retraction derives the same state.
        let mut reference =
            Board::new(3, Strategy::default_pipeline()).unwrap();
        reference.make_moves(&placed).unwrap();

        for (cell, reference_cell) in
                board.cells().iter().zip(reference.cells().iter()) {
            assert_eq!(reference_cell.value(), cell.value());
            assert_eq!(reference_cell.candidate_set(), cell.candidate_set());
        }

        for (group, reference_group) in
                board.all_groups().zip(reference.all_groups()) {
            assert_eq!(reference_group.allowed_moves(),
                group.allowed_moves());
        }
    }
}
