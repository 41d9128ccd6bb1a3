//! Fixed-depth minimax with alpha-beta pruning.
//!
//! The search clones the caller's board once and then works on that single
//! scratch board with `make_move`/`unmake_move`, the same routines the
//! legality filter uses, so sibling branches never see each other's changes.
//! Scores are always from the searching side's point of view: that side
//! maximizes, its opponent minimizes.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{has_any_legal_move, legal_moves};
use crate::search::board_scoring::{BoardScorer, MATE_SCORE};

const INFINITY: i32 = i32::MAX / 2;

#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Plies searched, the root move included.
    pub max_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 3 }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub nodes: u64,
}

/// Pick the best move for `side`. Ties keep the earliest move in generation
/// order, so a given board and depth always yield the same answer.
pub fn minimax_search<S: BoardScorer + ?Sized>(
    board: &Board,
    side: Color,
    scorer: &S,
    config: SearchConfig,
) -> SearchResult {
    let mut scratch = board.clone();
    let mut nodes = 1u64;
    let depth = config.max_depth.max(1);

    let moves = legal_moves(&mut scratch, side);
    if moves.is_empty() {
        return SearchResult {
            best_move: None,
            best_score: terminal_score(&scratch, side, true, 0),
            nodes,
        };
    }

    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let undo = make_move(&mut scratch, &mv);
        let score = minimax(
            &mut scratch,
            scorer,
            side,
            depth - 1,
            false,
            alpha,
            beta,
            1,
            &mut nodes,
        );
        unmake_move(&mut scratch, undo);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
        alpha = alpha.max(score);
    }

    debug_assert_eq!(&scratch, board, "search leaked board state");

    SearchResult {
        best_move: best.map(|(mv, _)| mv),
        best_score: best.map_or(0, |(_, score)| score),
        nodes,
    }
}

#[allow(clippy::too_many_arguments)]
fn minimax<S: BoardScorer + ?Sized>(
    board: &mut Board,
    scorer: &S,
    searching_side: Color,
    depth: u8,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    ply: u8,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;
    let to_move = if maximizing {
        searching_side
    } else {
        searching_side.opposite()
    };

    if depth == 0 {
        // Mates at the horizon must still dominate material.
        if !has_any_legal_move(board, to_move) {
            return terminal_score(board, to_move, maximizing, ply);
        }
        return scorer.score(board, searching_side);
    }

    let moves = legal_moves(board, to_move);
    if moves.is_empty() {
        return terminal_score(board, to_move, maximizing, ply);
    }

    if maximizing {
        let mut value = -INFINITY;
        for mv in moves {
            let undo = make_move(board, &mv);
            let child = minimax(
                board,
                scorer,
                searching_side,
                depth - 1,
                false,
                alpha,
                beta,
                ply + 1,
                nodes,
            );
            unmake_move(board, undo);

            value = value.max(child);
            alpha = alpha.max(value);
            if beta <= alpha {
                break;
            }
        }
        value
    } else {
        let mut value = INFINITY;
        for mv in moves {
            let undo = make_move(board, &mv);
            let child = minimax(
                board,
                scorer,
                searching_side,
                depth - 1,
                true,
                alpha,
                beta,
                ply + 1,
                nodes,
            );
            unmake_move(board, undo);

            value = value.min(child);
            beta = beta.min(value);
            if beta <= alpha {
                break;
            }
        }
        value
    }
}

/// Score of a node where `to_move` has no legal moves: mate against the side to
/// move (nearer mates score further from zero), or zero for stalemate.
fn terminal_score(board: &Board, to_move: Color, maximizing: bool, ply: u8) -> i32 {
    if !is_king_in_check(board, to_move) {
        return 0;
    }
    let mate = MATE_SCORE - i32::from(ply);
    if maximizing {
        -mate
    } else {
        mate
    }
}
