//! Perft node counting used to validate move generation.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::legal_moves;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
    }
}

/// Count leaf nodes `depth` plies below `board` with `side` to move.
pub fn perft(board: &mut Board, side: Color, depth: u8) -> u64 {
    perft_detailed(board, side, depth).nodes
}

pub fn perft_detailed(board: &mut Board, side: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut counts = PerftCounts::default();
    for mv in legal_moves(board, side) {
        if depth == 1 {
            counts.nodes += 1;
            counts.captures += u64::from(mv.is_capture());
            counts.en_passant += u64::from(mv.is_en_passant);
            counts.castles += u64::from(mv.is_castling);
            counts.promotions += u64::from(mv.is_promotion);
            continue;
        }
        let undo = make_move(board, &mv);
        counts.merge(perft_detailed(board, side.opposite(), depth - 1));
        unmake_move(board, undo);
    }
    counts
}
