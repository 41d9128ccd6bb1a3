//! Per-variant movement capability.
//!
//! Every consumer (legal generation, attack detection, evaluation) goes through
//! these two entry points instead of matching on piece kinds itself.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::king_moves::{king_attacks, king_destinations};
use crate::moves::knight_moves::knight_destinations;
use crate::moves::pawn_moves::{pawn_attacks, pawn_destinations};
use crate::moves::queen_moves::queen_destinations;
use crate::moves::rook_moves::rook_destinations;

impl PieceKind {
    /// Pseudo-legal destinations for `piece` standing on `from`.
    pub fn pseudo_destinations(self, board: &Board, from: Square, piece: Piece) -> Vec<Square> {
        let mut out = Vec::with_capacity(16);
        match self {
            PieceKind::Pawn => pawn_destinations(board, from, piece, &mut out),
            PieceKind::Knight => knight_destinations(board, from, piece.color, &mut out),
            PieceKind::Bishop => bishop_destinations(board, from, piece.color, &mut out),
            PieceKind::Rook => rook_destinations(board, from, piece.color, &mut out),
            PieceKind::Queen => queen_destinations(board, from, piece.color, &mut out),
            PieceKind::King => king_destinations(board, from, piece, &mut out),
        }
        out
    }

    /// Squares attacked by `piece` on `from`: the move set, except pawns only
    /// strike diagonally and kings never castle.
    pub fn attack_squares(self, board: &Board, from: Square, piece: Piece) -> Vec<Square> {
        match self {
            PieceKind::Pawn => pawn_attacks(from, piece.color).collect(),
            PieceKind::King => {
                let mut out = Vec::with_capacity(8);
                king_attacks(board, from, piece.color, &mut out);
                out
            }
            _ => self.pseudo_destinations(board, from, piece),
        }
    }
}
