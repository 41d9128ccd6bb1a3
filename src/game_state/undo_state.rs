//! Record of one applied move, enough to restore the board exactly.

use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone)]
pub struct UndoState {
    pub mv: Move,
    /// The mover exactly as it stood on `mv.from`, before `has_moved`/promotion changed it.
    pub moved_piece: Piece,
    /// Captured piece and the square it was removed from (differs from `mv.to` for en passant).
    pub captured: Option<(Square, Piece)>,
    /// Castling rook: origin, destination and the rook as it was.
    pub rook_relocation: Option<(Square, Square, Piece)>,
    pub prev_en_passant_target: Option<Square>,
}
