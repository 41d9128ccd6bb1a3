//! Queen movement: rook and bishop slides combined.

use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_destinations;
use crate::moves::rook_moves::rook_destinations;

#[inline]
pub fn queen_destinations(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    rook_destinations(board, from, color, out);
    bishop_destinations(board, from, color, out);
}
