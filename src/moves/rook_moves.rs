//! Rook movement: orthogonal slides until blocked.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_destinations, ORTHOGONAL_DIRECTIONS};

pub fn rook_destinations(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    slide_destinations(board, from, color, &ORTHOGONAL_DIRECTIONS, out);
}
