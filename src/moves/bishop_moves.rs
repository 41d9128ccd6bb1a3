//! Bishop movement: diagonal slides.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_destinations, DIAGONAL_DIRECTIONS};

pub fn bishop_destinations(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    slide_destinations(board, from, color, &DIAGONAL_DIRECTIONS, out);
}
