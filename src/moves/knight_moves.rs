//! Knight movement: the eight fixed jumps.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{step_destinations, KNIGHT_OFFSETS};

pub fn knight_destinations(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    step_destinations(board, from, color, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::knight_destinations;
    use crate::game_state::chess_types::*;

    #[test]
    fn knight_on_d4_has_eight_targets() {
        let mut board = Board::new_empty();
        let d4 = Square::new(4, 3).expect("d4");
        board.place(d4, Piece::new(PieceKind::Knight, Color::White));
        let mut out = Vec::new();
        knight_destinations(&board, d4, Color::White, &mut out);
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn knights_start_with_two_jumps_each() {
        let board = Board::new_game();
        let mut out = Vec::new();
        knight_destinations(&board, Square::new(7, 1).expect("b1"), Color::White, &mut out);
        assert_eq!(out.len(), 2);
    }
}
