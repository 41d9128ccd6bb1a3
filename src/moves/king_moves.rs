//! King steps and castling.
//!
//! Castling is only part of the king's *move* set. Its attack set is plain
//! adjacency, which keeps attack detection from recursing into castling checks.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::{step_destinations, KING_OFFSETS};

pub fn king_destinations(board: &Board, from: Square, king: Piece, out: &mut Vec<Square>) {
    king_attacks(board, from, king.color, out);
    castling_destinations(board, from, king, out);
}

/// Adjacent empty or enemy squares.
#[inline]
pub fn king_attacks(board: &Board, from: Square, color: Color, out: &mut Vec<Square>) {
    step_destinations(board, from, color, &KING_OFFSETS, out);
}

fn castling_destinations(board: &Board, from: Square, king: Piece, out: &mut Vec<Square>) {
    let enemy = king.color.opposite();

    // Cannot castle out of check.
    if king.has_moved || is_square_attacked(board, from, enemy) {
        return;
    }

    for (rook_col, king_step) in [(KINGSIDE_ROOK_COL, 2i8), (QUEENSIDE_ROOK_COL, -2i8)] {
        let rook_square = Square {
            row: from.row,
            col: rook_col,
        };
        let rook_ready = matches!(
            board.piece_at(rook_square),
            Some(Piece { kind: PieceKind::Rook, color, has_moved: false }) if color == king.color
        );
        if !rook_ready {
            continue;
        }

        let (low, high) = if rook_col > from.col {
            (from.col + 1, rook_col)
        } else {
            (rook_col + 1, from.col)
        };
        let path_clear = (low..high).all(|col| board.is_empty(Square { row: from.row, col }));
        if !path_clear {
            continue;
        }

        let Some(destination) = from.offset(0, king_step) else {
            continue;
        };
        let step = king_step.signum();
        let transit_safe = (1..=king_step.abs()).all(|n| {
            from.offset(0, step * n)
                .is_some_and(|sq| !is_square_attacked(board, sq, enemy))
        });
        if transit_safe {
            out.push(destination);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::king_destinations;
    use crate::game_state::chess_types::*;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).expect("square in range")
    }

    fn castling_board() -> Board {
        let mut board = Board::new_empty();
        board.place(sq(7, 4), Piece::new(PieceKind::King, Color::White));
        board.place(sq(7, 7), Piece::new(PieceKind::Rook, Color::White));
        board.place(sq(7, 0), Piece::new(PieceKind::Rook, Color::White));
        board.place(sq(0, 4), Piece::new(PieceKind::King, Color::Black));
        board
    }

    #[test]
    fn both_castles_offered_on_open_back_rank() {
        let board = castling_board();
        let king = board.piece_at(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        king_destinations(&board, sq(7, 4), king, &mut out);
        assert!(out.contains(&sq(7, 6)));
        assert!(out.contains(&sq(7, 2)));
    }

    #[test]
    fn attacked_transit_square_blocks_only_that_side() {
        let mut board = castling_board();
        // Black rook on f8 covers f1.
        board.place(sq(0, 5), Piece::new(PieceKind::Rook, Color::Black));
        let king = board.piece_at(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        king_destinations(&board, sq(7, 4), king, &mut out);
        assert!(!out.contains(&sq(7, 6)));
        assert!(out.contains(&sq(7, 2)));
    }

    #[test]
    fn queenside_needs_b_file_empty_even_though_king_skips_it() {
        let mut board = castling_board();
        board.place(sq(7, 1), Piece::new(PieceKind::Knight, Color::White));
        let king = board.piece_at(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        king_destinations(&board, sq(7, 4), king, &mut out);
        assert!(!out.contains(&sq(7, 2)));
        assert!(out.contains(&sq(7, 6)));
    }

    #[test]
    fn moved_rook_forfeits_its_side() {
        let mut board = castling_board();
        board.place(sq(7, 7), Piece::new(PieceKind::Rook, Color::White).moved());
        let king = board.piece_at(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        king_destinations(&board, sq(7, 4), king, &mut out);
        assert!(!out.contains(&sq(7, 6)));
    }

    #[test]
    fn no_castling_out_of_check() {
        let mut board = castling_board();
        board.place(sq(3, 4), Piece::new(PieceKind::Rook, Color::Black));
        let king = board.piece_at(sq(7, 4)).expect("king");
        let mut out = Vec::new();
        king_destinations(&board, sq(7, 4), king, &mut out);
        assert!(!out.contains(&sq(7, 6)));
        assert!(!out.contains(&sq(7, 2)));
    }
}
