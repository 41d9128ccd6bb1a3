//! Pawn movement: pushes, double steps, diagonal captures and en passant.

use crate::game_state::chess_types::*;

/// Pseudo-legal pawn destinations from `from`.
pub fn pawn_destinations(board: &Board, from: Square, pawn: Piece, out: &mut Vec<Square>) {
    let dir = pawn.color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            out.push(one);

            if !pawn.has_moved && from.row == pawn.color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    for to in pawn_attacks(from, pawn.color) {
        if board.is_enemy(to, pawn.color) || is_en_passant_capture(board, from, to, pawn.color) {
            out.push(to);
        }
    }
}

/// Diagonal squares a pawn attacks regardless of what stands there.
pub fn pawn_attacks(from: Square, color: Color) -> impl Iterator<Item = Square> {
    let dir = color.forward();
    [-1i8, 1]
        .into_iter()
        .filter_map(move |d_col| from.offset(dir, d_col))
}

/// True when `to` is the recorded en-passant target diagonally ahead of `from` and the
/// pawn that skipped it stands beside the mover.
pub fn is_en_passant_capture(board: &Board, from: Square, to: Square, color: Color) -> bool {
    if board.en_passant_target != Some(to) {
        return false;
    }
    if to.row as i8 != from.row as i8 + color.forward() || to.col.abs_diff(from.col) != 1 {
        return false;
    }
    let victim_square = Square {
        row: from.row,
        col: to.col,
    };
    matches!(
        board.piece_at(victim_square),
        Some(Piece { kind: PieceKind::Pawn, color: c, .. }) if c != color
    )
}
