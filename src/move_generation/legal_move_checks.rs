//! Attack and check detection.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find_king(color)
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Whether any piece of `attacker_color` has `square` in its attack set.
///
/// Looks outward from the target instead of enumerating every attacker's moves.
/// For any square not held by `attacker_color` the answer matches
/// `!attackers_to_square(..).is_empty()`.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let holds = |sq: Square, kinds: &[PieceKind]| {
        matches!(
            board.piece_at(sq),
            Some(p) if p.color == attacker_color && kinds.contains(&p.kind)
        )
    };

    let behind = -attacker_color.forward();
    for d_col in [-1i8, 1] {
        if let Some(sq) = square.offset(behind, d_col) {
            if holds(sq, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .filter_map(|&(r, c)| square.offset(r, c))
        .any(|sq| holds(sq, &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .filter_map(|&(r, c)| square.offset(r, c))
        .any(|sq| holds(sq, &[PieceKind::King]))
    {
        return true;
    }

    let rays = [
        (&ORTHOGONAL_DIRECTIONS, [PieceKind::Rook, PieceKind::Queen]),
        (&DIAGONAL_DIRECTIONS, [PieceKind::Bishop, PieceKind::Queen]),
    ];
    for (directions, sliders) in rays {
        for &(d_row, d_col) in directions.iter() {
            let mut cursor = square.offset(d_row, d_col);
            while let Some(sq) = cursor {
                if board.piece_at(sq).is_some() {
                    if holds(sq, &sliders) {
                        return true;
                    }
                    break;
                }
                cursor = sq.offset(d_row, d_col);
            }
        }
    }

    false
}

/// Every piece of `attacker_color` whose attack set contains `square`.
pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    board
        .pieces_of(attacker_color)
        .filter(|(from, piece)| {
            piece
                .kind
                .attack_squares(board, *from, *piece)
                .contains(&square)
        })
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}
