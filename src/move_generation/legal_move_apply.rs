//! In-place make/unmake.
//!
//! The legality filter and the minimax search both mutate one board through
//! `make_move` and restore it through `unmake_move`. Every field `make_move`
//! touches is captured in the returned `UndoState`, so restoring is exact.

use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, PROMOTION_PIECE, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::is_en_passant_capture;

/// Describe the move of whatever stands on `from` to `to`. Does not check legality.
pub fn describe_move(board: &Board, from: Square, to: Square) -> Option<Move> {
    let piece = board.piece_at(from)?;
    let is_pawn = piece.kind == PieceKind::Pawn;

    let is_en_passant = is_pawn && is_en_passant_capture(board, from, to, piece.color);
    let captured = if is_en_passant {
        board.piece_at(Square {
            row: from.row,
            col: to.col,
        })
    } else {
        board.piece_at(to)
    };
    let is_castling = piece.kind == PieceKind::King && from.col.abs_diff(to.col) == 2;
    let is_promotion = is_pawn && to.row == piece.color.promotion_row();

    Some(Move {
        from,
        to,
        piece,
        captured,
        is_en_passant,
        is_castling,
        is_promotion,
        promoted_to: is_promotion.then_some(PROMOTION_PIECE),
    })
}

pub fn make_move(board: &mut Board, mv: &Move) -> UndoState {
    let prev_en_passant_target = board.en_passant_target;
    // `mv` was described from this board, so the square holds `mv.piece`.
    let moved_piece = board.take(mv.from).unwrap_or(mv.piece);

    let captured = if mv.is_en_passant {
        let victim_square = Square {
            row: mv.from.row,
            col: mv.to.col,
        };
        board.take(victim_square).map(|p| (victim_square, p))
    } else {
        board.take(mv.to).map(|p| (mv.to, p))
    };

    let rook_relocation = if mv.is_castling {
        let (rook_col, rook_to_col) = if mv.is_kingside_castle() {
            (KINGSIDE_ROOK_COL, mv.to.col - 1)
        } else {
            (QUEENSIDE_ROOK_COL, mv.to.col + 1)
        };
        let rook_from = Square {
            row: mv.from.row,
            col: rook_col,
        };
        let rook_to = Square {
            row: mv.from.row,
            col: rook_to_col,
        };
        board.take(rook_from).map(|rook| {
            board.place(rook_to, rook.moved());
            (rook_from, rook_to, rook)
        })
    } else {
        None
    };

    let mut placed = moved_piece.moved();
    if let Some(kind) = mv.promoted_to {
        placed.kind = kind;
    }
    board.place(mv.to, placed);

    board.en_passant_target =
        if moved_piece.kind == PieceKind::Pawn && mv.from.row.abs_diff(mv.to.row) == 2 {
            Some(Square {
                row: (mv.from.row + mv.to.row) / 2,
                col: mv.from.col,
            })
        } else {
            None
        };

    UndoState {
        mv: *mv,
        moved_piece,
        captured,
        rook_relocation,
        prev_en_passant_target,
    }
}

pub fn unmake_move(board: &mut Board, undo: UndoState) {
    board.set(undo.mv.to, None);
    board.place(undo.mv.from, undo.moved_piece);

    if let Some((square, piece)) = undo.captured {
        board.place(square, piece);
    }

    if let Some((rook_from, rook_to, rook)) = undo.rook_relocation {
        board.set(rook_to, None);
        board.place(rook_from, rook);
    }

    board.en_passant_target = undo.prev_en_passant_target;
}
