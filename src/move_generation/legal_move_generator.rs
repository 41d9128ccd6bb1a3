//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal destinations from the piece's movement capability, then
//! plays each candidate on the live board, rejects the ones that leave the
//! mover's king attacked, and restores the board before trying the next.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{describe_move, make_move, unmake_move};
use crate::move_generation::legal_move_checks::is_king_in_check;

/// Simulate `from -> to`, test the mover's king, restore. The board is left as found.
pub fn is_move_legal(board: &mut Board, from: Square, to: Square) -> bool {
    let Some(mv) = describe_move(board, from, to) else {
        return false;
    };
    let undo = make_move(board, &mv);
    let legal = !is_king_in_check(board, mv.piece.color);
    unmake_move(board, undo);
    legal
}

/// Legal destinations for the piece on `from`, whichever color it is.
pub fn legal_destinations(board: &mut Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    piece
        .kind
        .pseudo_destinations(board, from, piece)
        .into_iter()
        .filter(|&to| is_move_legal(board, from, to))
        .collect()
}

/// Every legal move for `color`, in row-major order of the moving piece.
pub fn legal_moves(board: &mut Board, color: Color) -> Vec<Move> {
    let origins: Vec<Square> = board.pieces_of(color).map(|(sq, _)| sq).collect();
    let mut out = Vec::with_capacity(48);
    for from in origins {
        for to in legal_destinations(board, from) {
            if let Some(mv) = describe_move(board, from, to) {
                out.push(mv);
            }
        }
    }
    out
}

/// Early-exit variant of `legal_moves(..).is_empty()` used for terminal detection.
pub fn has_any_legal_move(board: &mut Board, color: Color) -> bool {
    let origins: Vec<(Square, Piece)> = board.pieces_of(color).collect();
    origins.into_iter().any(|(from, piece)| {
        piece
            .kind
            .pseudo_destinations(board, from, piece)
            .into_iter()
            .any(|to| is_move_legal(board, from, to))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_square_attacked;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn twenty_moves_from_the_start() {
        let mut board = Board::new_game();
        assert_eq!(legal_moves(&mut board, Color::White).len(), 20);
        assert_eq!(legal_moves(&mut board, Color::Black).len(), 20);
    }

    #[test]
    fn no_legal_move_leaves_own_king_attacked() {
        let positions = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/3q4/4K3 w - - 0 1",
        ];
        for fen in positions {
            let (mut board, side) = parse_fen(fen).expect("fen");
            for mv in legal_moves(&mut board, side) {
                let undo = make_move(&mut board, &mv);
                let king = board.find_king(side).expect("king stays on the board");
                assert!(!is_square_attacked(&board, king, side.opposite()), "{mv} in {fen}");
                unmake_move(&mut board, undo);
            }
        }
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        let (mut board, _) = parse_fen("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1").expect("fen");
        let e2 = Square::new(6, 4).expect("e2");
        assert!(legal_destinations(&mut board, e2).is_empty());
    }

    #[test]
    fn empty_square_has_no_destinations() {
        let mut board = Board::new_game();
        assert!(legal_destinations(&mut board, Square::new(4, 4).expect("e4")).is_empty());
    }

    #[test]
    fn lone_king_without_moves_reports_none() {
        let (mut board, _) = parse_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("fen");
        assert!(!has_any_legal_move(&mut board, Color::Black));
        assert!(has_any_legal_move(&mut board, Color::White));
    }
}
