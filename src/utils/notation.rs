//! SAN-like move text for the move history.
//!
//! No disambiguation beyond the pawn-capture file; the check (`+`) and mate
//! (`#`) suffixes are appended by the caller once the resulting state is known.

use crate::game_state::chess_types::*;

pub fn move_notation(mv: &Move) -> String {
    if mv.is_castling {
        return if mv.is_kingside_castle() { "O-O" } else { "O-O-O" }.to_owned();
    }

    let mut out = String::with_capacity(8);
    out.push_str(mv.piece.kind.notation_letter());

    if mv.is_capture() || mv.is_en_passant {
        if mv.piece.kind == PieceKind::Pawn {
            out.push(char::from(b'a' + mv.from.col));
        }
        out.push('x');
    }

    out.push_str(&mv.to.to_string());

    if let Some(kind) = mv.promoted_to {
        out.push('=');
        out.push_str(kind.notation_letter());
    }

    out
}

/// Suffix for the position reached after a move.
#[inline]
pub const fn check_suffix(gives_check: bool, is_mate: bool) -> &'static str {
    match (gives_check, is_mate) {
        (true, true) => "#",
        (true, false) => "+",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_apply::describe_move;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    fn notation(fen: &str, from: &str, to: &str) -> String {
        let (board, _) = parse_fen(fen).expect("fen");
        let mv = describe_move(
            &board,
            algebraic_to_square(from).expect("from"),
            algebraic_to_square(to).expect("to"),
        )
        .expect("piece on from");
        move_notation(&mv)
    }

    #[test]
    fn quiet_moves() {
        let start = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(notation(start, "e2", "e4"), "e4");
        assert_eq!(notation(start, "g1", "f3"), "Nf3");
    }

    #[test]
    fn captures_and_en_passant() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        assert_eq!(notation(fen, "e5", "f6"), "exf6");
        let fen = "4k3/8/8/3p4/4P3/8/8/4K2R w K - 0 1";
        assert_eq!(notation(fen, "e4", "d5"), "exd5");
    }

    #[test]
    fn castling_and_promotion() {
        let fen = "r3k2r/1P6/8/8/8/8/8/R3K2R w KQkq - 0 1";
        assert_eq!(notation(fen, "e1", "g1"), "O-O");
        assert_eq!(notation(fen, "e1", "c1"), "O-O-O");
        assert_eq!(notation(fen, "b7", "a8"), "bxa8=Q");
        assert_eq!(notation(fen, "b7", "b8"), "b8=Q");
    }

    #[test]
    fn suffixes() {
        assert_eq!(check_suffix(false, false), "");
        assert_eq!(check_suffix(true, false), "+");
        assert_eq!(check_suffix(true, true), "#");
    }
}
