//! FEN-to-board parser.
//!
//! Builds a mailbox board and side to move from a Forsyth-Edwards Notation
//! string. The board tracks `has_moved` per piece rather than castling rights,
//! so those flags are inferred: pawns off their start rank have moved, and a
//! king or corner rook has moved unless the matching castling right is present.
//! The clock fields are accepted and ignored.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::{KINGSIDE_ROOK_COL, KING_START_COL, QUEENSIDE_ROOK_COL};
use crate::game_state::chess_types::*;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<(Board, Color)> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");

    let mut board = Board::new_empty();
    parse_board(board_part, &mut board)?;
    let side = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut board)?;
    board.en_passant_target = match en_passant_part {
        "-" => None,
        sq => Some(algebraic_to_square(sq)?),
    };

    Ok((board, side))
}

fn invalid(message: impl Into<String>) -> ChessError {
    ChessError::InvalidFen(message.into())
}

fn parse_board(board_part: &str, board: &mut Board) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (row, rank_str) in ranks.iter().enumerate() {
        let mut col = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(format!("invalid empty-square count '{ch}'")));
                }
                col += empty_count as u8;
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(format!("invalid piece character '{ch}'")))?;

            let square = Square::new(row as u8, col)
                .ok_or_else(|| invalid("board rank has too many files"))?;
            let mut piece = Piece::new(kind, color);
            // Kings and rooks start as moved; castling rights clear the flag below.
            piece.has_moved = match kind {
                PieceKind::Pawn => square.row != color.pawn_start_row(),
                PieceKind::King | PieceKind::Rook => true,
                _ => square.row != color.back_rank(),
            };
            board.place(square, piece);
            col += 1;
        }

        if col != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    for color in [Color::White, Color::Black] {
        if board.count(PieceKind::King, color) != 1 {
            return Err(invalid(format!("{color} must have exactly one king")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn apply_castling_rights(castling_part: &str, board: &mut Board) -> ChessResult<()> {
    if castling_part == "-" {
        return Ok(());
    }

    for ch in castling_part.chars() {
        let (color, rook_col) = match ch {
            'K' => (Color::White, KINGSIDE_ROOK_COL),
            'Q' => (Color::White, QUEENSIDE_ROOK_COL),
            'k' => (Color::Black, KINGSIDE_ROOK_COL),
            'q' => (Color::Black, QUEENSIDE_ROOK_COL),
            _ => return Err(invalid(format!("invalid castling rights character: {ch}"))),
        };
        let row = color.back_rank();
        let king_sq = Square { row, col: KING_START_COL };
        let rook_sq = Square { row, col: rook_col };
        match (board.piece_at(king_sq), board.piece_at(rook_sq)) {
            (Some(king), Some(rook))
                if king.kind == PieceKind::King
                    && rook.kind == PieceKind::Rook
                    && king.color == color
                    && rook.color == color =>
            {
                board.place(king_sq, Piece::new(PieceKind::King, color));
                board.place(rook_sq, Piece::new(PieceKind::Rook, color));
            }
            _ => return Err(invalid(format!("castling right '{ch}' without king and rook"))),
        }
    }

    Ok(())
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn starting_fen_matches_the_fresh_board() {
        let (board, side) = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(side, Color::White);
        assert_eq!(board, Board::new_game());
    }

    #[test]
    fn missing_castling_right_marks_king_and_rook_moved() {
        let (board, _) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w Kq - 0 1").expect("fen");
        let flag = |row, col| {
            board
                .piece_at(Square::new(row, col).expect("square"))
                .expect("piece")
                .has_moved
        };
        assert!(!flag(7, 4));
        assert!(!flag(7, 7));
        assert!(flag(7, 0));
        assert!(!flag(0, 0));
        assert!(flag(0, 7));
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("9/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
    }
}
