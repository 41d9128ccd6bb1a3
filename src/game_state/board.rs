//! Mailbox board: an 8×8 array of optional pieces plus the en-passant target.
//!
//! The board is the only state move generation and search touch. Squares are
//! never created or destroyed, only their occupancy changes.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::BACK_RANK_LAYOUT;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub squares: [[Option<Piece>; 8]; 8],
    /// Square skipped by a pawn's double step on the previous ply.
    pub en_passant_target: Option<Square>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            en_passant_target: None,
        }
    }

    pub fn new_game() -> Self {
        let mut board = Self::new_empty();
        for (col, kind) in BACK_RANK_LAYOUT.iter().enumerate() {
            let col = col as u8;
            for color in [Color::White, Color::Black] {
                board.place(
                    Square { row: color.back_rank(), col },
                    Piece::new(*kind, color),
                );
                board.place(
                    Square { row: color.pawn_start_row(), col },
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    #[inline]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(p) if p.color != color)
    }

    #[inline]
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares[square.row as usize][square.col as usize] = Some(piece);
    }

    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize].take()
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Occupied squares of one color in row-major order.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, kind: PieceKind, color: Color) -> usize {
        self.pieces_of(color).filter(|(_, p)| p.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_board_has_thirty_two_pieces_and_one_king_each() {
        let board = Board::new_game();
        assert_eq!(board.pieces_of(Color::White).count(), 16);
        assert_eq!(board.pieces_of(Color::Black).count(), 16);
        assert_eq!(board.count(PieceKind::King, Color::White), 1);
        assert_eq!(board.count(PieceKind::King, Color::Black), 1);
        assert_eq!(board.find_king(Color::White), Square::new(7, 4));
        assert_eq!(board.find_king(Color::Black), Square::new(0, 4));
        assert_eq!(board.en_passant_target, None);
    }

    #[test]
    fn take_transfers_ownership_out_of_the_square() {
        let mut board = Board::new_game();
        let e2 = Square::new(6, 4).expect("e2");
        let pawn = board.take(e2).expect("pawn on e2");
        assert_eq!(pawn.kind, PieceKind::Pawn);
        assert!(board.is_empty(e2));
    }
}
