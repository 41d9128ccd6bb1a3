//! Ray and step walkers shared by the per-piece movement rules.

use crate::game_state::chess_types::*;

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Walk each direction until blocked; a blocking enemy is included, a friend is not.
pub fn slide_destinations(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut cursor = from.offset(d_row, d_col);
        while let Some(sq) = cursor {
            match board.piece_at(sq) {
                None => out.push(sq),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(sq);
                    }
                    break;
                }
            }
            cursor = sq.offset(d_row, d_col);
        }
    }
}

/// Single-step targets that are empty or enemy-occupied.
pub fn step_destinations(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(sq) = from.offset(d_row, d_col) {
            match board.piece_at(sq) {
                Some(p) if p.color == color => {}
                _ => out.push(sq),
            }
        }
    }
}
