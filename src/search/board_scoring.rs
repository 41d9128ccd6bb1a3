//! Static evaluation shared by the heuristic and minimax engines.
//!
//! Scores are integers in tenths of a pawn. The weights are tunable
//! parameters; only the categories (material, centre, development, pawn
//! advancement, king safety, threats) are fixed.

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::KING_OFFSETS;

/// Tenths of a pawn per unit of classic piece value.
pub const SCORE_SCALE: i32 = 10;
/// Score of a side that is mated at a search node, from the mated side's view.
pub const MATE_SCORE: i32 = 10_000;

pub const CENTER_SQUARES: [Square; 4] = [
    Square { row: 3, col: 3 },
    Square { row: 3, col: 4 },
    Square { row: 4, col: 3 },
    Square { row: 4, col: 4 },
];

/// Classic piece values; the king counts 100 so losing it dominates everything.
#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 100,
    }
}

#[inline]
pub fn is_center(square: Square) -> bool {
    CENTER_SQUARES.contains(&square)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationWeights {
    pub center: i32,
    pub development: i32,
    pub pawn_advance_per_rank: i32,
    pub king_attacked: i32,
    pub king_guard: i32,
    pub threat: i32,
    /// Medium engine: multiplier on captured material.
    pub capture_multiplier: f64,
    /// Medium engine: multiplier on (victim - attacker) when the attacker is cheaper.
    pub trade_up_multiplier: f64,
    pub move_center: f64,
    pub move_development: f64,
    pub move_pawn_advance_per_rank: f64,
    pub move_promotion: f64,
    pub move_jitter: f64,
    /// Medium engine: candidates within this fraction of the best score are eligible.
    pub selection_ratio: f64,
}

impl Default for EvaluationWeights {
    fn default() -> Self {
        Self {
            center: 30,
            development: 20,
            pawn_advance_per_rank: 5,
            king_attacked: -50,
            king_guard: 5,
            threat: 20,
            capture_multiplier: 10.0,
            trade_up_multiplier: 5.0,
            move_center: 3.0,
            move_development: 2.0,
            move_pawn_advance_per_rank: 1.5,
            move_promotion: 50.0,
            move_jitter: 0.5,
            selection_ratio: 0.8,
        }
    }
}

pub trait BoardScorer: Send + Sync {
    /// Score from `perspective`'s point of view: positive is good for that color.
    fn score(&self, board: &Board, perspective: Color) -> i32;
}

/// Material plus positional terms, summed per piece.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer {
    pub weights: EvaluationWeights,
}

impl PositionalScorer {
    pub const fn new(weights: EvaluationWeights) -> Self {
        Self { weights }
    }

    /// Value of one piece on its square: material plus positional bonus.
    pub fn piece_score(&self, board: &Board, square: Square, piece: Piece) -> i32 {
        let w = &self.weights;
        let mut score = piece_value(piece.kind) * SCORE_SCALE;

        if is_center(square) {
            score += w.center;
        }

        match piece.kind {
            PieceKind::Knight | PieceKind::Bishop if square.row != piece.color.back_rank() => {
                score += w.development;
            }
            PieceKind::Pawn => {
                let advanced = square.row.abs_diff(piece.color.pawn_start_row()) as i32;
                score += advanced * w.pawn_advance_per_rank;
            }
            PieceKind::King => {
                if is_square_attacked(board, square, piece.color.opposite()) {
                    score += w.king_attacked;
                }
                let guards = KING_OFFSETS
                    .iter()
                    .filter_map(|&(r, c)| square.offset(r, c))
                    .filter(|sq| matches!(board.piece_at(*sq), Some(p) if p.color == piece.color))
                    .count() as i32;
                score += guards * w.king_guard;
            }
            _ => {}
        }

        let threats = piece
            .kind
            .attack_squares(board, square, piece)
            .into_iter()
            .filter(|sq| board.is_enemy(*sq, piece.color))
            .count() as i32;
        score + threats * w.threat
    }
}

impl BoardScorer for PositionalScorer {
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        Square::all()
            .filter_map(|sq| board.piece_at(sq).map(|p| (sq, p)))
            .map(|(sq, piece)| {
                let value = self.piece_score(board, sq, piece);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

/// Pure material balance; used by tests and as a cheap baseline.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, board: &Board, perspective: Color) -> i32 {
        let side = |color| -> i32 {
            board
                .pieces_of(color)
                .map(|(_, p)| piece_value(p.kind) * SCORE_SCALE)
                .sum()
        };
        side(perspective) - side(perspective.opposite())
    }
}

/// Move-ordering style score used by the medium engine, before jitter.
pub fn heuristic_move_score(mv: &Move, weights: &EvaluationWeights) -> f64 {
    let mut score = 0.0;

    if let Some(victim) = mv.captured {
        let victim_value = f64::from(piece_value(victim.kind));
        let attacker_value = f64::from(piece_value(mv.piece.kind));
        score += victim_value * weights.capture_multiplier;
        if attacker_value < victim_value {
            score += (victim_value - attacker_value) * weights.trade_up_multiplier;
        }
    }

    if is_center(mv.to) {
        score += weights.move_center;
    }

    let back_rank = mv.piece.color.back_rank();
    if mv.piece.kind != PieceKind::Pawn && mv.from.row == back_rank && mv.to.row != back_rank {
        score += weights.move_development;
    }

    if mv.piece.kind == PieceKind::Pawn {
        score += f64::from(mv.from.row.abs_diff(mv.to.row)) * weights.move_pawn_advance_per_rank;
        if mv.to.row == mv.piece.color.promotion_row() {
            score += weights.move_promotion;
        }
    }

    score
}
