//! Medium difficulty: one-ply move scoring with a little randomness.
//!
//! Every legal move gets `heuristic_move_score` plus a small jitter, then one
//! move is drawn uniformly from those scoring at least `selection_ratio` of
//! the best. Strong captures therefore dominate, but quiet positions still
//! produce varied play.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::chess_errors::{EngineError, EngineResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::{Board, Color, Move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::search::board_scoring::{heuristic_move_score, EvaluationWeights};

pub struct HeuristicEngine {
    weights: EvaluationWeights,
    rng: StdRng,
}

impl HeuristicEngine {
    pub fn new(weights: EvaluationWeights) -> Self {
        Self {
            weights,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn with_seed(weights: EvaluationWeights, seed: u64) -> Self {
        Self {
            weights,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn jittered_score(&mut self, mv: &Move) -> f64 {
        let jitter = self.rng.random::<f64>() * self.weights.move_jitter;
        heuristic_move_score(mv, &self.weights) + jitter
    }
}

impl Default for HeuristicEngine {
    fn default() -> Self {
        Self::new(EvaluationWeights::default())
    }
}

impl Engine for HeuristicEngine {
    fn name(&self) -> &str {
        "Heuristic"
    }

    fn choose_move(
        &mut self,
        board: &Board,
        side: Color,
        _params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let mut scratch = board.clone();
        let moves = legal_moves(&mut scratch, side);

        let mut out = EngineOutput::default();
        out.info_lines
            .push(format!("heuristic_engine legal_moves {}", moves.len()));

        if moves.is_empty() {
            return Ok(out);
        }

        let scored: Vec<(Move, f64)> = moves
            .into_iter()
            .map(|mv| {
                let score = self.jittered_score(&mv);
                (mv, score)
            })
            .collect();

        let best = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        let threshold = best * self.weights.selection_ratio;

        let candidates: Vec<&(Move, f64)> = scored
            .iter()
            .filter(|(_, score)| *score >= threshold)
            .collect();

        let (picked, score) = candidates
            .as_slice()
            .choose(&mut self.rng)
            .copied()
            .ok_or(EngineError::SearchFailed)?;

        debug!(
            mv = %picked,
            score,
            candidates = candidates.len(),
            "heuristic engine picked a move"
        );
        out.info_lines.push(format!(
            "heuristic_engine best {best:.1} candidates {}",
            candidates.len()
        ));
        out.best_move = Some(*picked);
        // Reported in the same tenths-of-a-pawn unit as the search.
        out.score = Some(score.round() as i32);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn grabs_the_free_queen() {
        let (board, side) = parse_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").expect("fen");
        for seed in 0..10 {
            let mut engine = HeuristicEngine::with_seed(EvaluationWeights::default(), seed);
            let out = engine
                .choose_move(&board, side, &GoParams::default())
                .expect("engine");
            let mv = out.best_move.expect("a move");
            assert_eq!(mv.to, algebraic_to_square("d5").expect("d5"));
        }
    }

    #[test]
    fn opening_choice_is_legal_and_seeded() {
        let board = Board::new_game();
        let pick = |seed| {
            HeuristicEngine::with_seed(EvaluationWeights::default(), seed)
                .choose_move(&board, Color::White, &GoParams::default())
                .expect("engine")
                .best_move
                .expect("a move")
        };
        let mv = pick(3);
        assert_eq!(mv, pick(3));
        let mut scratch = board.clone();
        assert!(legal_moves(&mut scratch, Color::White).contains(&mv));
    }

    #[test]
    fn equal_captures_share_the_selection_window() {
        // bxa5 and bxc5 both score 71.5; the push and the king steps fall far below 80%.
        let (board, side) = parse_fen("7k/8/8/r1r5/1P6/8/8/7K w - - 0 1").expect("fen");
        let a5 = algebraic_to_square("a5").expect("a5");
        let c5 = algebraic_to_square("c5").expect("c5");

        let mut picked = Vec::new();
        for seed in 0..40 {
            let out = HeuristicEngine::with_seed(EvaluationWeights::default(), seed)
                .choose_move(&board, side, &GoParams::default())
                .expect("engine");
            let mv = out.best_move.expect("a move");
            assert!(mv.is_capture(), "seed {seed} picked quiet move {mv}");
            picked.push(mv.to);
        }

        assert!(picked.contains(&a5));
        assert!(picked.contains(&c5));
        assert!(picked.iter().all(|to| *to == a5 || *to == c5));
    }

    #[test]
    fn promotes_when_it_can() {
        let (board, side) = parse_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").expect("fen");
        let out = HeuristicEngine::with_seed(EvaluationWeights::default(), 11)
            .choose_move(&board, side, &GoParams::default())
            .expect("engine");
        let mv = out.best_move.expect("a move");
        assert!(mv.is_promotion);
    }
}
