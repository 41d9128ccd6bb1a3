//! Easy difficulty: a uniformly random legal move.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chess_errors::{EngineError, EngineResult};
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::{Board, Color};
use crate::move_generation::legal_move_generator::legal_moves;

pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Reproducible move choice for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Random"
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
            .push(format!("random_engine legal_moves {}", moves.len()));

        if moves.is_empty() {
            return Ok(out);
        }

        let picked = moves
            .as_slice()
            .choose(&mut self.rng)
            .ok_or(EngineError::NoLegalMoves(side))?;
        out.best_move = Some(*picked);
        Ok(out)
    }
}
