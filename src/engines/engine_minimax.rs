//! Hard difficulty: deterministic alpha-beta search.

use tracing::debug;

use crate::chess_errors::EngineResult;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::chess_types::{Board, Color};
use crate::search::board_scoring::{EvaluationWeights, PositionalScorer};
use crate::search::minimax::{minimax_search, SearchConfig};

pub struct MinimaxEngine {
    scorer: PositionalScorer,
    depth: u8,
}

impl MinimaxEngine {
    pub fn new(weights: EvaluationWeights, depth: u8) -> Self {
        Self {
            scorer: PositionalScorer::new(weights),
            depth: depth.max(1),
        }
    }
}

impl Default for MinimaxEngine {
    fn default() -> Self {
        Self::new(EvaluationWeights::default(), SearchConfig::default().max_depth)
    }
}

impl Engine for MinimaxEngine {
    fn name(&self) -> &str {
        "Minimax"
    }

    fn choose_move(
        &mut self,
        board: &Board,
        side: Color,
        params: &GoParams,
    ) -> EngineResult<EngineOutput> {
        let depth = params.depth.unwrap_or(self.depth).max(1);
        let result = minimax_search(board, side, &self.scorer, SearchConfig { max_depth: depth });

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "minimax_engine depth {depth} nodes {} score {}",
            result.nodes, result.best_score
        ));

        let Some(best_move) = result.best_move else {
            return Ok(out);
        };

        debug!(
            mv = %best_move,
            score = result.best_score,
            nodes = result.nodes,
            depth,
            "minimax engine finished"
        );
        out.best_move = Some(best_move);
        out.score = Some(result.best_score);
        Ok(out)
    }
}
