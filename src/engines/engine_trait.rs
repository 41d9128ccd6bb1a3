//! Engine abstraction shared by the three difficulty levels.
//!
//! Every strategy sees the same inputs (a board and the side to move) and
//! produces the same payload, so the session can swap them at runtime behind
//! `Box<dyn Engine>`.

use crate::chess_errors::EngineResult;
use crate::game_state::chess_types::{Board, Color, Move};

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Overrides the configured search depth for engines that search.
    pub depth: Option<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    /// `None` only when the side has no legal moves.
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    /// Choose a move for `side`. The caller's board is never modified.
    fn choose_move(
        &mut self,
        board: &Board,
        side: Color,
        params: &GoParams,
    ) -> EngineResult<EngineOutput>;
}
