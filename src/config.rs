//! Runtime configuration for a chess session.
//!
//! Every field has a default, so a JSON file only needs the keys it changes.
//! The binary layers command-line flags on top of whatever the file provides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessResult;
use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::Color;
use crate::search::board_scoring::EvaluationWeights;

pub const DEFAULT_AI_REPLY_DELAY_MS: u64 = 500;
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub difficulty: Difficulty,
    pub human_color: Color,
    /// Pause before the computer answers, applied by the front end.
    pub ai_reply_delay_ms: u64,
    /// Plies searched by the hard engine, the root move included.
    pub search_depth: u8,
    /// Fixes the random stream of the easy and medium engines.
    pub seed: Option<u64>,
    pub weights: EvaluationWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Medium,
            human_color: Color::White,
            ai_reply_delay_ms: DEFAULT_AI_REPLY_DELAY_MS,
            search_depth: DEFAULT_SEARCH_DEPTH,
            seed: None,
            weights: EvaluationWeights::default(),
        }
    }
}

impl EngineConfig {
    pub fn ai_color(&self) -> Color {
        self.human_color.opposite()
    }

    pub fn from_json_str(text: &str) -> ChessResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> ChessResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
