//! Difficulty levels and the engine each one plays with.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chess_errors::ChessError;
use crate::config::EngineConfig;
use crate::engines::engine_heuristic::HeuristicEngine;
use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Build the strategy for this level. A configured seed makes the
    /// randomized levels reproducible; the hard level ignores it.
    pub fn engine(self, config: &EngineConfig) -> Box<dyn Engine> {
        match self {
            Difficulty::Easy => Box::new(match config.seed {
                Some(seed) => RandomEngine::with_seed(seed),
                None => RandomEngine::new(),
            }),
            Difficulty::Medium => Box::new(match config.seed {
                Some(seed) => HeuristicEngine::with_seed(config.weights, seed),
                None => HeuristicEngine::new(config.weights),
            }),
            Difficulty::Hard => Box::new(MinimaxEngine::new(config.weights, config.search_depth)),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| ChessError::InvalidSetting(format!("unknown difficulty '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("HARD".parse::<Difficulty>().expect("hard"), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().expect("easy"), Difficulty::Easy);
        assert!("grandmaster".parse::<Difficulty>().is_err());
    }

    #[test]
    fn each_level_gets_its_own_engine() {
        let config = EngineConfig::default();
        let names: Vec<String> = Difficulty::ALL
            .into_iter()
            .map(|level| level.engine(&config).name().to_owned())
            .collect();
        assert_eq!(names, ["Random", "Heuristic", "Minimax"]);
    }

    #[test]
    fn serializes_lowercase() {
        let text = serde_json::to_string(&Difficulty::Medium).expect("json");
        assert_eq!(text, "\"medium\"");
    }
}
