//! Win/loss bookkeeping and the archive of finished games.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engines::difficulty::Difficulty;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::GameOutcome;

/// Finished games kept in the archive, newest first.
pub const ARCHIVE_CAPACITY: usize = 50;
/// Rough play-time estimate reported with each outcome.
pub const SECONDS_PER_MOVE_ESTIMATE: u32 = 2;

/// Result of a game from the human player's side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    pub fn for_player(outcome: GameOutcome, human: Color) -> Self {
        match outcome {
            GameOutcome::Checkmate { winner } if winner == human => GameResult::Win,
            GameOutcome::Checkmate { .. } => GameResult::Loss,
            GameOutcome::Stalemate => GameResult::Draw,
        }
    }

    pub const fn score(self) -> u32 {
        match self {
            GameResult::Win => 500,
            GameResult::Loss => 0,
            GameResult::Draw => 250,
        }
    }
}

/// Sent once per finished game to every registered recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcomeEvent {
    pub result: GameResult,
    pub score: u32,
    pub moves_played: usize,
    pub estimated_seconds: u32,
    pub difficulty: Difficulty,
}

impl GameOutcomeEvent {
    pub fn new(result: GameResult, moves_played: usize, difficulty: Difficulty) -> Self {
        let estimated_seconds = u32::try_from(moves_played)
            .unwrap_or(u32::MAX)
            .saturating_mul(SECONDS_PER_MOVE_ESTIMATE);
        Self {
            result,
            score: result.score(),
            moves_played,
            estimated_seconds,
            difficulty,
        }
    }
}

/// Receiver of finished-game events, e.g. a remote statistics service.
pub trait StatisticsRecorder: Send {
    fn record(&mut self, event: &GameOutcomeEvent);
}

/// Writes each outcome to the log.
#[derive(Debug, Default)]
pub struct TracingRecorder;

impl StatisticsRecorder for TracingRecorder {
    fn record(&mut self, event: &GameOutcomeEvent) {
        info!(
            result = ?event.result,
            score = event.score,
            moves = event.moves_played,
            difficulty = %event.difficulty,
            "game finished"
        );
    }
}

/// Keeps every event in memory; clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameOutcomeEvent>>>,
}

impl EventLog {
    pub fn events(&self) -> Vec<GameOutcomeEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl StatisticsRecorder for EventLog {
    fn record(&mut self, event: &GameOutcomeEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl PlayerStats {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: DateTime<Utc>,
    /// "1-0", "0-1" or "1/2-1/2".
    pub result: String,
    pub winner: String,
    pub difficulty: Difficulty,
    pub moves: Vec<String>,
}

impl GameRecord {
    pub fn new(
        outcome: GameOutcome,
        difficulty: Difficulty,
        moves: Vec<String>,
        date: DateTime<Utc>,
    ) -> Self {
        let (result, winner) = match outcome {
            GameOutcome::Checkmate {
                winner: Color::White,
            } => ("1-0", "White wins"),
            GameOutcome::Checkmate {
                winner: Color::Black,
            } => ("0-1", "Black wins"),
            GameOutcome::Stalemate => ("1/2-1/2", "Draw"),
        };
        Self {
            date,
            result: result.to_owned(),
            winner: winner.to_owned(),
            difficulty,
            moves,
        }
    }
}

/// Most recent games first, never more than `ARCHIVE_CAPACITY`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameArchive {
    games: Vec<GameRecord>,
}

impl GameArchive {
    pub fn push(&mut self, record: GameRecord) {
        self.games.insert(0, record);
        self.games.truncate(ARCHIVE_CAPACITY);
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_seen_from_the_human_side() {
        let black_mates = GameOutcome::Checkmate {
            winner: Color::Black,
        };
        assert_eq!(GameResult::for_player(black_mates, Color::White), GameResult::Loss);
        assert_eq!(GameResult::for_player(black_mates, Color::Black), GameResult::Win);
        assert_eq!(
            GameResult::for_player(GameOutcome::Stalemate, Color::White),
            GameResult::Draw
        );
        assert_eq!(GameResult::Win.score(), 500);
        assert_eq!(GameResult::Loss.score(), 0);
        assert_eq!(GameResult::Draw.score(), 250);
    }

    #[test]
    fn outcome_event_estimates_two_seconds_per_move() {
        let event = GameOutcomeEvent::new(GameResult::Draw, 12, Difficulty::Easy);
        assert_eq!(event.score, 250);
        assert_eq!(event.estimated_seconds, 24);
    }

    #[test]
    fn archive_keeps_the_newest_fifty() {
        let mut archive = GameArchive::default();
        for n in 0..60 {
            archive.push(GameRecord::new(
                GameOutcome::Stalemate,
                Difficulty::Medium,
                vec![format!("move{n}")],
                Utc::now(),
            ));
        }
        assert_eq!(archive.len(), ARCHIVE_CAPACITY);
        assert_eq!(archive.games()[0].moves, ["move59"]);
        assert_eq!(archive.games()[49].moves, ["move10"]);
    }

    #[test]
    fn record_labels_follow_the_winner() {
        let record = GameRecord::new(
            GameOutcome::Checkmate {
                winner: Color::White,
            },
            Difficulty::Hard,
            Vec::new(),
            Utc::now(),
        );
        assert_eq!(record.result, "1-0");
        assert_eq!(record.winner, "White wins");
    }

    #[test]
    fn event_log_clones_share_events() {
        let log = EventLog::default();
        let mut recorder = log.clone();
        recorder.record(&GameOutcomeEvent::new(GameResult::Win, 3, Difficulty::Easy));
        assert_eq!(log.events().len(), 1);
    }

    #[test]
    fn stats_serialize_as_plain_counts() {
        let mut stats = PlayerStats::default();
        stats.record(GameResult::Win);
        stats.record(GameResult::Draw);
        let text = serde_json::to_string(&stats).expect("json");
        assert_eq!(text, r#"{"wins":1,"losses":0,"draws":1}"#);
        assert_eq!(stats.games_played(), 2);
    }
}
