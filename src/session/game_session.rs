//! Human-versus-computer controller around a single `GameState`.
//!
//! The session owns the board, the configured engine, the click-to-move
//! selection and the bookkeeping done when a game ends: stats, archive,
//! persistence and outcome events. A finished game is reported exactly once.

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::config::EngineConfig;
use crate::engines::difficulty::Difficulty;
use crate::engines::engine_trait::{Engine, GoParams};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::MoveResult;
use crate::session::persistence::{KeyValueStore, MemoryStore, ARCHIVE_KEY, STATS_KEY};
use crate::session::statistics::{
    GameArchive, GameOutcomeEvent, GameRecord, GameResult, PlayerStats, StatisticsRecorder,
};
use crate::utils::history_export::{archive_csv, current_game_csv};

/// What a click on the board did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Game over or not the human's turn.
    Ignored,
    Selected { square: Square, moves: Vec<Square> },
    Moved(MoveResult),
    Cleared,
}

pub struct ChessSession {
    state: GameState,
    config: EngineConfig,
    engine: Box<dyn Engine>,
    selected: Option<Square>,
    valid_moves: Vec<Square>,
    stats: PlayerStats,
    archive: GameArchive,
    store: Box<dyn KeyValueStore>,
    recorders: Vec<Box<dyn StatisticsRecorder>>,
    outcome_reported: bool,
}

impl ChessSession {
    pub fn new(config: EngineConfig) -> Self {
        Self::build(
            config,
            Box::new(MemoryStore::new()),
            PlayerStats::default(),
            GameArchive::default(),
        )
    }

    /// Start a session whose stats and archive live in `store`. Unreadable
    /// entries are logged and replaced by empty ones.
    pub fn with_store(config: EngineConfig, store: Box<dyn KeyValueStore>) -> Self {
        let stats = load_entry(store.as_ref(), STATS_KEY);
        let archive = load_entry(store.as_ref(), ARCHIVE_KEY);
        Self::build(config, store, stats, archive)
    }

    fn build(
        config: EngineConfig,
        store: Box<dyn KeyValueStore>,
        stats: PlayerStats,
        archive: GameArchive,
    ) -> Self {
        let engine = config.difficulty.engine(&config);
        info!(
            difficulty = %config.difficulty,
            human = %config.human_color,
            engine = engine.name(),
            "chess session started"
        );
        Self {
            state: GameState::new_game(),
            config,
            engine,
            selected: None,
            valid_moves: Vec::new(),
            stats,
            archive,
            store,
            recorders: Vec::new(),
            outcome_reported: false,
        }
    }

    pub fn add_recorder(&mut self, recorder: Box<dyn StatisticsRecorder>) {
        self.recorders.push(recorder);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn stats(&self) -> PlayerStats {
        self.stats
    }

    pub fn archive(&self) -> &GameArchive {
        &self.archive
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn valid_moves(&self) -> &[Square] {
        &self.valid_moves
    }

    pub fn human_color(&self) -> Color {
        self.config.human_color
    }

    pub fn ai_color(&self) -> Color {
        self.config.ai_color()
    }

    pub fn new_game(&mut self) {
        self.state.initialize_board();
        self.clear_selection();
        self.outcome_reported = false;
        self.engine.new_game();
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config.difficulty = difficulty;
        self.engine = difficulty.engine(&self.config);
        info!(%difficulty, engine = self.engine.name(), "difficulty changed");
    }

    /// True when the game is running and the computer is on move.
    pub fn ai_to_move(&self) -> bool {
        !self.state.game_over && self.state.current_player == self.ai_color()
    }

    pub fn get_valid_moves(&mut self, square: Square) -> Vec<Square> {
        self.state.get_valid_moves(square)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// Click-to-move: a click on a highlighted destination plays the selected
    /// piece there, a click on one of the human's pieces selects it, anything
    /// else clears the selection.
    pub fn select_square(&mut self, square: Square) -> Selection {
        if self.state.game_over || self.state.current_player != self.human_color() {
            return Selection::Ignored;
        }

        if let Some(from) = self.selected {
            if self.valid_moves.contains(&square) {
                self.clear_selection();
                return match self.apply_move(from, square) {
                    Ok(result) => Selection::Moved(result),
                    Err(err) => {
                        warn!(%from, to = %square, error = %err, "selected move rejected");
                        Selection::Cleared
                    }
                };
            }
        }

        match self.state.board.piece_at(square) {
            Some(piece) if piece.color == self.human_color() => {
                let moves = self.state.get_valid_moves(square);
                self.selected = Some(square);
                self.valid_moves = moves.clone();
                Selection::Selected { square, moves }
            }
            _ => {
                self.clear_selection();
                Selection::Cleared
            }
        }
    }

    /// Play `from -> to` for the human side without going through selection.
    pub fn play_human_move(&mut self, from: Square, to: Square) -> ChessResult<MoveResult> {
        if self.state.game_over {
            return Err(ChessError::GameOver);
        }
        if self.state.current_player != self.human_color() {
            return Err(ChessError::NotYourTurn {
                expected: self.state.current_player,
            });
        }
        self.clear_selection();
        self.apply_move(from, to)
    }

    /// Let the engine answer once. `Ok(None)` when it is not the computer's
    /// turn or the computer has no legal move.
    pub fn play_ai_move(&mut self) -> ChessResult<Option<MoveResult>> {
        if !self.ai_to_move() {
            return Ok(None);
        }
        let side = self.ai_color();
        let output = self
            .engine
            .choose_move(&self.state.board, side, &GoParams::default())
            .map_err(|err| {
                warn!(engine = self.engine.name(), error = %err, "engine failed");
                ChessError::from(err)
            })?;
        for line in &output.info_lines {
            debug!(engine = self.engine.name(), "{line}");
        }

        let Some(mv) = output.best_move else {
            return Ok(None);
        };
        self.apply_move(mv.from, mv.to).map(Some)
    }

    fn apply_move(&mut self, from: Square, to: Square) -> ChessResult<MoveResult> {
        let result = self.state.make_move(from, to)?;
        if self.state.game_over {
            self.finish_game();
        }
        Ok(result)
    }

    fn finish_game(&mut self) {
        if self.outcome_reported {
            return;
        }
        let Some(outcome) = self.state.outcome else {
            return;
        };
        self.outcome_reported = true;

        let result = GameResult::for_player(outcome, self.human_color());
        self.stats.record(result);
        self.archive.push(GameRecord::new(
            outcome,
            self.config.difficulty,
            self.state.move_history.clone(),
            Utc::now(),
        ));
        self.persist();

        let event = GameOutcomeEvent::new(
            result,
            self.state.move_history.len(),
            self.config.difficulty,
        );
        for recorder in &mut self.recorders {
            recorder.record(&event);
        }
        info!(?result, score = event.score, "game result recorded");
    }

    fn persist(&mut self) {
        if let Err(err) = self.try_persist() {
            warn!(error = %err, "could not persist stats or archive");
        }
    }

    fn try_persist(&mut self) -> ChessResult<()> {
        let stats = serde_json::to_string(&self.stats)?;
        let archive = serde_json::to_string(&self.archive)?;
        self.store.set(STATS_KEY, &stats)?;
        self.store.set(ARCHIVE_KEY, &archive)
    }

    pub fn reset_stats(&mut self) {
        self.stats = PlayerStats::default();
        self.persist();
        info!("stats reset");
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.valid_moves.clear();
    }

    /// Replace the current game, e.g. with a loaded one. A game that is
    /// already over is not reported again.
    pub fn restore_state(&mut self, state: GameState) {
        self.outcome_reported = state.game_over;
        self.state = state;
        self.clear_selection();
    }

    pub fn save_game(&mut self, key: &str) -> ChessResult<()> {
        write_game(&self.state, self.store.as_mut(), key)
    }

    /// Save into a store other than the session's own, e.g. a user-chosen directory.
    pub fn save_game_to(&self, store: &mut dyn KeyValueStore, key: &str) -> ChessResult<()> {
        write_game(&self.state, store, key)
    }

    pub fn load_game(&mut self, key: &str) -> ChessResult<()> {
        let state = read_game(self.store.as_ref(), key)?;
        self.restore_state(state);
        Ok(())
    }

    pub fn load_game_from(&mut self, store: &dyn KeyValueStore, key: &str) -> ChessResult<()> {
        let state = read_game(store, key)?;
        self.restore_state(state);
        Ok(())
    }

    pub fn export_current_game_csv(&self) -> String {
        current_game_csv(&self.state.move_history)
    }

    pub fn export_archive_csv(&self) -> String {
        archive_csv(self.archive.games())
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }
}

fn write_game(state: &GameState, store: &mut dyn KeyValueStore, key: &str) -> ChessResult<()> {
    store.set(key, &state.to_json()?)?;
    info!(key, moves = state.move_history.len(), "game saved");
    Ok(())
}

fn read_game(store: &dyn KeyValueStore, key: &str) -> ChessResult<GameState> {
    let text = store
        .get(key)?
        .ok_or_else(|| ChessError::InvalidSetting(format!("no saved game under '{key}'")))?;
    let state = GameState::from_json(&text)?;
    info!(key, moves = state.move_history.len(), "game loaded");
    Ok(state)
}

fn load_entry<T>(store: &dyn KeyValueStore, key: &str) -> T
where
    T: serde::de::DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|err| {
            warn!(key, error = %err, "ignoring unreadable stored entry");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "could not read stored entry");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::GameStatus;
    use crate::session::persistence::DirectoryStore;
    use crate::session::statistics::EventLog;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    fn seeded(difficulty: Difficulty) -> EngineConfig {
        EngineConfig {
            difficulty,
            seed: Some(9),
            ..EngineConfig::default()
        }
    }

    fn session_with_log(config: EngineConfig) -> (ChessSession, EventLog) {
        let mut session = ChessSession::new(config);
        let log = EventLog::default();
        session.add_recorder(Box::new(log.clone()));
        (session, log)
    }

    #[test]
    fn click_select_then_move_then_ai_reply() {
        let (mut session, _) = session_with_log(seeded(Difficulty::Easy));

        match session.select_square(sq("e2")) {
            Selection::Selected { square, moves } => {
                assert_eq!(square, sq("e2"));
                assert_eq!(moves.len(), 2);
                assert!(moves.contains(&sq("e4")));
            }
            other => panic!("expected a selection, got {other:?}"),
        }

        let moved = session.select_square(sq("e4"));
        assert!(matches!(moved, Selection::Moved(ref r) if r.notation == "e4"));
        assert!(session.ai_to_move());
        assert_eq!(session.select_square(sq("d2")), Selection::Ignored);

        let reply = session.play_ai_move().expect("engine").expect("a reply");
        assert_eq!(reply.mv.piece.color, Color::Black);
        assert!(!session.ai_to_move());
        assert_eq!(session.state().move_history.len(), 2);
    }

    #[test]
    fn clicking_elsewhere_clears_the_selection() {
        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        session.select_square(sq("g1"));
        assert_eq!(session.selected(), Some(sq("g1")));
        assert_eq!(session.select_square(sq("e7")), Selection::Cleared);
        assert_eq!(session.selected(), None);
        assert!(session.valid_moves().is_empty());
    }

    #[test]
    fn human_mate_reports_one_win() {
        let (mut session, log) = session_with_log(seeded(Difficulty::Medium));
        session.restore_state(
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen"),
        );

        session.select_square(sq("a1"));
        let moved = session.select_square(sq("a8"));
        match moved {
            Selection::Moved(result) => {
                assert_eq!(result.notation, "Ra8#");
                assert_eq!(
                    result.status,
                    GameStatus::Checkmate {
                        winner: Color::White
                    }
                );
            }
            other => panic!("expected a move, got {other:?}"),
        }

        assert_eq!(session.select_square(sq("g1")), Selection::Ignored);
        assert_eq!(session.play_ai_move().expect("no-op"), None);

        let events = log.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].result, GameResult::Win);
        assert_eq!(events[0].score, 500);
        assert_eq!(events[0].moves_played, 1);
        assert_eq!(session.stats().wins, 1);
        assert_eq!(session.archive().games()[0].result, "1-0");
    }

    #[test]
    fn engine_mate_reports_a_loss() {
        let (mut session, log) = session_with_log(seeded(Difficulty::Hard));
        session.restore_state(
            GameState::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").expect("fen"),
        );
        assert!(session.ai_to_move());

        let reply = session.play_ai_move().expect("engine").expect("a move");
        assert_eq!(reply.notation, "Ra1#");
        assert_eq!(log.events().len(), 1);
        assert_eq!(log.events()[0].result, GameResult::Loss);
        assert_eq!(log.events()[0].score, 0);
        assert_eq!(session.stats().losses, 1);
        assert_eq!(session.archive().games()[0].winner, "Black wins");
    }

    #[test]
    fn stalemate_reports_a_draw() {
        let (mut session, log) = session_with_log(seeded(Difficulty::Medium));
        session.restore_state(GameState::from_fen("k7/8/1K6/8/8/8/8/2Q5 w - - 0 1").expect("fen"));
        session
            .play_human_move(sq("c1"), sq("c7"))
            .expect("legal move");
        assert!(session.state().game_over);
        assert_eq!(log.events()[0].result, GameResult::Draw);
        assert_eq!(log.events()[0].score, 250);
        assert_eq!(session.stats().draws, 1);
        assert_eq!(session.archive().games()[0].result, "1/2-1/2");
    }

    #[test]
    fn human_moves_out_of_turn_are_refused() {
        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        session.play_human_move(sq("e2"), sq("e4")).expect("legal");
        let err = session
            .play_human_move(sq("d2"), sq("d4"))
            .expect_err("computer to move");
        assert!(matches!(err, ChessError::NotYourTurn { .. }));
    }

    #[test]
    fn stats_survive_a_new_session_on_the_same_store() {
        let mut session = ChessSession::new(seeded(Difficulty::Medium));
        session.restore_state(
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen"),
        );
        session.play_human_move(sq("a1"), sq("a8")).expect("mate");

        let store = session.into_store();
        let reopened = ChessSession::with_store(seeded(Difficulty::Medium), store);
        assert_eq!(reopened.stats().wins, 1);
        assert_eq!(reopened.archive().len(), 1);
    }

    #[test]
    fn reset_stats_is_persisted() {
        let mut session = ChessSession::new(seeded(Difficulty::Medium));
        session.restore_state(
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen"),
        );
        session.play_human_move(sq("a1"), sq("a8")).expect("mate");
        assert_eq!(session.stats().wins, 1);

        session.reset_stats();
        assert_eq!(session.stats(), PlayerStats::default());

        let reopened = ChessSession::with_store(seeded(Difficulty::Medium), session.into_store());
        assert_eq!(reopened.stats(), PlayerStats::default());
        assert_eq!(reopened.archive().len(), 1);
    }

    #[test]
    fn legal_moves_cover_the_side_to_move() {
        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        let moves = session.legal_moves();
        assert_eq!(moves.len(), 20);
        assert!(moves.iter().all(|mv| mv.piece.color == Color::White));
    }

    #[test]
    fn games_can_be_saved_to_a_separate_directory() {
        let dir = std::env::temp_dir().join(format!("brain_chess_saves_{}", std::process::id()));
        let mut store = DirectoryStore::open(&dir).expect("open");

        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        session.play_human_move(sq("e2"), sq("e4")).expect("legal");
        session.save_game_to(&mut store, "opening").expect("save");
        assert!(dir.join("opening.json").exists());
        let saved = session.state().clone();

        session.new_game();
        session.load_game_from(&store, "opening").expect("load");
        assert_eq!(session.state(), &saved);
        assert!(session.load_game_from(&store, "absent").is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_and_load_restore_the_game() {
        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        session.play_human_move(sq("e2"), sq("e4")).expect("legal");
        session.save_game("slot1").expect("save");
        let saved = session.state().clone();

        session.new_game();
        assert!(session.state().move_history.is_empty());
        session.load_game("slot1").expect("load");
        assert_eq!(session.state(), &saved);
        assert!(session.load_game("missing").is_err());
    }

    #[test]
    fn loading_a_finished_game_does_not_report_it_again() {
        let (mut session, log) = session_with_log(seeded(Difficulty::Medium));
        session.restore_state(
            GameState::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen"),
        );
        session.play_human_move(sq("a1"), sq("a8")).expect("mate");
        session.save_game("done").expect("save");
        session.load_game("done").expect("load");
        assert_eq!(log.events().len(), 1);
        assert_eq!(session.stats().games_played(), 1);
    }

    #[test]
    fn difficulty_switch_swaps_the_engine() {
        let mut session = ChessSession::new(EngineConfig::default());
        assert_eq!(session.engine_name(), "Heuristic");
        session.set_difficulty(Difficulty::Hard);
        assert_eq!(session.engine_name(), "Minimax");
        assert_eq!(session.config().difficulty, Difficulty::Hard);
    }

    #[test]
    fn human_playing_black_waits_for_the_engine() {
        let config = EngineConfig {
            human_color: Color::Black,
            ..seeded(Difficulty::Easy)
        };
        let mut session = ChessSession::new(config);
        assert!(session.ai_to_move());
        assert_eq!(session.select_square(sq("e7")), Selection::Ignored);
        session.play_ai_move().expect("engine").expect("opening move");
        assert!(!session.ai_to_move());
    }

    #[test]
    fn csv_exports_follow_the_session() {
        let mut session = ChessSession::new(seeded(Difficulty::Easy));
        session.play_human_move(sq("e2"), sq("e4")).expect("legal");
        let csv = session.export_current_game_csv();
        assert!(csv.starts_with("Move Number,White,Black\n1,\"e4\",\"\""));
        assert_eq!(
            session.export_archive_csv(),
            "Date,Result,Winner,Difficulty,Moves\n"
        );
    }
}
