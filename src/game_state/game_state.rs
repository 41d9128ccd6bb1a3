//! Game state machine.
//!
//! `GameState` owns one board and everything a front end needs to display a
//! game: whose turn it is, check and terminal flags, the notated move history
//! and the captured pieces. `make_move` is the only mutator and either applies
//! a legal move completely or rejects it without touching anything.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{describe_move, make_move};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    has_any_legal_move, legal_destinations, legal_moves,
};
use crate::utils::fen_parser::parse_fen;
use crate::utils::notation::{check_suffix, move_notation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    pub white: Vec<Piece>,
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn of(&self, color: Color) -> &[Piece] {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn push(&mut self, piece: Piece) {
        match piece.color {
            Color::White => self.white.push(piece),
            Color::Black => self.black.push(piece),
        }
    }
}

/// What `make_move` hands back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub mv: Move,
    pub notation: String,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current_player: Color,
    pub is_check: bool,
    pub game_over: bool,
    pub winner: Option<Color>,
    pub outcome: Option<GameOutcome>,
    pub move_history: Vec<String>,
    pub captured_pieces: CapturedPieces,
    pub last_move: Option<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    pub fn new_game() -> Self {
        Self::with_board(Board::new_game(), Color::White)
    }

    /// Start from an arbitrary board; check and terminal flags are computed immediately.
    pub fn with_board(board: Board, current_player: Color) -> Self {
        let mut state = Self {
            board,
            current_player,
            is_check: false,
            game_over: false,
            winner: None,
            outcome: None,
            move_history: Vec::new(),
            captured_pieces: CapturedPieces::default(),
            last_move: None,
        };
        state.refresh_status();
        state
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        let (board, side) = parse_fen(fen)?;
        Ok(Self::with_board(board, side))
    }

    /// Reset to the standard starting position.
    pub fn initialize_board(&mut self) {
        *self = Self::new_game();
        info!("new game initialized");
    }

    /// Legal destinations for the piece on `square` (empty when the square is empty).
    pub fn get_valid_moves(&mut self, square: Square) -> Vec<Square> {
        legal_destinations(&mut self.board, square)
    }

    /// Every legal move for the side to move.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        legal_moves(&mut self.board, self.current_player)
    }

    pub fn is_king_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            Some(GameOutcome::Checkmate { winner }) => GameStatus::Checkmate { winner },
            Some(GameOutcome::Stalemate) => GameStatus::Stalemate,
            None if self.is_check => GameStatus::Check,
            None => GameStatus::Ongoing,
        }
    }

    /// Apply `from -> to` for the side to move. Rejects anything outside the legal
    /// set without mutating state.
    pub fn make_move(&mut self, from: Square, to: Square) -> ChessResult<MoveResult> {
        if self.game_over {
            return Err(ChessError::GameOver);
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(ChessError::NoPieceToMove(from))?;
        if piece.color != self.current_player {
            return Err(ChessError::NotYourTurn {
                expected: self.current_player,
            });
        }
        if !self.get_valid_moves(from).contains(&to) {
            warn!(%from, %to, "rejected illegal move");
            return Err(ChessError::IllegalMove { from, to });
        }
        let mv = describe_move(&self.board, from, to).ok_or(ChessError::NoPieceToMove(from))?;

        make_move(&mut self.board, &mv);
        if let Some(captured) = mv.captured {
            self.captured_pieces.push(captured);
        }

        self.current_player = self.current_player.opposite();
        self.refresh_status();
        self.last_move = Some(mv);

        let is_mate = matches!(self.outcome, Some(GameOutcome::Checkmate { .. }));
        let notation = format!(
            "{}{}",
            move_notation(&mv),
            check_suffix(self.is_check, is_mate)
        );
        self.move_history.push(notation.clone());

        debug!(%mv, notation = %notation, ply = self.move_history.len(), "move applied");
        if let Some(outcome) = self.outcome {
            info!(?outcome, moves = self.move_history.len(), "game over");
        }

        Ok(MoveResult {
            mv,
            notation,
            status: self.status(),
        })
    }

    /// Recompute check and terminal flags for the side to move.
    fn refresh_status(&mut self) {
        self.is_check = is_king_in_check(&self.board, self.current_player);
        if has_any_legal_move(&mut self.board, self.current_player) {
            self.outcome = None;
            self.game_over = false;
            self.winner = None;
            return;
        }

        self.game_over = true;
        if self.is_check {
            let winner = self.current_player.opposite();
            self.outcome = Some(GameOutcome::Checkmate { winner });
            self.winner = Some(winner);
        } else {
            self.outcome = Some(GameOutcome::Stalemate);
            self.winner = None;
        }
    }

    pub fn to_json(&self) -> ChessResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> ChessResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
