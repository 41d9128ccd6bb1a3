//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by game logic, parsing and
//! persistence. Rejected moves never leave partial state behind: by the time a
//! caller sees an error, nothing has been mutated.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Square};

#[derive(Debug, Error)]
pub enum ChessError {
    /// `to` is not among the legal destinations of the piece on `from`.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("no piece on {0}")]
    NoPieceToMove(Square),

    #[error("it is {expected}'s turn")]
    NotYourTurn { expected: Color },

    #[error("the game is already over")]
    GameOver,

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Unrecognised difficulty, color or similar setting.
    #[error("invalid setting: {0}")]
    InvalidSetting(String),

    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures inside a move-choosing engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no legal moves for {0}")]
    NoLegalMoves(Color),

    #[error("search produced no move")]
    SearchFailed,
}

pub type ChessResult<T> = Result<T, ChessError>;
pub type EngineResult<T> = Result<T, EngineError>;
