//! Crate root module declarations for the Brain Chess engine.
//!
//! Exposes the rules engine (board, move generation, game state), the three
//! computer opponents, the session controller with its stats and storage,
//! and the notation/export helpers used by the terminal front end.

pub mod chess_errors;
pub mod config;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod undo_state;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod piece_movement;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
}

pub mod search {
    pub mod board_scoring;
    pub mod minimax;
}

pub mod engines {
    pub mod difficulty;
    pub mod engine_heuristic;
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_session;
    pub mod persistence;
    pub mod statistics;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod history_export;
    pub mod notation;
    pub mod render_game_state;
}
