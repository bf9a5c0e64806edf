//! Crate root module declarations for the chessbot board core.
//!
//! Exposes the mutable board (`game_state`), the packed move codec (`moves`),
//! and the text helpers for squares, move notation, placements and board
//! dumps (`utils`). Move generation and search live outside this crate and
//! drive the board through `BoardState::apply` / `BoardState::revert`.

pub mod chess_errors;

pub mod game_state {
    pub mod bitboard;
    pub mod board_state;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod move_descriptions;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod render_game_state;
}
