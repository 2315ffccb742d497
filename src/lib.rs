//! Crate root module declarations for the ply_chess rules engine.
//!
//! Exposes the board model, move generation, search, engines and the game
//! controller under stable module paths for the demo binary, benches and
//! embedding front ends.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod move_history;
    pub mod move_record;
    pub mod position;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod pseudo_legal;
    pub mod queen_moves;
    pub mod rook_moves;
    pub mod sliding_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod perft;
    pub mod terminal_checks;
}

pub mod search {
    pub mod board_scoring;
    pub mod iterative_deepening;
    pub mod minimax;
    pub mod move_ordering;
    pub mod position_hash;
    pub mod time_management;
    pub mod transposition_table;
}

pub mod engines {
    pub mod engine_minimax;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod search_task;
}

pub mod game {
    pub mod clocks;
    pub mod errors;
    pub mod game;
    pub mod player;
    pub mod status;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_position;
}
