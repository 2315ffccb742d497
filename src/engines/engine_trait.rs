//! Engine abstraction shared by the controller and the background worker.
//!
//! Defines common search parameters so different move-selection strategies
//! can sit behind a single trait interface.

use thiserror::Error;

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::search::iterative_deepening::SearchResult;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("no legal moves available for {0}")]
    NoLegalMoves(Color),
    #[error("invalid engine option {name}={value}")]
    InvalidOption { name: String, value: String },
    #[error("search worker panicked")]
    WorkerPanicked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Overrides the engine's configured depth.
    pub depth: Option<u8>,
    /// Explicit per-move budget.
    pub movetime_ms: Option<u64>,
    /// Mover's remaining clock, budgeted by the engine's time strategy.
    pub remaining_ms: Option<u64>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        Err(EngineError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        params: &SearchParams,
    ) -> Result<SearchResult, EngineError>;
}
