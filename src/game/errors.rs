//! Errors returned by rejected controller operations.

use thiserror::Error;

use crate::engines::engine_trait::EngineError;
use crate::game_state::chess_types::Square;

/// Rejected controller operations. Every rejection leaves the game unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },
    #[error("no piece of the side to move is selected")]
    NoPieceSelected,
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("the game is over")]
    GameOver,
    #[error("a computer search is already running")]
    SearchInFlight,
    #[error("no computer search is pending")]
    NoSearchPending,
    #[error("the side to move is not a computer player")]
    NotComputerTurn,
    #[error(transparent)]
    Engine(#[from] EngineError),
}
