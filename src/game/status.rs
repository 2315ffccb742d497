//! Game outcome reported by the controller.

use std::fmt;

use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Bare king against bare king.
    InsufficientMaterial,
    Repetition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
    TimeExpired { loser: Color },
}

impl GameStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(DrawReason::InsufficientMaterial) => write!(f, "draw by insufficient material"),
            GameStatus::Draw(DrawReason::Repetition) => write!(f, "draw by threefold repetition"),
            GameStatus::TimeExpired { loser } => write!(f, "{loser} ran out of time"),
        }
    }
}
