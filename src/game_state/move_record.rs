//! Everything needed to take a move back.

use crate::game_state::chess_types::*;

/// Rook relocation that accompanied a castling king move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRecord {
    pub rook_from: Square,
    pub rook_to: Square,
}

/// Single undo record for `play_move` / `unplay_move`.
///
/// Captures the full pre-move snapshot of everything a move can change, so
/// reverting never has to guess at flags or capture squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// Moving piece as it stood before the move.
    pub moved_piece: Piece,
    /// Captured piece with the square it was actually taken from.
    pub captured: Option<Piece>,
    pub prev_has_moved: bool,
    pub prev_en_passant_target: Option<Square>,
    pub en_passant: bool,
    pub castle: Option<CastleRecord>,
    pub promoted: bool,
}

impl MoveRecord {
    #[inline]
    pub fn mover(&self) -> Color {
        self.moved_piece.color
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}
