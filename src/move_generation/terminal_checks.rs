//! Checkmate, stalemate and bare-king draw detection.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[inline]
pub fn is_checkmate(position: &mut Position, color: Color) -> bool {
    is_check(position, color) && !has_any_legal_move(position, color)
}

#[inline]
pub fn is_stalemate(position: &mut Position, color: Color) -> bool {
    !is_check(position, color) && !has_any_legal_move(position, color)
}

/// Insufficient material, recognised only as a bare king on each side.
pub fn is_draw(position: &Position) -> bool {
    position.piece_count() == 2
        && position
            .pieces()
            .all(|piece| piece.kind == PieceKind::King)
}
