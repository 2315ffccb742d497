//! King step and castling candidate generation.
//!
//! Castling candidates here only check that the king and the corner rook are
//! unmoved and the squares between them are empty. Attack safety is left to
//! the legality filter.

use crate::game_state::chess_rules::CASTLING_ROOK_FILES;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub fn generate_king_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    for &(d_file, d_rank) in &KING_OFFSETS {
        let Some(target) = piece.square.offset(d_file, d_rank) else {
            continue;
        };
        match position.piece_at(target) {
            Some(occupant) if occupant.color == piece.color => {}
            _ => out.push(target),
        }
    }

    generate_castling_candidates(position, piece, out);
}

fn generate_castling_candidates(position: &Position, king: &Piece, out: &mut Vec<Square>) {
    if king.has_moved {
        return;
    }

    for rook_file in CASTLING_ROOK_FILES {
        let Some(rook_square) = Square::new(rook_file as i8, king.square.rank() as i8) else {
            continue;
        };
        let rook_ready = matches!(
            position.piece_at(rook_square),
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
        );
        if !rook_ready {
            continue;
        }

        let step: i8 = if rook_file < king.square.file() { -1 } else { 1 };
        if !path_is_clear(position, king.square, rook_square, step) {
            continue;
        }

        if let Some(target) = king.square.offset(2 * step, 0) {
            out.push(target);
        }
    }
}

fn path_is_clear(position: &Position, from: Square, to: Square, step: i8) -> bool {
    let mut cursor = from.offset(step, 0);
    while let Some(square) = cursor {
        if square == to {
            return true;
        }
        if !position.is_empty(square) {
            return false;
        }
        cursor = square.offset(step, 0);
    }
    false
}

/// True when a king move from `from` to `to` is a castle.
#[inline]
pub fn is_castling_step(from: Square, to: Square) -> bool {
    from.rank() == to.rank() && from.file().abs_diff(to.file()) == 2
}

/// Rook relocation for a castling king move, derived from the king's path.
pub fn castling_rook_squares(king_from: Square, king_to: Square) -> Option<(Square, Square)> {
    if !is_castling_step(king_from, king_to) {
        return None;
    }
    let rank = king_from.rank() as i8;
    if king_to.file() < king_from.file() {
        Some((Square::new(0, rank)?, king_to.offset(1, 0)?))
    } else {
        Some((Square::new(7, rank)?, king_to.offset(-1, 0)?))
    }
}
