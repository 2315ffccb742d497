//! Attack and check detection.
//!
//! Attacks are read backwards from the target square with capture patterns,
//! so an empty square is still seen as covered by a pawn diagonal.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;
use crate::moves::sliding_moves::first_blocker;

#[inline]
pub fn king_square(position: &Position, color: Color) -> Option<Square> {
    position.king_square(color)
}

/// True when `color`'s king stands on a square attacked by the other side.
/// A side without a king is never in check.
#[inline]
pub fn is_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = king_square(position, color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

pub fn is_square_attacked(position: &Position, square: Square, attacker_color: Color) -> bool {
    let is_attacker = |target: Option<Square>, kinds: &[PieceKind]| {
        target
            .and_then(|t| position.piece_at(t))
            .is_some_and(|p| p.color == attacker_color && kinds.contains(&p.kind))
    };

    // A pawn attacks diagonally forward, so look one rank behind the target.
    let back = -attacker_color.pawn_direction();
    if is_attacker(square.offset(-1, back), &[PieceKind::Pawn])
        || is_attacker(square.offset(1, back), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| is_attacker(square.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(df, dr)| is_attacker(square.offset(df, dr), &[PieceKind::King]))
    {
        return true;
    }

    let ray_hits = |directions: &[(i8, i8)], kinds: &[PieceKind]| {
        directions.iter().any(|&(df, dr)| {
            first_blocker(position, square, df, dr)
                .is_some_and(|p| p.color == attacker_color && kinds.contains(&p.kind))
        })
    };

    ray_hits(&BISHOP_DIRECTIONS, &[PieceKind::Bishop, PieceKind::Queen])
        || ray_hits(&ROOK_DIRECTIONS, &[PieceKind::Rook, PieceKind::Queen])
}
