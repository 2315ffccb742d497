//! Rook move generation.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::sliding_moves::generate_sliding_moves;

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[inline]
pub fn generate_rook_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    generate_sliding_moves(position, piece, &ROOK_DIRECTIONS, out);
}
