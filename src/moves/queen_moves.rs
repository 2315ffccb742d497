//! Queen moves as the union of bishop and rook rays.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;
use crate::moves::sliding_moves::generate_sliding_moves;

#[inline]
pub fn generate_queen_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    generate_sliding_moves(position, piece, &ROOK_DIRECTIONS, out);
    generate_sliding_moves(position, piece, &BISHOP_DIRECTIONS, out);
}
