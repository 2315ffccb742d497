//! Knight jump generation.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub fn generate_knight_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    for &(d_file, d_rank) in &KNIGHT_OFFSETS {
        let Some(target) = piece.square.offset(d_file, d_rank) else {
            continue;
        };
        match position.piece_at(target) {
            Some(occupant) if occupant.color == piece.color => {}
            _ => out.push(target),
        }
    }
}
