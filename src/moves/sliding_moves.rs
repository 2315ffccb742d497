//! Ray walking shared by bishops, rooks and queens.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

/// Walk each direction from `piece`, stopping at the board edge or the first
/// occupied square (kept only when it holds an enemy).
pub fn generate_sliding_moves(
    position: &Position,
    piece: &Piece,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_file, d_rank) in directions {
        let mut cursor = piece.square.offset(d_file, d_rank);
        while let Some(target) = cursor {
            match position.piece_at(target) {
                None => out.push(target),
                Some(occupant) => {
                    if occupant.color != piece.color {
                        out.push(target);
                    }
                    break;
                }
            }
            cursor = target.offset(d_file, d_rank);
        }
    }
}

/// First occupied square along a ray from `origin`, if any.
pub fn first_blocker(position: &Position, origin: Square, d_file: i8, d_rank: i8) -> Option<Piece> {
    let mut cursor = origin.offset(d_file, d_rank);
    while let Some(target) = cursor {
        if let Some(occupant) = position.piece_at(target) {
            return Some(occupant);
        }
        cursor = target.offset(d_file, d_rank);
    }
    None
}
