//! Bishop move generation.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::sliding_moves::generate_sliding_moves;

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

#[inline]
pub fn generate_bishop_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    generate_sliding_moves(position, piece, &BISHOP_DIRECTIONS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_bishop_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square as sq;

    #[test]
    fn bishop_on_open_d4_reaches_thirteen_squares() {
        let mut position = Position::empty();
        let bishop = Piece::new(Color::Light, PieceKind::Bishop, sq("d4").unwrap());
        position.place(bishop);
        let mut out = Vec::new();
        generate_bishop_moves(&position, &bishop, &mut out);
        assert_eq!(out.len(), 13);
    }

    #[test]
    fn bishop_blocker_stops_ray() {
        let mut position = Position::empty();
        let bishop = Piece::new(Color::Light, PieceKind::Bishop, sq("c1").unwrap());
        position.place(bishop);
        position.place(Piece::new(Color::Dark, PieceKind::Knight, sq("e3").unwrap()));
        position.place(Piece::new(Color::Light, PieceKind::Pawn, sq("b2").unwrap()));

        let mut out = Vec::new();
        generate_bishop_moves(&position, &bishop, &mut out);

        assert!(out.contains(&sq("e3").unwrap()));
        assert!(!out.contains(&sq("f4").unwrap()));
        assert!(!out.contains(&sq("b2").unwrap()));
        assert_eq!(out.len(), 2);
    }
}
