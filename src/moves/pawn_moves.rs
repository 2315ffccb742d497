//! Pawn pushes and captures, including the en-passant diagonal.

use crate::game_state::chess_rules::{en_passant_capture_rank, pawn_start_rank};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

pub fn generate_pawn_moves(position: &Position, piece: &Piece, out: &mut Vec<Square>) {
    let forward = piece.color.pawn_direction();

    if let Some(one_step) = piece.square.offset(0, forward) {
        if position.is_empty(one_step) {
            out.push(one_step);

            if !piece.has_moved && piece.square.rank() == pawn_start_rank(piece.color) {
                if let Some(two_step) = one_step.offset(0, forward) {
                    if position.is_empty(two_step) {
                        out.push(two_step);
                    }
                }
            }
        }
    }

    for d_file in [-1, 1] {
        let Some(target) = piece.square.offset(d_file, forward) else {
            continue;
        };
        match position.piece_at(target) {
            Some(occupant) if occupant.color != piece.color => out.push(target),
            Some(_) => {}
            None => {
                if is_en_passant_target(position, piece.color, target) {
                    out.push(target);
                }
            }
        }
    }
}

#[inline]
fn is_en_passant_target(position: &Position, color: Color, target: Square) -> bool {
    position.en_passant_target() == Some(target) && target.rank() == en_passant_capture_rank(color)
}

/// Squares a pawn of `color` on `square` attacks, regardless of occupancy.
pub fn pawn_attack_squares(color: Color, square: Square) -> impl Iterator<Item = Square> {
    let forward = color.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(move |d_file| square.offset(d_file, forward))
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square as sq;

    fn targets(position: &Position, from: &str) -> Vec<Square> {
        let pawn = position.piece_at(sq(from).unwrap()).expect("pawn present");
        let mut out = Vec::new();
        generate_pawn_moves(position, &pawn, &mut out);
        out.sort();
        out
    }

    #[test]
    fn unmoved_pawn_has_single_and_double_step() {
        let position = Position::starting();
        assert_eq!(targets(&position, "e2"), vec![sq("e3").unwrap(), sq("e4").unwrap()]);
        assert_eq!(targets(&position, "d7"), vec![sq("d5").unwrap(), sq("d6").unwrap()]);
    }

    #[test]
    fn blocked_pawn_cannot_jump() {
        let mut position = Position::starting();
        position.place(Piece::new(Color::Dark, PieceKind::Knight, sq("e3").unwrap()));
        assert!(targets(&position, "e2").is_empty());
        assert_eq!(
            targets(&position, "d2"),
            vec![sq("d3").unwrap(), sq("d4").unwrap(), sq("e3").unwrap()]
        );
    }

    #[test]
    fn moved_pawn_steps_once() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Light, PieceKind::Pawn, sq("a3").unwrap()).moved());
        assert_eq!(targets(&position, "a3"), vec![sq("a4").unwrap()]);
    }

    #[test]
    fn en_passant_target_is_a_capture_square() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Light, PieceKind::Pawn, sq("e5").unwrap()).moved());
        position.place(Piece::new(Color::Dark, PieceKind::Pawn, sq("d7").unwrap()));
        position.move_piece(sq("d7").unwrap(), sq("d5").unwrap());

        let moves = targets(&position, "e5");
        assert!(moves.contains(&sq("d6").unwrap()));
        assert!(moves.contains(&sq("e6").unwrap()));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn own_double_step_target_is_not_capturable_by_own_pawns() {
        let mut position = Position::empty();
        position.place(Piece::new(Color::Light, PieceKind::Pawn, sq("d2").unwrap()));
        position.place(Piece::new(Color::Light, PieceKind::Pawn, sq("c2").unwrap()));
        position.move_piece(sq("d2").unwrap(), sq("d4").unwrap());
        assert_eq!(position.en_passant_target(), sq("d3").ok());

        let moves = targets(&position, "c2");
        assert!(!moves.contains(&sq("d3").unwrap()));
    }
}
