//! Capture-first move ordering for alpha-beta.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::CandidateMove;

/// `victim - attacker` for captures, `0` for quiet moves. An en-passant
/// capture scores as pawn takes pawn.
pub fn capture_order_score(position: &Position, mv: CandidateMove) -> f64 {
    let Some(attacker) = position.piece_at(mv.from) else {
        return 0.0;
    };

    if let Some(victim) = position.piece_at(mv.to) {
        return victim.kind.value() - attacker.kind.value();
    }

    let en_passant = attacker.kind == PieceKind::Pawn
        && mv.from.file() != mv.to.file()
        && position.en_passant_target() == Some(mv.to);
    if en_passant {
        return PieceKind::Pawn.value() - PieceKind::Pawn.value();
    }

    0.0
}

/// Stable descending sort on [`capture_order_score`], with an optional
/// cached best move pulled to the front.
pub fn order_moves(position: &Position, moves: &mut [CandidateMove], hash_move: Option<CandidateMove>) {
    moves.sort_by(|a, b| {
        let a_hash = Some(*a) == hash_move;
        let b_hash = Some(*b) == hash_move;
        b_hash.cmp(&a_hash).then_with(|| {
            capture_order_score(position, *b).total_cmp(&capture_order_score(position, *a))
        })
    });
}

#[cfg(test)]
mod tests {
    use super::{capture_order_score, order_moves};
    use crate::move_generation::legal_move_generator::CandidateMove;
    use crate::utils::algebraic::algebraic_to_square as sq;
    use crate::utils::fen_parser::parse_fen;

    fn mv(from: &str, to: &str) -> CandidateMove {
        CandidateMove {
            from: sq(from).unwrap(),
            to: sq(to).unwrap(),
        }
    }

    #[test]
    fn captures_sort_by_victim_minus_attacker_and_quiet_moves_keep_order() {
        let (position, _) = parse_fen("4k3/8/8/3q1r2/4P3/8/8/Q3K3 w - - 0 1").expect("valid fen");
        let mut moves = vec![
            mv("e1", "e2"),
            mv("a1", "d4"),
            mv("e4", "f5"),
            mv("e1", "d1"),
            mv("e4", "d5"),
        ];
        order_moves(&position, &mut moves, None);
        assert_eq!(
            moves,
            vec![
                mv("e4", "d5"),
                mv("e4", "f5"),
                mv("e1", "e2"),
                mv("a1", "d4"),
                mv("e1", "d1"),
            ]
        );
    }

    #[test]
    fn en_passant_scores_as_pawn_takes_pawn() {
        let (position, _) = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("valid fen");
        assert_eq!(capture_order_score(&position, mv("e5", "d6")), 0.0);
    }

    #[test]
    fn hash_move_is_searched_first() {
        let position = crate::game_state::position::Position::starting();
        let mut moves = vec![mv("e2", "e4"), mv("g1", "f3"), mv("d2", "d4")];
        order_moves(&position, &mut moves, Some(mv("d2", "d4")));
        assert_eq!(moves[0], mv("d2", "d4"));
        assert_eq!(moves[1], mv("e2", "e4"));
    }
}
