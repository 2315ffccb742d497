//! Pluggable board evaluation.
//!
//! Scores are white-relative: positive favours white. A checkmated side
//! scores as an infinite loss regardless of material.

use std::collections::VecDeque;

use crate::game_state::chess_rules::promotion_rank;
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

pub const PAWN_BONUS_WEIGHT: f64 = 0.05;

pub trait BoardScorer: Send + Sync {
    /// Score from white's perspective.
    fn score(&self, position: &Position) -> f64;
}

/// Material plus the pawn promotion bonus.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardScorer;

impl BoardScorer for StandardScorer {
    fn score(&self, position: &Position) -> f64 {
        if let Some(mate) = mate_score(position) {
            return mate;
        }
        position
            .pieces()
            .map(|piece| {
                let mut value = piece.kind.value();
                if piece.kind == PieceKind::Pawn {
                    value += pawn_bonus(position, &piece);
                }
                signed(piece.color, value)
            })
            .sum()
    }
}

/// Material only.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> f64 {
        if let Some(mate) = mate_score(position) {
            return mate;
        }
        position
            .pieces()
            .map(|piece| signed(piece.color, piece.kind.value()))
            .sum()
    }
}

/// Evaluate with the default scorer.
#[inline]
pub fn evaluate(position: &Position) -> f64 {
    StandardScorer.score(position)
}

#[inline]
fn signed(color: Color, value: f64) -> f64 {
    match color {
        Color::Light => value,
        Color::Dark => -value,
    }
}

fn mate_score(position: &Position) -> Option<f64> {
    for (color, score) in [
        (Color::Light, f64::NEG_INFINITY),
        (Color::Dark, f64::INFINITY),
    ] {
        if is_check(position, color) {
            let mut scratch = position.clone();
            if !has_any_legal_move(&mut scratch, color) {
                return Some(score);
            }
        }
    }
    None
}

/// `0.05 * ln(max(9 - d, 1))` where `d` is the promotion distance.
fn pawn_bonus(position: &Position, pawn: &Piece) -> f64 {
    match pawn_promotion_distance(position, pawn) {
        Some(distance) => {
            let reach = (9 - i32::from(distance)).max(1);
            PAWN_BONUS_WEIGHT * f64::from(reach).ln()
        }
        None => 0.0,
    }
}

/// Fewest pawn steps to the promotion rank, stepping forward onto empty
/// squares or diagonally onto enemy pieces. `None` when no such path exists.
pub fn pawn_promotion_distance(position: &Position, pawn: &Piece) -> Option<u8> {
    let target_rank = promotion_rank(pawn.color);
    let forward = pawn.color.pawn_direction();

    let mut seen = [false; 64];
    let mut queue = VecDeque::new();
    seen[pawn.square.index()] = true;
    queue.push_back((pawn.square, 0u8));

    while let Some((square, cost)) = queue.pop_front() {
        if square.rank() == target_rank {
            return Some(cost);
        }

        let mut visit = |next: Square| {
            if !seen[next.index()] {
                seen[next.index()] = true;
                queue.push_back((next, cost + 1));
            }
        };

        if let Some(ahead) = square.offset(0, forward) {
            if position.is_empty(ahead) {
                visit(ahead);
            }
        }
        for d_file in [-1, 1] {
            if let Some(diagonal) = square.offset(d_file, forward) {
                if matches!(position.piece_at(diagonal), Some(p) if p.color != pawn.color) {
                    visit(diagonal);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{evaluate, pawn_promotion_distance, BoardScorer, MaterialScorer, StandardScorer};
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square as sq;
    use crate::utils::fen_parser::parse_fen;

    fn position(fen: &str) -> Position {
        parse_fen(fen).expect("valid fen").0
    }

    #[test]
    fn starting_position_is_balanced() {
        let position = Position::starting();
        assert!(evaluate(&position).abs() < 1e-9);
        assert!(MaterialScorer.score(&position).abs() < 1e-9);
    }

    #[test]
    fn extra_queen_dominates_score() {
        let position = position("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        assert!((MaterialScorer.score(&position) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn promotion_distance_follows_open_and_capturing_paths() {
        let open = position("4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
        let pawn = open.piece_at(sq("a2").unwrap()).unwrap();
        assert_eq!(pawn_promotion_distance(&open, &pawn), Some(6));

        let blocked = position("4k3/8/8/8/8/p7/P7/4K3 w - - 0 1");
        let pawn = blocked.piece_at(sq("a2").unwrap()).unwrap();
        assert_eq!(pawn_promotion_distance(&blocked, &pawn), None);

        let detour = position("4k3/8/8/8/8/pp6/P7/4K3 w - - 0 1");
        let pawn = detour.piece_at(sq("a2").unwrap()).unwrap();
        assert_eq!(pawn_promotion_distance(&detour, &pawn), Some(6));
    }

    #[test]
    fn advanced_pawn_earns_more_than_home_pawn() {
        let advanced = position("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let home = position("4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
        let advanced_score = StandardScorer.score(&advanced);
        let home_score = StandardScorer.score(&home);
        assert!(advanced_score > home_score);
        assert!((advanced_score - (1.0 + 0.05 * 8f64.ln())).abs() < 1e-9);
    }

    #[test]
    fn checkmate_overrides_material() {
        let white_mated = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(evaluate(&white_mated), f64::NEG_INFINITY);

        let black_mated = position("3R2k1/5ppp/8/8/8/8/8/6K1 b - - 0 1");
        assert_eq!(evaluate(&black_mated), f64::INFINITY);
        assert_eq!(MaterialScorer.score(&black_mated), f64::INFINITY);
    }
}
