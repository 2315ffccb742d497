//! Per-piece dispatch into the pseudo-legal generators.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::moves::bishop_moves::generate_bishop_moves;
use crate::moves::king_moves::generate_king_moves;
use crate::moves::knight_moves::generate_knight_moves;
use crate::moves::pawn_moves::generate_pawn_moves;
use crate::moves::queen_moves::generate_queen_moves;
use crate::moves::rook_moves::generate_rook_moves;

/// Destinations reachable by `piece` ignoring whether its own king is left
/// in check.
pub fn pseudo_legal_moves(position: &Position, piece: &Piece) -> Vec<Square> {
    let mut out = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(position, piece, &mut out),
        PieceKind::Knight => generate_knight_moves(position, piece, &mut out),
        PieceKind::Bishop => generate_bishop_moves(position, piece, &mut out),
        PieceKind::Rook => generate_rook_moves(position, piece, &mut out),
        PieceKind::Queen => generate_queen_moves(position, piece, &mut out),
        PieceKind::King => generate_king_moves(position, piece, &mut out),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::pseudo_legal_moves;
    use crate::game_state::chess_types::Color;
    use crate::game_state::position::Position;

    #[test]
    fn starting_position_has_twenty_pseudo_legal_moves_per_side() {
        let position = Position::starting();
        for color in [Color::Light, Color::Dark] {
            let total: usize = position
                .pieces_of(color)
                .iter()
                .map(|piece| pseudo_legal_moves(&position, piece).len())
                .sum();
            assert_eq!(total, 20);
        }
    }
}
