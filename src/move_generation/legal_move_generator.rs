//! Legal move filtering.
//!
//! Each pseudo-legal destination is simulated on the live position with
//! [`play_move`], checked for self-check, then reverted with
//! [`unplay_move`]. Castling additionally requires that the king is not in
//! check and does not cross an attacked square.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{play_move, unplay_move};
use crate::move_generation::legal_move_checks::{is_check, is_square_attacked};
use crate::moves::king_moves::is_castling_step;
use crate::moves::pseudo_legal::pseudo_legal_moves;

/// One legal `(from, to)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateMove {
    pub from: Square,
    pub to: Square,
}

impl std::fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Legal destinations for the piece on `square`. Empty when the square is
/// empty. The position is borrowed mutably for simulation and is left
/// unchanged.
pub fn legal_moves(position: &mut Position, square: Square) -> Vec<Square> {
    let Some(piece) = position.piece_at(square) else {
        return Vec::new();
    };

    #[cfg(debug_assertions)]
    let snapshot = position.clone();

    let mut legal = Vec::new();
    for to in pseudo_legal_moves(position, &piece) {
        if piece.kind == PieceKind::King
            && is_castling_step(square, to)
            && !castling_path_is_safe(position, &piece, to)
        {
            continue;
        }

        let Some(record) = play_move(position, square, to) else {
            continue;
        };
        let leaves_king_in_check = is_check(position, piece.color);
        unplay_move(position, &record);

        if !leaves_king_in_check {
            legal.push(to);
        }
    }

    #[cfg(debug_assertions)]
    debug_assert_eq!(*position, snapshot, "legal move simulation must not change the position");

    legal
}

fn castling_path_is_safe(position: &Position, king: &Piece, to: Square) -> bool {
    let enemy = king.color.opposite();
    if is_square_attacked(position, king.square, enemy) {
        return false;
    }
    let step: i8 = if to.file() > king.square.file() { 1 } else { -1 };
    match king.square.offset(step, 0) {
        Some(crossed) => !is_square_attacked(position, crossed, enemy),
        None => false,
    }
}

/// Every legal move for `color`, in board order of the moving pieces.
pub fn all_legal_moves(position: &mut Position, color: Color) -> Vec<CandidateMove> {
    let mut moves = Vec::with_capacity(48);
    for piece in position.pieces_of(color) {
        for to in legal_moves(position, piece.square) {
            moves.push(CandidateMove {
                from: piece.square,
                to,
            });
        }
    }
    moves
}

/// Short-circuiting test for at least one legal move.
pub fn has_any_legal_move(position: &mut Position, color: Color) -> bool {
    position
        .pieces_of(color)
        .into_iter()
        .any(|piece| !legal_moves(position, piece.square).is_empty())
}
