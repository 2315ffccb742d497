//! Board representation and the single movement choke point.
//!
//! `Position` is a total 64-square mapping plus the one-ply en-passant target.
//! Every relocation in the crate, whether from the controller, the legality
//! filter, or the search, goes through [`Position::move_piece`].

use crate::game_state::chess_rules::{back_rank, pawn_start_rank, BACK_RANK_ORDER};
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    en_passant_target: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::empty()
    }
}

impl Position {
    #[inline]
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            en_passant_target: None,
        }
    }

    /// Standard initial setup with every piece unmoved.
    pub fn starting() -> Self {
        let mut position = Self::empty();
        for color in [Color::Light, Color::Dark] {
            for (file, kind) in BACK_RANK_ORDER.iter().enumerate() {
                if let Some(square) = Square::new(file as i8, back_rank(color) as i8) {
                    position.place(Piece::new(color, *kind, square));
                }
                if let Some(square) = Square::new(file as i8, pawn_start_rank(color) as i8) {
                    position.place(Piece::new(color, PieceKind::Pawn, square));
                }
            }
        }
        position
    }

    /// Put `piece` on its own square, replacing any occupant.
    #[inline]
    pub fn place(&mut self, piece: Piece) {
        self.squares[piece.square.index()] = Some(piece);
    }

    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub(crate) fn piece_at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[square.index()].as_mut()
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Occupied squares in `a1..h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().filter_map(|slot| *slot)
    }

    pub fn pieces_of(&self, color: Color) -> Vec<Piece> {
        self.pieces().filter(|piece| piece.color == color).collect()
    }

    #[inline]
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|piece| piece.color == color && piece.kind == PieceKind::King)
            .map(|piece| piece.square)
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    /// Square of the pawn an en-passant capture onto `target` removes.
    #[inline]
    pub fn en_passant_victim_square(mover: Color, target: Square) -> Option<Square> {
        target.offset(0, -mover.pawn_direction())
    }

    /// Relocate the piece on `from` to `to` with no legality check.
    ///
    /// A pawn landing on the en-passant target also removes the pawn it
    /// passed. The target is then cleared, or set to the skipped square when
    /// this was a two-rank pawn advance. Moved flags, castling rooks and
    /// promotion belong to the caller.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        let Some(mut piece) = self.squares[from.index()].take() else {
            debug_assert!(false, "move_piece called on empty square {from}");
            return;
        };

        if piece.kind == PieceKind::Pawn && self.en_passant_target == Some(to) {
            if let Some(victim) = Self::en_passant_victim_square(piece.color, to) {
                if matches!(self.piece_at(victim), Some(p) if p.kind == PieceKind::Pawn) {
                    self.squares[victim.index()] = None;
                }
            }
        }

        piece.square = to;
        self.squares[to.index()] = Some(piece);

        self.en_passant_target = None;
        if piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
            self.en_passant_target = Square::new(to.file() as i8, ((from.rank() + to.rank()) / 2) as i8);
        }
    }
}
