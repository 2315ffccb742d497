//! Canonical chess-rule constants.
//!
//! Static rule-related literals such as the standard starting setup and the
//! rank geometry used by pawn and castling logic.

use crate::game_state::chess_types::{Color, PieceKind};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Piece order on both back ranks, file `a` first.
pub const BACK_RANK_ORDER: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Files the castling rooks start on (queenside, kingside).
pub const CASTLING_ROOK_FILES: [u8; 2] = [0, 7];

/// The only promotion target this engine models.
pub const PROMOTION_KIND: PieceKind = PieceKind::Queen;

/// Matches the threefold repetition rule.
pub const REPETITION_LIMIT: u8 = 3;

#[inline]
pub const fn back_rank(color: Color) -> u8 {
    match color {
        Color::Light => 0,
        Color::Dark => 7,
    }
}

#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}

/// Rank of the en-passant target squares this color may capture onto.
#[inline]
pub const fn en_passant_capture_rank(color: Color) -> u8 {
    match color {
        Color::Light => 5,
        Color::Dark => 2,
    }
}
