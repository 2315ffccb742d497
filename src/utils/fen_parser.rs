//! FEN-to-Position parser.
//!
//! Builds a `Position` and side to move from a Forsyth-Edwards Notation
//! string. The board carries no rights table, so castling rights become moved
//! flags: a king or corner rook without a matching right is marked moved, as
//! is every pawn off its starting rank. The halfmove and fullmove fields are
//! optional and validated but not stored.

use thiserror::Error;

use crate::game_state::chess_rules::{back_rank, pawn_start_rank, CASTLING_ROOK_FILES};
use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::utils::algebraic::algebraic_to_square;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("missing {0} field in FEN")]
    MissingField(&'static str),
    #[error("FEN has extra trailing fields")]
    TrailingFields,
    #[error("invalid board layout: {0}")]
    Board(String),
    #[error("invalid side-to-move field: {0}")]
    SideToMove(String),
    #[error("invalid castling rights character: {0}")]
    CastlingRights(char),
    #[error("invalid en-passant field: {0}")]
    EnPassant(String),
    #[error("invalid move counter: {0}")]
    Counter(String),
}

pub fn parse_fen(fen: &str) -> Result<(Position, Color), FenError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(FenError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(FenError::MissingField("side-to-move"))?;
    let castling_part = parts.next().ok_or(FenError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(FenError::MissingField("en-passant square"))?;

    for counter in parts.by_ref().take(2) {
        counter
            .parse::<u16>()
            .map_err(|_| FenError::Counter(counter.to_owned()))?;
    }
    if parts.next().is_some() {
        return Err(FenError::TrailingFields);
    }

    let mut position = Position::empty();
    parse_board(board_part, &mut position)?;
    let side = parse_side_to_move(side_part)?;
    apply_castling_rights(castling_part, &mut position)?;
    position.set_en_passant_target(parse_en_passant_square(en_passant_part)?);

    Ok((position, side))
}

fn parse_board(board_part: &str, position: &mut Position) -> Result<(), FenError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::Board("board layout must contain 8 ranks".to_owned()));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as i8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(FenError::Board(format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(FenError::Board("board rank has too many files".to_owned()));
                }
                continue;
            }

            let (color, kind) = piece_from_fen_char(ch)
                .ok_or_else(|| FenError::Board(format!("invalid piece character '{ch}'")))?;
            let square = Square::new(file as i8, board_rank)
                .ok_or_else(|| FenError::Board("board rank has too many files".to_owned()))?;

            let mut piece = Piece::new(color, kind, square);
            if kind == PieceKind::Pawn && square.rank() != pawn_start_rank(color) {
                piece.has_moved = true;
            }
            position.place(piece);
            file += 1;
        }

        if file != 8 {
            return Err(FenError::Board("board rank does not sum to 8 files".to_owned()));
        }
    }

    for color in [Color::Light, Color::Dark] {
        if position.pieces_of(color).iter().filter(|p| p.kind == PieceKind::King).count() > 1 {
            return Err(FenError::Board(format!("{color} has more than one king")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> Result<Color, FenError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(FenError::SideToMove(side_part.to_owned())),
    }
}

/// Marks kings and corner rooks as moved unless a right keeps them castleable.
fn apply_castling_rights(castling_part: &str, position: &mut Position) -> Result<(), FenError> {
    // [color][queenside, kingside]
    let mut rights = [[false; 2]; 2];
    if castling_part != "-" {
        for ch in castling_part.chars() {
            match ch {
                'K' => rights[Color::Light.index()][1] = true,
                'Q' => rights[Color::Light.index()][0] = true,
                'k' => rights[Color::Dark.index()][1] = true,
                'q' => rights[Color::Dark.index()][0] = true,
                _ => return Err(FenError::CastlingRights(ch)),
            }
        }
    }

    for color in [Color::Light, Color::Dark] {
        let side_rights = rights[color.index()];
        let rank = back_rank(color) as i8;

        for (side, rook_file) in CASTLING_ROOK_FILES.iter().enumerate() {
            if side_rights[side] {
                continue;
            }
            if let Some(rook) = Square::new(*rook_file as i8, rank).and_then(|sq| position.piece_at_mut(sq)) {
                if rook.kind == PieceKind::Rook && rook.color == color {
                    rook.has_moved = true;
                }
            }
        }

        if !side_rights.iter().any(|right| *right) {
            if let Some(king_sq) = position.king_square(color) {
                if let Some(king) = position.piece_at_mut(king_sq) {
                    king.has_moved = true;
                }
            }
        }
    }

    Ok(())
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, FenError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .map_err(FenError::EnPassant)
}

fn piece_from_fen_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let piece = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, piece))
}
