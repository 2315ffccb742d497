//! Zobrist hashing for search caching and repetition tracking.
//!
//! A key covers piece identity, square, moved flag, the en-passant target and
//! the side to move. The moved flag stands in for castling rights and
//! double-step eligibility, which this board derives from it. Keys come from a
//! fixed seed so hashes are deterministic across runs.

use std::sync::OnceLock;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;

#[derive(Debug)]
struct ZobristTables {
    // [color][kind][has_moved][square]
    piece_square: [[[[u64; 64]; 2]; 6]; 2],
    en_passant_square: [u64; 64],
    side_to_move: u64,
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[[0u64; 64]; 2]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for moved in kind {
                for sq in moved {
                    *sq = next_random_u64(&mut seed);
                }
            }
        }
    }

    let mut en_passant_square = [0u64; 64];
    for key in &mut en_passant_square {
        *key = next_random_u64(&mut seed);
    }

    let side_to_move = next_random_u64(&mut seed);

    ZobristTables {
        piece_square,
        en_passant_square,
        side_to_move,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
pub fn piece_key(piece: &Piece) -> u64 {
    tables().piece_square[piece.color.index()][piece.kind.index()][usize::from(piece.has_moved)]
        [piece.square.index()]
}

#[inline]
pub fn en_passant_key(square: Square) -> u64 {
    tables().en_passant_square[square.index()]
}

/// Toggle key, xored in when dark is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

pub fn hash_position(position: &Position, side_to_move: Color) -> u64 {
    let mut key = position.pieces().fold(0u64, |acc, piece| acc ^ piece_key(&piece));

    if let Some(target) = position.en_passant_target() {
        key ^= en_passant_key(target);
    }
    if side_to_move == Color::Dark {
        key ^= side_to_move_key();
    }

    key
}

#[cfg(test)]
mod tests {
    use super::hash_position;
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::move_generation::legal_move_apply::{play_move, unplay_move};
    use crate::utils::algebraic::algebraic_to_square as sq;
    use crate::utils::fen_parser::parse_fen;

    fn hash(fen: &str) -> u64 {
        let (position, side) = parse_fen(fen).expect("FEN should parse");
        hash_position(&position, side)
    }

    #[test]
    fn starting_position_hash_is_deterministic() {
        let a = hash_position(&Position::starting(), Color::Light);
        let b = hash_position(&Position::starting(), Color::Light);
        assert_eq!(a, b);
    }

    #[test]
    fn side_to_move_changes_hash() {
        assert_ne!(
            hash("4k3/8/8/8/8/8/8/4K3 w - - 0 1"),
            hash("4k3/8/8/8/8/8/8/4K3 b - - 0 1")
        );
    }

    #[test]
    fn moved_flags_change_hash() {
        assert_ne!(
            hash("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"),
            hash("4k3/8/8/8/8/8/8/R3K2R w - - 0 1")
        );
    }

    #[test]
    fn en_passant_target_changes_hash() {
        assert_ne!(
            hash("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1"),
            hash("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1")
        );
    }

    #[test]
    fn play_and_unplay_restores_hash() {
        let mut position = Position::starting();
        let before = hash_position(&position, Color::Light);
        let record = play_move(&mut position, sq("e2").unwrap(), sq("e4").unwrap()).expect("pawn");
        assert_ne!(hash_position(&position, Color::Dark), before);
        unplay_move(&mut position, &record);
        assert_eq!(hash_position(&position, Color::Light), before);
    }
}
