//! Reversible move application.
//!
//! `play_move` applies a move through [`Position::move_piece`] and completes
//! the parts the board primitive leaves to callers: moved flags, the castling
//! rook and queen promotion. The returned record is enough for `unplay_move`
//! to restore the exact prior position.

use crate::game_state::chess_rules::{promotion_rank, PROMOTION_KIND};
use crate::game_state::chess_types::*;
use crate::game_state::move_record::{CastleRecord, MoveRecord};
use crate::game_state::position::Position;
use crate::moves::king_moves::castling_rook_squares;

/// Apply `from -> to` with no legality check. Returns `None` only when
/// `from` is empty.
pub fn play_move(position: &mut Position, from: Square, to: Square) -> Option<MoveRecord> {
    let moved_piece = position.piece_at(from)?;
    let prev_en_passant_target = position.en_passant_target();

    let en_passant = moved_piece.kind == PieceKind::Pawn
        && from.file() != to.file()
        && position.is_empty(to)
        && prev_en_passant_target == Some(to);

    let captured = if en_passant {
        Position::en_passant_victim_square(moved_piece.color, to).and_then(|sq| position.piece_at(sq))
    } else {
        position.piece_at(to)
    };

    let castle = if moved_piece.kind == PieceKind::King {
        castling_rook_squares(from, to).map(|(rook_from, rook_to)| CastleRecord { rook_from, rook_to })
    } else {
        None
    };

    position.move_piece(from, to);

    let mut promoted = false;
    if let Some(piece) = position.piece_at_mut(to) {
        piece.has_moved = true;
        if piece.kind == PieceKind::Pawn && to.rank() == promotion_rank(piece.color) {
            piece.kind = PROMOTION_KIND;
            promoted = true;
        }
    }

    if let Some(CastleRecord { rook_from, rook_to }) = castle {
        if let Some(mut rook) = position.remove(rook_from) {
            rook.square = rook_to;
            rook.has_moved = true;
            position.place(rook);
        }
    }

    Some(MoveRecord {
        from,
        to,
        moved_piece,
        captured,
        prev_has_moved: moved_piece.has_moved,
        prev_en_passant_target,
        en_passant,
        castle,
        promoted,
    })
}

/// Undo a move previously applied by [`play_move`].
pub fn unplay_move(position: &mut Position, record: &MoveRecord) {
    position.remove(record.to);

    let mut restored = record.moved_piece;
    restored.square = record.from;
    restored.has_moved = record.prev_has_moved;
    position.place(restored);

    if let Some(captured) = record.captured {
        position.place(captured);
    }

    if let Some(CastleRecord { rook_from, rook_to }) = record.castle {
        if let Some(mut rook) = position.remove(rook_to) {
            rook.square = rook_from;
            rook.has_moved = false;
            position.place(rook);
        }
    }

    position.set_en_passant_target(record.prev_en_passant_target);
}

#[cfg(test)]
mod tests {
    use super::{play_move, unplay_move};
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::utils::algebraic::algebraic_to_square as sq;
    use crate::utils::fen_parser::parse_fen;

    fn round_trip(position: &mut Position, from: &str, to: &str) -> Position {
        let before = position.clone();
        let record = play_move(position, sq(from).unwrap(), sq(to).unwrap()).expect("piece on from");
        let after = position.clone();
        unplay_move(position, &record);
        assert_eq!(*position, before, "unplay must restore {from}{to}");
        after
    }

    #[test]
    fn quiet_move_marks_piece_moved_and_reverts() {
        let mut position = Position::starting();
        let after = round_trip(&mut position, "g1", "f3");
        let knight = after.piece_at(sq("f3").unwrap()).expect("knight moved");
        assert!(knight.has_moved);
        assert_eq!(knight.square, sq("f3").unwrap());
    }

    #[test]
    fn castling_moves_rook_and_reverts_flags() {
        let (mut position, _) = parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
        let after = round_trip(&mut position, "e1", "g1");
        let rook = after.piece_at(sq("f1").unwrap()).expect("rook relocated");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert!(rook.has_moved);
        assert!(after.is_empty(sq("h1").unwrap()));

        let after = round_trip(&mut position, "e8", "c8");
        assert!(after.piece_at(sq("d8").unwrap()).is_some());
        assert!(after.is_empty(sq("a8").unwrap()));
    }

    #[test]
    fn en_passant_capture_records_real_victim_square() {
        let (mut position, _) = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("valid fen");
        let record = play_move(&mut position, sq("e5").unwrap(), sq("d6").unwrap()).expect("pawn");
        assert!(record.en_passant);
        assert_eq!(record.captured.map(|p| p.square), Some(sq("d5").unwrap()));
        assert!(position.is_empty(sq("d5").unwrap()));

        unplay_move(&mut position, &record);
        assert_eq!(position.piece_at(sq("d5").unwrap()).map(|p| p.color), Some(Color::Dark));
        assert_eq!(position.en_passant_target(), Some(sq("d6").unwrap()));
    }

    #[test]
    fn promotion_becomes_queen_and_reverts_to_pawn() {
        let (mut position, _) = parse_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("valid fen");
        let after = round_trip(&mut position, "a7", "b8");
        let promoted = after.piece_at(sq("b8").unwrap()).expect("promoted piece");
        assert_eq!(promoted.kind, PieceKind::Queen);
        assert_eq!(position.piece_at(sq("a7").unwrap()).map(|p| p.kind), Some(PieceKind::Pawn));
        assert_eq!(position.piece_at(sq("b8").unwrap()).map(|p| p.kind), Some(PieceKind::Knight));
    }
}
