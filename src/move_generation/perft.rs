//! Move-path enumeration for validating the move generator.
//!
//! Walks the legal move tree with `play_move`/`unplay_move` on a single
//! position and tallies leaf statistics.

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{play_move, unplay_move};
use crate::move_generation::legal_move_checks::is_check;
use crate::move_generation::legal_move_generator::{all_legal_moves, CandidateMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

pub fn perft(position: &mut Position, side: Color, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for mv in all_legal_moves(position, side) {
        total.merge(perft_child(position, side, mv, depth));
    }
    total
}

/// Per-root-move node counts, the usual tool for bisecting a perft mismatch.
pub fn perft_divide(position: &mut Position, side: Color, depth: u8) -> Vec<(CandidateMove, usize)> {
    if depth == 0 {
        return Vec::new();
    }
    all_legal_moves(position, side)
        .into_iter()
        .map(|mv| (mv, perft_child(position, side, mv, depth).nodes))
        .collect()
}

fn perft_child(position: &mut Position, side: Color, mv: CandidateMove, depth: u8) -> PerftCounts {
    let Some(record) = play_move(position, mv.from, mv.to) else {
        return PerftCounts::default();
    };

    let counts = if depth == 1 {
        PerftCounts {
            nodes: 1,
            captures: usize::from(record.is_capture()),
            en_passant: usize::from(record.en_passant),
            castles: usize::from(record.castle.is_some()),
            promotions: usize::from(record.promoted),
            checks: usize::from(is_check(position, side.opposite())),
        }
    } else {
        perft(position, side.opposite(), depth - 1)
    };

    unplay_move(position, &record);
    counts
}
