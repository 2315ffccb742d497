//! Random-move engine.
//!
//! Selects uniformly from legal moves. Used as a sparring partner in tests
//! and the demo binary.

use rand::prelude::IndexedRandom;

use crate::engines::engine_trait::{Engine, EngineError, SearchParams};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::all_legal_moves;
use crate::search::iterative_deepening::SearchResult;

#[derive(Debug, Default)]
pub struct RandomEngine;

impl RandomEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "ply_chess random"
    }

    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        _params: &SearchParams,
    ) -> Result<SearchResult, EngineError> {
        let mut scratch = position.clone();
        let legal_moves = all_legal_moves(&mut scratch, side);

        let picked = legal_moves
            .as_slice()
            .choose(&mut rand::rng())
            .ok_or(EngineError::NoLegalMoves(side))?;

        Ok(SearchResult {
            best_move: Some(*picked),
            nodes: legal_moves.len() as u64,
            ..SearchResult::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::RandomEngine;
    use crate::engines::engine_trait::{Engine, EngineError, SearchParams};
    use crate::game_state::chess_types::Color;
    use crate::game_state::position::Position;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn picks_a_legal_move_for_the_requested_side() {
        let mut engine = RandomEngine::new();
        let position = Position::starting();
        let result = engine
            .choose_move(&position, Color::Dark, &SearchParams::default())
            .expect("moves exist");
        let mv = result.best_move.expect("a move");
        assert_eq!(position.piece_at(mv.from).map(|p| p.color), Some(Color::Dark));
        assert_eq!(result.nodes, 20);
    }

    #[test]
    fn stalemated_side_reports_no_legal_moves() {
        let (position, side) = parse_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid fen");
        let err = RandomEngine::new()
            .choose_move(&position, side, &SearchParams::default())
            .expect_err("no moves");
        assert_eq!(err, EngineError::NoLegalMoves(Color::Dark));
    }
}
