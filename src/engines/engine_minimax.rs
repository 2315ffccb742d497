//! Iterative-deepening alpha-beta engine used for computer players.
//!
//! Owns its transposition table so one table is never shared between two
//! searches. `new_game` clears it.

use tracing::info;

use crate::engines::engine_trait::{Engine, EngineError, SearchParams};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::search::board_scoring::{BoardScorer, StandardScorer};
use crate::search::iterative_deepening::{iterative_deepening_search, SearchConfig, SearchResult};
use crate::search::time_management::{resolve_budget_ms, TimeStrategy};
use crate::search::transposition_table::TranspositionTable;

#[derive(Debug)]
pub struct MinimaxEngine<S: BoardScorer = StandardScorer> {
    config: SearchConfig,
    scorer: S,
    tt: TranspositionTable,
}

impl MinimaxEngine<StandardScorer> {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, StandardScorer)
    }
}

impl Default for MinimaxEngine<StandardScorer> {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl<S: BoardScorer> MinimaxEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self {
            tt: TranspositionTable::with_entries(config.hash_entries),
            config,
            scorer,
        }
    }

    #[inline]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[inline]
    pub fn transposition_table(&self) -> &TranspositionTable {
        &self.tt
    }
}

fn invalid_option(name: &str, value: &str) -> EngineError {
    EngineError::InvalidOption {
        name: name.to_owned(),
        value: value.to_owned(),
    }
}

impl<S: BoardScorer> Engine for MinimaxEngine<S> {
    fn name(&self) -> &str {
        "ply_chess minimax"
    }

    fn new_game(&mut self) {
        self.tt.clear();
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        if name.eq_ignore_ascii_case("Depth") {
            let parsed = value
                .trim()
                .parse::<u8>()
                .ok()
                .filter(|depth| *depth >= 1)
                .ok_or_else(|| invalid_option(name, value))?;
            self.config.max_depth = parsed;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Hash") {
            let parsed = value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|entries| *entries >= 1)
                .ok_or_else(|| invalid_option(name, value))?;
            self.config.hash_entries = parsed;
            self.tt = TranspositionTable::with_entries(parsed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("TimeFraction") {
            let parsed = value
                .trim()
                .parse::<u64>()
                .map_err(|_| invalid_option(name, value))?;
            self.config.time_strategy = TimeStrategy::from_divisor(parsed);
            return Ok(());
        }
        Err(invalid_option(name, value))
    }

    fn choose_move(
        &mut self,
        position: &Position,
        side: Color,
        params: &SearchParams,
    ) -> Result<SearchResult, EngineError> {
        let depth = params.depth.unwrap_or(self.config.max_depth).max(1);
        let budget_ms = resolve_budget_ms(params.movetime_ms, params.remaining_ms, self.config.time_strategy);

        let result = iterative_deepening_search(position, side, &self.scorer, &mut self.tt, depth, budget_ms);
        let Some(best_move) = result.best_move else {
            return Err(EngineError::NoLegalMoves(side));
        };

        info!(
            %side,
            mv = %best_move,
            depth = result.reached_depth,
            score = result.best_score,
            nodes = result.nodes,
            elapsed_ms = result.elapsed_ms,
            budget_ms = ?budget_ms,
            "computer move chosen"
        );
        Ok(result)
    }
}
