//! Iterative deepening driver around [`AlphaBeta`].
//!
//! Runs depth 1 up to the configured maximum against one deadline. A depth
//! interrupted by the deadline is discarded. When no depth completes the
//! driver falls back to a random legal move, so a side with legal moves
//! always gets one.

use std::time::{Duration, Instant};

use rand::prelude::IndexedRandom;
use tracing::{debug, warn};

use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_generator::{all_legal_moves, CandidateMove};
use crate::search::board_scoring::BoardScorer;
use crate::search::minimax::AlphaBeta;
use crate::search::time_management::TimeStrategy;
use crate::search::transposition_table::{TTStats, TranspositionTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: u8,
    pub hash_entries: usize,
    pub time_strategy: TimeStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            hash_entries: TranspositionTable::DEFAULT_ENTRIES,
            time_strategy: TimeStrategy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SearchResult {
    pub best_move: Option<CandidateMove>,
    pub best_score: f64,
    /// Deepest iteration that finished, `0` if none did.
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub tt_stats: TTStats,
    pub timed_out: bool,
    /// The move was picked at random because no iteration finished.
    pub fell_back: bool,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    position: &Position,
    side: Color,
    scorer: &S,
    tt: &mut TranspositionTable,
    max_depth: u8,
    budget_ms: Option<u64>,
) -> SearchResult {
    let started = Instant::now();
    let deadline = budget_ms.map(|ms| started + Duration::from_millis(ms));

    let mut result = SearchResult {
        best_score: scorer.score(position),
        ..SearchResult::default()
    };
    let mut nodes = 0u64;

    for depth in 1..=max_depth.max(1) {
        tt.new_generation();
        let mut search = AlphaBeta::new(scorer, tt, deadline);
        let outcome = search.search_root(position, side, depth);
        nodes += search.nodes();

        let Some((best_move, best_score)) = outcome else {
            result.timed_out = true;
            debug!(depth, "search iteration interrupted by deadline");
            break;
        };

        result.best_move = best_move;
        result.best_score = best_score;
        result.reached_depth = depth;
        debug!(
            depth,
            score = best_score,
            nodes,
            best = ?best_move.map(|mv| mv.to_string()),
            "search iteration complete"
        );

        if best_move.is_none() {
            break;
        }
    }

    if result.best_move.is_none() && result.reached_depth == 0 {
        let mut scratch = position.clone();
        let legal = all_legal_moves(&mut scratch, side);
        if let Some(picked) = legal.as_slice().choose(&mut rand::rng()) {
            warn!(%side, mv = %picked, "no search depth completed, playing a random legal move");
            result.best_move = Some(*picked);
            result.fell_back = true;
        }
    }

    result.nodes = nodes;
    result.elapsed_ms = started.elapsed().as_millis() as u64;
    result.tt_stats = tt.stats();
    result
}
