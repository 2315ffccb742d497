//! Background search on a single worker thread.
//!
//! The engine, with its transposition table, moves into the worker together
//! with a cloned position and comes back with the result. The caller joins
//! either by polling [`SearchTask::try_join`] or blocking in
//! [`SearchTask::join`].

use std::thread::{self, JoinHandle};

use tracing::debug;

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, EngineError, SearchParams};
use crate::game_state::chess_types::Color;
use crate::game_state::position::Position;
use crate::search::iterative_deepening::SearchResult;

#[derive(Debug)]
pub struct SearchOutcome {
    pub engine: MinimaxEngine,
    pub side: Color,
    pub result: Result<SearchResult, EngineError>,
}

#[derive(Debug)]
pub struct SearchTask {
    side: Color,
    handle: JoinHandle<SearchOutcome>,
}

impl SearchTask {
    pub fn spawn(mut engine: MinimaxEngine, position: Position, side: Color, params: SearchParams) -> Self {
        debug!(%side, ?params, "spawning background search");
        let handle = thread::spawn(move || {
            let result = engine.choose_move(&position, side, &params);
            SearchOutcome { engine, side, result }
        });
        Self { side, handle }
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Join without blocking. Hands the task back while the worker runs.
    pub fn try_join(self) -> Result<Result<SearchOutcome, EngineError>, SearchTask> {
        if self.is_finished() {
            Ok(self.join())
        } else {
            Err(self)
        }
    }

    /// Block until the worker finishes. A panicked worker loses its engine.
    pub fn join(self) -> Result<SearchOutcome, EngineError> {
        self.handle.join().map_err(|_| EngineError::WorkerPanicked)
    }
}
