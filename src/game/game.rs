//! The game controller.
//!
//! `Game` owns the live position, the undo/redo history, repetition counts,
//! clocks and one engine per computer side. Human and computer moves go
//! through [`Game::make_move`]. While a background search is pending the
//! position is frozen: moves, undo and redo are rejected.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::engines::engine_minimax::MinimaxEngine;
use crate::engines::engine_trait::{Engine, EngineError, SearchParams};
use crate::engines::search_task::{SearchOutcome, SearchTask};
use crate::game::clocks::{ClockTransition, Clocks};
use crate::game::errors::GameError;
use crate::game::player::{GameConfig, PlayerKind};
use crate::game::status::{DrawReason, GameStatus};
use crate::game_state::chess_rules::REPETITION_LIMIT;
use crate::game_state::chess_types::*;
use crate::game_state::move_history::MoveHistory;
use crate::game_state::move_record::MoveRecord;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::{play_move, unplay_move};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::terminal_checks::{is_checkmate, is_draw, is_stalemate};
use crate::search::position_hash::hash_position;

/// Result of a successfully applied move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveApplied {
    pub record: MoveRecord,
    pub clock: ClockTransition,
    pub status: GameStatus,
}

#[derive(Debug)]
pub struct Game {
    position: Position,
    side_to_move: Color,
    history: MoveHistory,
    repetitions: HashMap<u64, u8>,
    selection: Option<Square>,
    computer_suppressed: bool,
    config: GameConfig,
    engines: [Option<MinimaxEngine>; 2],
    pending: Option<SearchTask>,
    clocks: Clocks,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::from_position(Position::starting(), Color::Light, config)
    }

    /// Start from an arbitrary setup, for example one read by `parse_fen`.
    pub fn from_position(position: Position, side_to_move: Color, config: GameConfig) -> Self {
        Self {
            position,
            side_to_move,
            history: MoveHistory::new(),
            repetitions: HashMap::new(),
            selection: None,
            computer_suppressed: false,
            engines: config.players.map(engine_for),
            pending: None,
            clocks: Clocks::new(config.initial_time_ms),
            config,
        }
        .with_running_clock()
    }

    fn with_running_clock(mut self) -> Self {
        self.clocks.hand_over(self.side_to_move.opposite(), Some(self.side_to_move));
        self
    }

    /// Reset to the starting position, keeping players and clearing engine caches.
    pub fn restart(&mut self) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::SearchInFlight);
        }
        let engines = std::mem::replace(&mut self.engines, [None, None]);
        *self = Self::new(self.config);
        for (slot, engine) in self.engines.iter_mut().zip(engines) {
            if let Some(mut engine) = engine {
                engine.new_game();
                *slot = Some(engine);
            }
        }
        Ok(())
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    #[inline]
    pub fn clocks(&self) -> &Clocks {
        &self.clocks
    }

    #[inline]
    pub fn selection(&self) -> Option<Square> {
        self.selection
    }

    #[inline]
    pub fn player(&self, color: Color) -> PlayerKind {
        self.config.players[color.index()]
    }

    #[inline]
    pub fn search_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn computer_suppressed(&self) -> bool {
        self.computer_suppressed
    }

    /// How many times the current position has been reached by played moves.
    pub fn repetition_count(&self) -> u8 {
        let key = hash_position(&self.position, self.side_to_move);
        self.repetitions.get(&key).copied().unwrap_or(0)
    }

    /// True when a collaborator should start a computer search now.
    pub fn computer_should_move(&self) -> bool {
        self.player(self.side_to_move).is_computer()
            && !self.computer_suppressed
            && self.pending.is_none()
            && !self.status().is_over()
    }

    /// Lift the suppression set by undo or redo.
    pub fn resume_computer(&mut self) {
        self.computer_suppressed = false;
    }

    /// Legal destinations for the piece on `square`. Empty unless it belongs
    /// to the side to move.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        match self.position.piece_at(square) {
            Some(piece) if piece.color == self.side_to_move => {
                let mut scratch = self.position.clone();
                legal_moves(&mut scratch, square)
            }
            _ => Vec::new(),
        }
    }

    /// Select a piece of the side to move and return its destinations.
    pub fn select(&mut self, square: Square) -> Result<Vec<Square>, GameError> {
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        match self.position.piece_at(square) {
            Some(piece) if piece.color == self.side_to_move => {
                self.selection = Some(square);
                self.computer_suppressed = false;
                Ok(self.legal_moves(square))
            }
            _ => {
                self.selection = None;
                Err(GameError::NoPieceSelected)
            }
        }
    }

    /// Move the selected piece. An illegal target keeps the selection.
    pub fn move_selection(&mut self, to: Square) -> Result<MoveApplied, GameError> {
        let from = self.selection.ok_or(GameError::NoPieceSelected)?;
        self.make_move(from, to)
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveApplied, GameError> {
        if self.pending.is_some() {
            return Err(GameError::SearchInFlight);
        }
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }
        if !self.legal_moves(from).contains(&to) {
            return Err(GameError::IllegalMove { from, to });
        }

        let record = play_move(&mut self.position, from, to).ok_or(GameError::IllegalMove { from, to })?;
        self.history.push(record);

        let mover = self.side_to_move;
        self.side_to_move = mover.opposite();
        self.selection = None;
        self.computer_suppressed = false;
        let count = self.enter_position();

        let status = self.status();
        let clock = if status.is_over() {
            self.clocks.hand_over(mover, None)
        } else {
            self.clocks.hand_over(mover, Some(self.side_to_move))
        };

        debug!(%mover, %from, %to, repetitions = count, "move applied");
        if status.is_over() {
            info!(%status, "game over");
        }

        Ok(MoveApplied { record, clock, status })
    }

    pub fn undo(&mut self) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::SearchInFlight);
        }
        if !self.history.can_undo() {
            return Err(GameError::NothingToUndo);
        }

        self.leave_position();
        let Some(record) = self.history.step_back() else {
            return Err(GameError::NothingToUndo);
        };
        unplay_move(&mut self.position, &record);
        self.side_to_move = record.mover();
        self.after_navigation();

        debug!(from = %record.from, to = %record.to, "move undone");
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::SearchInFlight);
        }
        let Some(next) = self.history.next_redo().copied() else {
            return Err(GameError::NothingToRedo);
        };

        let replayed = play_move(&mut self.position, next.from, next.to).ok_or(GameError::NothingToRedo)?;
        self.history.step_forward(replayed);
        self.side_to_move = next.mover().opposite();
        self.enter_position();
        self.after_navigation();

        debug!(from = %next.from, to = %next.to, "move redone");
        Ok(())
    }

    fn after_navigation(&mut self) {
        self.selection = None;
        self.computer_suppressed = true;
        let running = (!self.status().is_over()).then_some(self.side_to_move);
        self.clocks.hand_over(self.side_to_move.opposite(), running);
    }

    fn enter_position(&mut self) -> u8 {
        let key = hash_position(&self.position, self.side_to_move);
        let count = self.repetitions.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        *count
    }

    fn leave_position(&mut self) {
        let key = hash_position(&self.position, self.side_to_move);
        if let Some(count) = self.repetitions.get_mut(&key) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.repetitions.remove(&key);
            }
        }
    }

    pub fn status(&self) -> GameStatus {
        let side = self.side_to_move;
        if self.clocks.is_expired(side) {
            return GameStatus::TimeExpired { loser: side };
        }

        let mut scratch = self.position.clone();
        if is_checkmate(&mut scratch, side) {
            return GameStatus::Checkmate { winner: side.opposite() };
        }
        if is_stalemate(&mut scratch, side) {
            return GameStatus::Stalemate;
        }
        if is_draw(&self.position) {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        if self.repetition_count() >= REPETITION_LIMIT {
            return GameStatus::Draw(DrawReason::Repetition);
        }
        GameStatus::InProgress
    }

    /// Report a side's remaining clock from the embedding timer.
    pub fn set_remaining_time(&mut self, color: Color, ms: u64) {
        self.clocks.set_remaining_ms(color, ms);
        if ms == 0 {
            warn!(%color, "clock expired");
            self.clocks.stop();
        }
    }

    /// Start a background search for the computer side to move.
    pub fn request_computer_move(&mut self, budget_ms: Option<u64>) -> Result<(), GameError> {
        if self.pending.is_some() {
            return Err(GameError::SearchInFlight);
        }
        if self.status().is_over() {
            return Err(GameError::GameOver);
        }

        let side = self.side_to_move;
        let PlayerKind::Computer(search_config) = self.player(side) else {
            return Err(GameError::NotComputerTurn);
        };
        let engine = self.engines[side.index()]
            .take()
            .unwrap_or_else(|| MinimaxEngine::new(search_config));

        let params = SearchParams {
            depth: None,
            movetime_ms: budget_ms,
            remaining_ms: Some(self.clocks.remaining_ms(side)),
        };
        self.computer_suppressed = false;
        self.pending = Some(SearchTask::spawn(engine, self.position.clone(), side, params));
        Ok(())
    }

    /// Apply the pending search result if the worker has finished.
    pub fn poll_computer_move(&mut self) -> Result<Option<MoveApplied>, GameError> {
        let task = self.pending.take().ok_or(GameError::NoSearchPending)?;
        match task.try_join() {
            Ok(joined) => self.finish_search(joined).map(Some),
            Err(task) => {
                self.pending = Some(task);
                Ok(None)
            }
        }
    }

    /// Block until the pending search finishes and apply its move.
    pub fn wait_computer_move(&mut self) -> Result<MoveApplied, GameError> {
        let task = self.pending.take().ok_or(GameError::NoSearchPending)?;
        self.finish_search(task.join())
    }

    /// Search and apply a computer move synchronously.
    pub fn play_computer_move(&mut self, budget_ms: Option<u64>) -> Result<MoveApplied, GameError> {
        self.request_computer_move(budget_ms)?;
        self.wait_computer_move()
    }

    fn finish_search(&mut self, joined: Result<SearchOutcome, EngineError>) -> Result<MoveApplied, GameError> {
        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(err) => {
                let side = self.side_to_move;
                self.engines[side.index()] = engine_for(self.player(side));
                return Err(err.into());
            }
        };

        self.engines[outcome.side.index()] = Some(outcome.engine);
        let result = outcome.result?;
        let best = result.best_move.ok_or(EngineError::NoLegalMoves(outcome.side))?;
        self.make_move(best.from, best.to)
    }
}

fn engine_for(player: PlayerKind) -> Option<MinimaxEngine> {
    match player {
        PlayerKind::Human => None,
        PlayerKind::Computer(config) => Some(MinimaxEngine::new(config)),
    }
}

#[cfg(test)]
mod tests {
    use super::Game;
    use crate::game::errors::GameError;
    use crate::game::player::{GameConfig, PlayerKind};
    use crate::game::status::{DrawReason, GameStatus};
    use crate::game_state::chess_types::*;
    use crate::game_state::position::Position;
    use crate::search::iterative_deepening::SearchConfig;
    use crate::utils::algebraic::algebraic_to_square as sq;
    use crate::utils::fen_parser::parse_fen;

    fn humans() -> GameConfig {
        GameConfig {
            players: [PlayerKind::Human, PlayerKind::Human],
            ..GameConfig::default()
        }
    }

    fn shallow_computer() -> PlayerKind {
        PlayerKind::Computer(SearchConfig {
            max_depth: 2,
            hash_entries: 1 << 12,
            ..SearchConfig::default()
        })
    }

    fn from_fen(fen: &str, config: GameConfig) -> Game {
        let (position, side) = parse_fen(fen).expect("valid fen");
        Game::from_position(position, side, config)
    }

    fn play(game: &mut Game, from: &str, to: &str) {
        game.make_move(sq(from).unwrap(), sq(to).unwrap())
            .unwrap_or_else(|err| panic!("{from}{to} should be legal: {err}"));
    }

    #[test]
    fn make_move_switches_side_and_clock() {
        let mut game = Game::new(humans());
        assert_eq!(game.clocks().running(), Some(Color::Light));

        let applied = game.make_move(sq("e2").unwrap(), sq("e4").unwrap()).expect("legal");
        assert_eq!(game.side_to_move(), Color::Dark);
        assert_eq!(applied.clock.stopped, Color::Light);
        assert_eq!(applied.clock.started, Some(Color::Dark));
        assert_eq!(applied.status, GameStatus::InProgress);
        assert_eq!(game.position().en_passant_target(), Some(sq("e3").unwrap()));
    }

    #[test]
    fn illegal_and_out_of_turn_moves_are_rejected_without_change() {
        let mut game = Game::new(humans());
        let before = game.position().clone();

        let err = game.make_move(sq("e2").unwrap(), sq("e5").unwrap()).expect_err("illegal");
        assert_eq!(err, GameError::IllegalMove { from: sq("e2").unwrap(), to: sq("e5").unwrap() });
        assert!(game.make_move(sq("e7").unwrap(), sq("e5").unwrap()).is_err());
        assert_eq!(*game.position(), before);
        assert_eq!(game.side_to_move(), Color::Light);
        assert!(game.history().is_empty());
    }

    #[test]
    fn selection_flow_keeps_selection_on_illegal_target() {
        let mut game = Game::new(humans());
        assert_eq!(game.select(sq("e7").unwrap()), Err(GameError::NoPieceSelected));
        assert_eq!(game.move_selection(sq("e4").unwrap()).map(|_| ()), Err(GameError::NoPieceSelected));

        let moves = game.select(sq("g1").unwrap()).expect("own piece");
        assert_eq!(moves.len(), 2);
        assert!(game.move_selection(sq("g3").unwrap()).is_err());
        assert_eq!(game.selection(), Some(sq("g1").unwrap()));

        game.move_selection(sq("f3").unwrap()).expect("legal");
        assert_eq!(game.selection(), None);
        assert!(game.position().piece_at(sq("f3").unwrap()).is_some());
    }

    #[test]
    fn undo_then_redo_reproduces_exact_positions() {
        let mut game = from_fen("r3k2r/1P6/8/3pP3/8/8/8/R3K2R w KQkq d6 0 1", humans());
        let start = game.position().clone();

        play(&mut game, "e5", "d6");
        play(&mut game, "e8", "g8");
        play(&mut game, "e1", "c1");
        play(&mut game, "f8", "f7");
        play(&mut game, "b7", "a8");

        let mut snapshots = Vec::new();
        for _ in 0..5 {
            snapshots.push(game.position().clone());
            game.undo().expect("history available");
        }
        assert_eq!(*game.position(), start);
        assert_eq!(game.side_to_move(), Color::Light);
        assert_eq!(game.position().en_passant_target(), Some(sq("d6").unwrap()));
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));

        for expected in snapshots.iter().rev() {
            game.redo().expect("redo available");
            assert_eq!(game.position(), expected);
        }
        let promoted = game.position().piece_at(sq("a8").unwrap()).expect("promoted piece");
        assert_eq!(promoted.kind, PieceKind::Queen);
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
    }

    #[test]
    fn undo_restores_prior_moved_flag_and_castling_rook() {
        let mut game = from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", humans());
        play(&mut game, "e1", "g1");
        assert!(game.position().piece_at(sq("f1").unwrap()).expect("rook").has_moved);

        game.undo().expect("undo castle");
        let king = game.position().piece_at(sq("e1").unwrap()).expect("king back");
        let rook = game.position().piece_at(sq("h1").unwrap()).expect("rook back");
        assert!(!king.has_moved);
        assert!(!rook.has_moved);

        play(&mut game, "a1", "a2");
        play(&mut game, "e8", "e7");
        play(&mut game, "a2", "a3");
        game.undo().expect("undo second rook move");
        assert!(game.position().piece_at(sq("a2").unwrap()).expect("rook").has_moved);
    }

    #[test]
    fn new_move_after_undo_discards_redo_branch() {
        let mut game = Game::new(humans());
        play(&mut game, "e2", "e4");
        game.undo().expect("undo");
        play(&mut game, "d2", "d4");
        assert_eq!(game.redo(), Err(GameError::NothingToRedo));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn navigation_clears_selection_and_suppresses_computer() {
        let config = GameConfig {
            players: [PlayerKind::Human, shallow_computer()],
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        play(&mut game, "e2", "e4");
        assert!(game.computer_should_move());

        game.undo().expect("undo");
        game.select(sq("d2").unwrap()).expect("own piece");
        game.redo().expect("redo");
        assert_eq!(game.selection(), None);
        assert!(game.computer_suppressed());
        assert!(!game.computer_should_move());

        game.resume_computer();
        assert!(game.computer_should_move());
    }

    #[test]
    fn knight_shuffle_counts_repetitions() {
        let mut game = Game::new(humans());
        for round in 1..=2u8 {
            play(&mut game, "g1", "f3");
            play(&mut game, "g8", "f6");
            play(&mut game, "f3", "g1");
            play(&mut game, "f6", "g8");
            assert_eq!(game.repetition_count(), round);
        }
        play(&mut game, "g1", "f3");
        play(&mut game, "g8", "f6");
        assert_eq!(game.repetition_count(), 3);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::Repetition));

        game.undo().expect("undo");
        assert_eq!(game.status(), GameStatus::InProgress);
        game.redo().expect("redo");
        assert_eq!(game.repetition_count(), 3);
    }

    #[test]
    fn shuffling_rooks_reaches_threefold_repetition() {
        let mut game = from_fen("r3k3/8/8/8/8/8/8/4K2R w - - 0 1", humans());
        play(&mut game, "h1", "h2");
        for _ in 0..2 {
            play(&mut game, "a8", "a7");
            play(&mut game, "h2", "h1");
            play(&mut game, "a7", "a8");
            play(&mut game, "h1", "h2");
        }
        assert_eq!(game.repetition_count(), 3);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::Repetition));
        assert_eq!(
            game.make_move(sq("a8").unwrap(), sq("a7").unwrap()).map(|_| ()),
            Err(GameError::GameOver)
        );

        game.undo().expect("undo allowed after game over");
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn status_reports_checkmate_stalemate_material_and_time() {
        let mut game = Game::new(humans());
        play(&mut game, "f2", "f3");
        play(&mut game, "e7", "e5");
        play(&mut game, "g2", "g4");
        let applied = game.make_move(sq("d8").unwrap(), sq("h4").unwrap()).expect("mate");
        assert_eq!(applied.status, GameStatus::Checkmate { winner: Color::Dark });
        assert_eq!(applied.clock.started, None);

        let stalemate = from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", humans());
        assert_eq!(stalemate.status(), GameStatus::Stalemate);

        let bare = from_fen("8/8/4k3/8/8/4K3/8/8 w - - 0 1", humans());
        assert_eq!(bare.status(), GameStatus::Draw(DrawReason::InsufficientMaterial));

        let mut timed = Game::new(humans());
        timed.set_remaining_time(Color::Light, 0);
        assert_eq!(timed.status(), GameStatus::TimeExpired { loser: Color::Light });
        assert_eq!(timed.clocks().running(), None);
    }

    #[test]
    fn computer_move_runs_in_background_and_applies_through_make_move() {
        let config = GameConfig {
            players: [PlayerKind::Human, shallow_computer()],
            ..GameConfig::default()
        };
        let mut game = Game::new(config);
        assert_eq!(game.request_computer_move(None), Err(GameError::NotComputerTurn));

        play(&mut game, "e2", "e4");
        game.request_computer_move(None).expect("computer to move");
        assert_eq!(game.request_computer_move(None), Err(GameError::SearchInFlight));
        assert_eq!(game.undo(), Err(GameError::SearchInFlight));
        assert!(game.make_move(sq("d2").unwrap(), sq("d4").unwrap()).is_err());

        let applied = loop {
            if let Some(applied) = game.poll_computer_move().expect("search succeeds") {
                break applied;
            }
            std::thread::yield_now();
        };
        assert_eq!(applied.record.mover(), Color::Dark);
        assert_eq!(game.side_to_move(), Color::Light);
        assert_eq!(game.history().applied(), 2);
        assert_eq!(game.poll_computer_move(), Err(GameError::NoSearchPending));
    }

    #[test]
    fn synchronous_computer_move_takes_hanging_queen() {
        let config = GameConfig {
            players: [shallow_computer(), PlayerKind::Human],
            ..GameConfig::default()
        };
        let mut game = from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1", config);
        let applied = game.play_computer_move(None).expect("computer move");
        assert_eq!(applied.record.to, sq("e2").unwrap());
        assert!(applied.record.is_capture());
    }

    #[test]
    fn restart_resets_board_and_history() {
        let mut game = Game::new(humans());
        play(&mut game, "e2", "e4");
        game.restart().expect("no search pending");
        assert_eq!(*game.position(), Position::starting());
        assert!(game.history().is_empty());
        assert_eq!(game.side_to_move(), Color::Light);
    }
}
