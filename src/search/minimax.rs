//! Alpha-beta minimax over cloned positions.
//!
//! White maximises and black minimises. Every node checks the deadline and
//! returns `None` once it has passed, which unwinds the whole search so the
//! caller can discard the interrupted depth.

use std::time::Instant;

use crate::game_state::chess_types::*;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_apply::play_move;
use crate::move_generation::legal_move_generator::{all_legal_moves, CandidateMove};
use crate::search::board_scoring::BoardScorer;
use crate::search::move_ordering::order_moves;
use crate::search::position_hash::hash_position;
use crate::search::transposition_table::{Bound, TTEntry, TranspositionTable};

pub struct AlphaBeta<'a, S: BoardScorer> {
    scorer: &'a S,
    tt: &'a mut TranspositionTable,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<'a, S: BoardScorer> AlphaBeta<'a, S> {
    pub fn new(scorer: &'a S, tt: &'a mut TranspositionTable, deadline: Option<Instant>) -> Self {
        Self {
            scorer,
            tt,
            deadline,
            nodes: 0,
        }
    }

    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    #[inline]
    fn out_of_time(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Best root move and its score at `depth`. The first move in search
    /// order is kept unless a later one scores strictly better. `None` on
    /// timeout; `Some((None, eval))` when the side has no legal move.
    pub fn search_root(
        &mut self,
        position: &Position,
        side: Color,
        depth: u8,
    ) -> Option<(Option<CandidateMove>, f64)> {
        self.nodes += 1;
        if self.out_of_time() {
            return None;
        }

        let key = hash_position(position, side);
        let mut scratch = position.clone();
        let mut moves = all_legal_moves(&mut scratch, side);
        if moves.is_empty() || depth == 0 {
            return Some((None, self.scorer.score(position)));
        }
        order_moves(position, &mut moves, self.tt.lookup(key).and_then(|e| e.best_move));

        let maximizing = side == Color::Light;
        let mut alpha = f64::NEG_INFINITY;
        let mut beta = f64::INFINITY;
        let mut best: Option<(CandidateMove, f64)> = None;

        for mv in moves {
            let score = self.child_score(position, side, mv, depth, alpha, beta)?;
            let improves = match best {
                None => true,
                Some((_, best_score)) if maximizing => score > best_score,
                Some((_, best_score)) => score < best_score,
            };
            if improves {
                best = Some((mv, score));
            }
            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }
        }

        let (best_move, best_score) = best?;
        self.tt.store(TTEntry {
            key,
            depth,
            score: best_score,
            bound: Bound::Exact,
            best_move: Some(best_move),
        });
        Some((Some(best_move), best_score))
    }

    pub fn alpha_beta(
        &mut self,
        position: &Position,
        side: Color,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> Option<f64> {
        self.nodes += 1;
        if self.out_of_time() {
            return None;
        }
        if depth == 0 {
            return Some(self.scorer.score(position));
        }

        let key = hash_position(position, side);
        if let Some(score) = self.tt.probe(key, depth, alpha, beta) {
            return Some(score);
        }

        let mut scratch = position.clone();
        let mut moves = all_legal_moves(&mut scratch, side);
        if moves.is_empty() {
            return Some(self.scorer.score(position));
        }
        order_moves(position, &mut moves, self.tt.lookup(key).and_then(|e| e.best_move));

        let (alpha_in, beta_in) = (alpha, beta);
        let maximizing = side == Color::Light;
        let mut best_score = if maximizing { f64::NEG_INFINITY } else { f64::INFINITY };
        let mut best_move = None;

        for mv in moves {
            let score = self.child_score(position, side, mv, depth, alpha, beta)?;
            if maximizing {
                if best_move.is_none() || score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
            } else {
                if best_move.is_none() || score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        let bound = if best_score <= alpha_in {
            Bound::Upper
        } else if best_score >= beta_in {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.tt.store(TTEntry {
            key,
            depth,
            score: best_score,
            bound,
            best_move,
        });

        Some(best_score)
    }

    fn child_score(
        &mut self,
        position: &Position,
        side: Color,
        mv: CandidateMove,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> Option<f64> {
        let mut child = position.clone();
        play_move(&mut child, mv.from, mv.to)?;
        self.alpha_beta(&child, side.opposite(), depth - 1, alpha, beta)
    }
}

/// Unpruned, uncached minimax used as the reference for alpha-beta.
pub fn exhaustive_minimax<S: BoardScorer>(scorer: &S, position: &Position, side: Color, depth: u8) -> f64 {
    if depth == 0 {
        return scorer.score(position);
    }

    let mut scratch = position.clone();
    let moves = all_legal_moves(&mut scratch, side);
    if moves.is_empty() {
        return scorer.score(position);
    }

    let scores = moves.into_iter().filter_map(|mv| {
        let mut child = position.clone();
        play_move(&mut child, mv.from, mv.to)?;
        Some(exhaustive_minimax(scorer, &child, side.opposite(), depth - 1))
    });

    if side == Color::Light {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}
