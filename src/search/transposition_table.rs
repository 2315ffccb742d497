//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct indexing with depth-preferred replacement and generation aging.
//! Entries remember whether their score is exact or a cutoff bound, and a
//! probe only answers when the stored depth covers the request and the bound
//! settles the current window.

use crate::move_generation::legal_move_generator::CandidateMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// True score is at least `score` (the node failed high).
    Lower,
    /// True score is at most `score` (the node failed low).
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: f64,
    pub bound: Bound,
    pub best_move: Option<CandidateMove>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    generations: Vec<u8>,
    current_generation: u8,
    stats: TTStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_entries(Self::DEFAULT_ENTRIES)
    }
}

impl TranspositionTable {
    pub const DEFAULT_ENTRIES: usize = 1 << 16;
    const AGE_REPLACE_THRESHOLD: u8 = 4;
    const DEPTH_REPLACE_MARGIN: u8 = 2;

    pub fn with_entries(count: usize) -> Self {
        let count = count.max(1);
        Self {
            entries: vec![None; count],
            generations: vec![0; count],
            current_generation: 0,
            stats: TTStats::default(),
        }
    }

    /// Advance TT generation, once per iterative-deepening iteration.
    #[inline]
    pub fn new_generation(&mut self) {
        self.current_generation = self.current_generation.wrapping_add(1);
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.generations.fill(0);
        self.current_generation = 0;
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Raw lookup by key, ignoring depth and bounds.
    pub fn lookup(&self, key: u64) -> Option<TTEntry> {
        self.entries[self.idx(key)].filter(|e| e.key == key)
    }

    /// Score usable for a search of `depth` plies inside `(alpha, beta)`.
    pub fn probe(&mut self, key: u64, depth: u8, alpha: f64, beta: f64) -> Option<f64> {
        self.stats.probes += 1;
        let idx = self.idx(key);
        let entry = self.entries[idx].filter(|e| e.key == key && e.depth >= depth)?;

        let usable = match entry.bound {
            Bound::Exact => true,
            Bound::Lower => entry.score >= beta,
            Bound::Upper => entry.score <= alpha,
        };
        if !usable {
            return None;
        }

        self.stats.hits += 1;
        self.generations[idx] = self.current_generation;
        Some(entry.score)
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        match self.entries[idx] {
            None => {
                self.entries[idx] = Some(entry);
                self.generations[idx] = self.current_generation;
            }
            Some(existing) => {
                let same_key = existing.key == entry.key;
                let age = self.current_generation.wrapping_sub(self.generations[idx]);
                let stale = age >= Self::AGE_REPLACE_THRESHOLD;

                let replace = if same_key {
                    entry.depth >= existing.depth
                } else {
                    stale
                        || entry.depth.saturating_add(Self::DEPTH_REPLACE_MARGIN) >= existing.depth
                };

                if replace {
                    self.entries[idx] = Some(entry);
                    self.generations[idx] = self.current_generation;
                }
            }
        }
    }
}
