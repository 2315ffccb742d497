//! Player kinds and per-game configuration.

use crate::search::iterative_deepening::SearchConfig;

/// Who decides moves for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Human,
    Computer(SearchConfig),
}

impl PlayerKind {
    #[inline]
    pub fn is_computer(&self) -> bool {
        matches!(self, PlayerKind::Computer(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Indexed by `Color::index()`.
    pub players: [PlayerKind; 2],
    pub initial_time_ms: [u64; 2],
}

impl GameConfig {
    pub const DEFAULT_TIME_MS: u64 = 300_000;
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: [PlayerKind::Human, PlayerKind::Computer(SearchConfig::default())],
            initial_time_ms: [Self::DEFAULT_TIME_MS; 2],
        }
    }
}
