//! Clock state as plain data.
//!
//! Wall-clock ticking belongs to the embedding application, which reports the
//! remaining time per side. The controller only decides which clock runs.

use crate::game_state::chess_types::Color;

/// Which clock stopped and which started when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTransition {
    pub stopped: Color,
    /// `None` once the game is over.
    pub started: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clocks {
    remaining_ms: [u64; 2],
    running: Option<Color>,
}

impl Clocks {
    /// White's clock runs first.
    pub fn new(initial_ms: [u64; 2]) -> Self {
        Self {
            remaining_ms: initial_ms,
            running: Some(Color::Light),
        }
    }

    #[inline]
    pub fn remaining_ms(&self, color: Color) -> u64 {
        self.remaining_ms[color.index()]
    }

    #[inline]
    pub fn set_remaining_ms(&mut self, color: Color, ms: u64) {
        self.remaining_ms[color.index()] = ms;
    }

    #[inline]
    pub fn running(&self) -> Option<Color> {
        self.running
    }

    #[inline]
    pub fn is_expired(&self, color: Color) -> bool {
        self.remaining_ms(color) == 0
    }

    /// Stop `stopped`'s clock and start `started`'s.
    pub fn hand_over(&mut self, stopped: Color, started: Option<Color>) -> ClockTransition {
        self.running = started;
        ClockTransition { stopped, started }
    }

    #[inline]
    pub fn stop(&mut self) {
        self.running = None;
    }
}
