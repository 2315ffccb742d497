//! Per-move time budgeting from the mover's remaining clock.
//!
//! Callers pass raw clock data and the strategy decides the final budget. An
//! explicit per-move budget always wins.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeStrategy {
    /// Spend `1/n` of the remaining clock.
    Fraction(u64),
    /// Let a single search use everything that is left.
    WholeClock,
}

impl Default for TimeStrategy {
    fn default() -> Self {
        TimeStrategy::Fraction(20)
    }
}

impl TimeStrategy {
    /// Strategy from a `TimeFraction` option value, `0` meaning the whole clock.
    pub fn from_divisor(divisor: u64) -> Self {
        if divisor == 0 {
            TimeStrategy::WholeClock
        } else {
            TimeStrategy::Fraction(divisor)
        }
    }
}

/// Budget in milliseconds, or `None` for an untimed search.
pub fn resolve_budget_ms(
    explicit_ms: Option<u64>,
    remaining_ms: Option<u64>,
    strategy: TimeStrategy,
) -> Option<u64> {
    if explicit_ms.is_some() {
        return explicit_ms;
    }

    let remaining = remaining_ms?;
    Some(match strategy {
        TimeStrategy::Fraction(divisor) => (remaining / divisor.max(1)).max(1),
        TimeStrategy::WholeClock => remaining.max(1),
    })
}
