//! Linear undo/redo history.
//!
//! Records plus a cursor counting how many of them are currently applied.
//! Pushing while the cursor is behind the tail discards the redo branch.

use crate::game_state::move_record::MoveRecord;

#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    records: Vec<MoveRecord>,
    applied: usize,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a freshly played move, truncating any redo branch first.
    pub fn push(&mut self, record: MoveRecord) {
        self.records.truncate(self.applied);
        self.records.push(record);
        self.applied += 1;
    }

    /// Record that would be reverted by the next undo.
    #[inline]
    pub fn last_applied(&self) -> Option<&MoveRecord> {
        self.applied.checked_sub(1).map(|idx| &self.records[idx])
    }

    /// Record that would be replayed by the next redo.
    #[inline]
    pub fn next_redo(&self) -> Option<&MoveRecord> {
        self.records.get(self.applied)
    }

    pub(crate) fn step_back(&mut self) -> Option<MoveRecord> {
        let record = *self.last_applied()?;
        self.applied -= 1;
        Some(record)
    }

    /// Advance the cursor, replacing the stored record with the replayed one.
    pub(crate) fn step_forward(&mut self, replayed: MoveRecord) {
        debug_assert!(self.applied < self.records.len(), "redo past history tail");
        debug_assert_eq!(self.records[self.applied], replayed, "redo diverged from history");
        self.records[self.applied] = replayed;
        self.applied += 1;
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.applied > 0
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.applied < self.records.len()
    }

    /// Number of moves currently applied to the board.
    #[inline]
    pub fn applied(&self) -> usize {
        self.applied
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Applied moves in play order.
    pub fn applied_moves(&self) -> &[MoveRecord] {
        &self.records[..self.applied]
    }
}
