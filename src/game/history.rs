//! Linear undo/redo log.
//!
//! Two LIFO stacks of [`HistoryEntry`]. Recording a new entry discards the
//! redo stack, so there is never more than one redo chain.

use serde::Serialize;

use crate::game::tracker::PlayerId;

/// One reversible life point change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub player: PlayerId,
    pub previous_value: u32,
    pub new_value: u32,
}

#[derive(Debug, Clone, Default)]
pub struct History {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a fresh entry and drop anything that could have been redone.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.undo.push(entry);
        self.redo.clear();
    }

    /// Move the newest entry onto the redo stack and return it.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo.pop()?;
        self.redo.push(entry);
        Some(entry)
    }

    /// Move the most recently undone entry back onto the undo stack and return it.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push(entry);
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Undoable entries, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.undo
    }

    /// Undone entries, most recently undone last.
    pub fn undone(&self) -> &[HistoryEntry] {
        &self.redo
    }
}
