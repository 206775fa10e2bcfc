//! Bounded linear undo/redo history.

use std::collections::VecDeque;

use crate::settings::{BackgroundSettings, IconSettings};

/// Maximum number of snapshots kept by the editor.
pub const MAX_HISTORY: usize = 50;

/// A snapshot of both settings records at one instant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistoryEntry {
    pub icon: IconSettings,
    pub background: BackgroundSettings,
}

impl HistoryEntry {
    pub fn new(icon: IconSettings, background: BackgroundSettings) -> Self {
        Self { icon, background }
    }
}

/// A linear history of snapshots with a cursor.
///
/// The cursor always points at a valid entry. Recording while the cursor is
/// not at the tail discards everything after it; recording past `capacity`
/// evicts the oldest entry. Navigating with [`undo`](Self::undo) and
/// [`redo`](Self::redo) never records.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: VecDeque<T>,
    cursor: usize,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates a history holding only `initial`, with the editor's default
    /// capacity.
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, MAX_HISTORY)
    }

    /// Creates a history with a custom capacity (at least 1).
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut entries = VecDeque::with_capacity(capacity);
        entries.push_back(initial);
        Self {
            entries,
            cursor: 0,
            capacity,
        }
    }

    /// Appends an entry after the cursor and moves the cursor onto it.
    pub fn record(&mut self, entry: T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(entry);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            self.cursor -= 1;
        }
        log::trace!("history: recorded entry {} of {}", self.cursor + 1, self.entries.len());
    }

    /// Moves the cursor back one entry. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Moves the cursor forward one entry. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Returns the entry under the cursor.
    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its initial entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }
}
