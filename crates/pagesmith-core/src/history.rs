//! Bounded undo/redo history of document snapshots.
//!
//! The stack stores whole snapshots rather than inverse operations. `index`
//! points at the snapshot currently on screen; entries after it form the redo
//! branch, which is discarded as soon as a new snapshot is pushed.

/// Maximum number of snapshots to keep.
pub const MAX_HISTORY: usize = 50;

/// Snapshot history with a movable cursor.
#[derive(Debug, Clone)]
pub struct HistoryStack<T> {
    entries: Vec<T>,
    index: usize,
    capacity: usize,
}

impl<T: Clone> Default for HistoryStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> HistoryStack<T> {
    /// Create an empty history capped at [`MAX_HISTORY`] entries.
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY)
    }

    /// Create an empty history with a custom cap (at least one entry).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            capacity: capacity.max(1),
        }
    }

    /// Create a history whose first entry is `initial`.
    pub fn with_initial(initial: T) -> Self {
        let mut history = Self::new();
        history.push(initial);
        history
    }

    /// Record a new snapshot.
    ///
    /// Drops the redo branch, appends, then evicts the oldest entries past the
    /// cap. The index always ends on the new snapshot.
    pub fn push(&mut self, snapshot: T) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);

        if self.entries.len() > self.capacity {
            let overflow = self.entries.len() - self.capacity;
            self.entries.drain(..overflow);
            log::debug!("History full, evicted {} oldest snapshot(s)", overflow);
        }
        self.index = self.entries.len() - 1;
    }

    /// Step back one snapshot. Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            log::debug!("Nothing to undo");
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Step forward one snapshot. Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            log::debug!("Nothing to redo");
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.index > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.entries.is_empty() && self.index + 1 < self.entries.len()
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.index)
    }

    /// Cursor position (meaningless while empty).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    /// Forget everything and start again from `initial`.
    pub fn reset(&mut self, initial: T) {
        self.clear();
        self.push(initial);
    }
}
