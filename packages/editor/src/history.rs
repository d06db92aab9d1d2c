//! # Undo/Redo History
//!
//! Linear history of component-list snapshots with a cursor.
//!
//! ## Design
//!
//! - The history always holds at least one entry, the list the editor
//!   opened with
//! - The entry at the cursor is the live list
//! - Committing truncates everything after the cursor, appends and moves
//!   the cursor to the new entry
//! - Undo/redo only move the cursor
//! - Snapshots are persistent lists, so unchanged components are shared
//!   between entries
//! - A batch (one drag gesture) collapses all of its commits into a single
//!   entry
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new(ComponentList::new());
//! history.commit(with_a);
//! history.commit(with_a_and_b);
//!
//! history.undo()?;   // live list is with_a again
//! history.redo()?;   // and back
//! ```

use crate::{Direction, EditorError};
use pagecraft_model::ComponentList;

#[derive(Debug)]
pub struct History {
    /// Snapshots, oldest first. Never empty.
    entries: Vec<ComponentList>,

    /// Index of the live snapshot
    cursor: usize,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    batch: Option<Batch>,
}

#[derive(Debug, Default)]
struct Batch {
    /// Set once the batch has produced its entry
    committed: bool,
}

impl History {
    /// Create a history with default max levels (100)
    pub fn new(initial: ComponentList) -> Self {
        Self::with_max_levels(initial, 100)
    }

    pub fn with_max_levels(initial: ComponentList, max_levels: usize) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
            max_levels,
            batch: None,
        }
    }

    /// The live component list
    pub fn current(&self) -> &ComponentList {
        &self.entries[self.cursor]
    }

    /// Record `components` as the new live list
    pub fn commit(&mut self, components: ComponentList) {
        if let Some(batch) = &mut self.batch {
            if batch.committed {
                self.entries[self.cursor] = components;
                return;
            }
            batch.committed = true;
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(components);
        self.cursor = self.entries.len() - 1;
        if self.batch.is_none() {
            self.trim();
        }
    }

    /// Drop the oldest entries beyond `max_levels`
    fn trim(&mut self) {
        if self.max_levels == 0 {
            return;
        }
        let limit = self.max_levels + 1;
        if self.entries.len() > limit {
            let excess = self.entries.len() - limit;
            self.entries.drain(..excess);
            self.cursor -= excess;
        }
    }

    /// Start a batch: commits until `end_batch` share one entry
    pub fn begin_batch(&mut self) {
        self.batch = Some(Batch::default());
    }

    /// Close the current batch. A batch that ended where it started leaves
    /// no entry behind. Trimming waits until here, so a discarded batch
    /// costs no undo level.
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.batch.take() {
            if batch.committed
                && self.cursor > 0
                && self.entries[self.cursor] == self.entries[self.cursor - 1]
            {
                self.entries.pop();
                self.cursor -= 1;
            }
            self.trim();
        }
    }

    pub fn is_batching(&self) -> bool {
        self.batch.is_some()
    }

    /// Step back one entry
    pub fn undo(&mut self) -> Result<&ComponentList, EditorError> {
        if !self.can_undo() {
            return Err(EditorError::AtBoundary(Direction::Undo));
        }
        self.cursor -= 1;
        Ok(self.current())
    }

    /// Step forward one entry
    pub fn redo(&mut self) -> Result<&ComponentList, EditorError> {
        if !self.can_redo() {
            return Err(EditorError::AtBoundary(Direction::Redo));
        }
        self.cursor += 1;
        Ok(self.current())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undo levels available
    pub fn undo_levels(&self) -> usize {
        self.cursor
    }

    /// Number of redo levels available
    pub fn redo_levels(&self) -> usize {
        self.entries.len() - self.cursor - 1
    }

    /// Number of snapshots held, including the live one
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Forget everything but the live list
    pub fn clear(&mut self) {
        let current = self.entries.swap_remove(self.cursor);
        self.entries = vec![current];
        self.cursor = 0;
        self.batch = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(ComponentList::new())
    }
}
