//! Reversible operation history: undo/redo stacks and the cleared-items
//! buffer.
//!
//! Every mutation of the drawing list is recorded as a [`HistoryEntry`]
//! carrying enough state to be applied in both directions. The manager
//! keeps the standard linear model: recording a new entry after an undo
//! discards the redo stack, so there is no branching.

use crate::draw::frame::Frame;
use crate::draw::shape::Item;

/// A reversible record of one document mutation.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    /// An item was appended to the top of the drawing list.
    Add { item: Item },
    /// An item was removed from the given z-index.
    Remove { item: Item, index: usize },
    /// An item changed geometry or style in place.
    Mutate { before: Item, after: Item },
    /// The whole drawing list was cleared at once.
    Clear { items: Vec<Item> },
}

impl HistoryEntry {
    /// Applies the forward direction of the entry (redo).
    fn apply(&self, frame: &mut Frame) {
        match self {
            HistoryEntry::Add { item } => frame.push(item.clone()),
            HistoryEntry::Remove { item, .. } => {
                frame.remove(item.id());
            }
            HistoryEntry::Mutate { after, .. } => {
                frame.replace(after.clone());
            }
            HistoryEntry::Clear { .. } => {
                frame.take_all();
            }
        }
    }

    /// Applies the inverse direction of the entry (undo).
    fn revert(&self, frame: &mut Frame) {
        match self {
            HistoryEntry::Add { item } => {
                frame.remove(item.id());
            }
            HistoryEntry::Remove { item, index } => frame.insert(*index, item.clone()),
            HistoryEntry::Mutate { before, .. } => {
                frame.replace(before.clone());
            }
            HistoryEntry::Clear { items } => frame.set_items(items.clone()),
        }
    }

    /// Visits every item snapshot embedded in the entry.
    pub(crate) fn for_each_item_mut(&mut self, f: &mut impl FnMut(&mut Item)) {
        match self {
            HistoryEntry::Add { item } | HistoryEntry::Remove { item, .. } => f(item),
            HistoryEntry::Mutate { before, after } => {
                f(before);
                f(after);
            }
            HistoryEntry::Clear { items } => {
                for item in items {
                    f(item);
                }
            }
        }
    }
}

/// Manages the undo/redo stacks and the cleared-items buffer.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    /// Snapshot taken by `clear_drawing`, kept until the next recorded
    /// mutation or an explicit `restore_all`.
    cleared: Option<Vec<Item>>,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an already-applied mutation.
    ///
    /// Clears the redo stack (linear history) and drops the cleared-items
    /// buffer: the buffer only survives until the next non-restore
    /// mutation.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);
        self.redo_stack.clear();
        self.cleared = None;
    }

    /// Undoes the most recent mutation.
    ///
    /// Returns `false` (leaving all state untouched) when there is
    /// nothing to undo.
    pub fn undo(&mut self, frame: &mut Frame) -> bool {
        match self.undo_stack.pop() {
            Some(entry) => {
                entry.revert(frame);
                self.redo_stack.push(entry);
                true
            }
            None => {
                log::debug!("Undo requested with empty history");
                false
            }
        }
    }

    /// Reapplies the most recently undone mutation.
    pub fn redo(&mut self, frame: &mut Frame) -> bool {
        match self.redo_stack.pop() {
            Some(entry) => {
                entry.apply(frame);
                self.undo_stack.push(entry);
                true
            }
            None => {
                log::debug!("Redo requested with empty history");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Clears the drawing, keeping a recoverable snapshot.
    ///
    /// The snapshot lands both in the cleared-items buffer (for
    /// `restore_all`) and in a regular `Clear` history entry, so a plain
    /// undo also restores it. Returns `false` for an already-empty frame.
    pub fn clear_drawing(&mut self, frame: &mut Frame) -> bool {
        if frame.is_empty() {
            return false;
        }
        let items = frame.take_all();
        self.cleared = Some(items.clone());
        self.undo_stack.push(HistoryEntry::Clear { items });
        self.redo_stack.clear();
        true
    }

    /// Restores the full pre-clear drawing and hard-resets history.
    ///
    /// Unlike `undo`, this is a reset: both stacks are emptied and the
    /// buffer is discarded. Returns `false` when no cleared snapshot is
    /// available.
    pub fn restore_all(&mut self, frame: &mut Frame) -> bool {
        match self.cleared.take() {
            Some(items) => {
                frame.set_items(items);
                self.undo_stack.clear();
                self.redo_stack.clear();
                true
            }
            None => false,
        }
    }

    pub fn has_cleared_snapshot(&self) -> bool {
        self.cleared.is_some()
    }

    /// Visits every item snapshot held anywhere in the history, so that a
    /// canvas resize can keep stacks and buffer in the current coordinate
    /// space.
    pub(crate) fn for_each_item_mut(&mut self, mut f: impl FnMut(&mut Item)) {
        for entry in self.undo_stack.iter_mut().chain(self.redo_stack.iter_mut()) {
            entry.for_each_item_mut(&mut f);
        }
        if let Some(items) = &mut self.cleared {
            for item in items {
                f(item);
            }
        }
    }
}
