//! Bounded undo/redo log.
//!
//! Snapshots are `Arc<Resume>` so a push is a pointer copy; the document
//! itself is copy-on-write via `Arc::make_mut` in the reducer. The document
//! carries no history fields, so snapshots cannot self-reference.

use std::collections::VecDeque;
use std::sync::Arc;

use super::model::Resume;

/// Maximum number of snapshots retained. Oldest are evicted first.
pub const HISTORY_LIMIT: usize = 50;

/// Linear undo/redo log with a cursor pointing at the snapshot representing
/// the currently visible state.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: VecDeque<Arc<Resume>>,
    cursor: usize,
}

impl History {
    /// Creates a log seeded with the initial document as its only snapshot.
    pub fn new(initial: Arc<Resume>) -> Self {
        let mut snapshots = VecDeque::with_capacity(HISTORY_LIMIT);
        snapshots.push_back(initial);
        Self {
            snapshots,
            cursor: 0,
        }
    }

    /// Appends a snapshot after the cursor, discarding any redo branch.
    ///
    /// A new edit after an undo abandons the redone branch (standard linear
    /// undo semantics). At capacity the oldest snapshot is evicted.
    pub fn push(&mut self, snapshot: Arc<Resume>) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push_back(snapshot);
        if self.snapshots.len() > HISTORY_LIMIT {
            self.snapshots.pop_front();
        }
        self.cursor = self.snapshots.len() - 1;
    }

    /// Steps the cursor back. Returns `None` at the bottom of the log.
    pub fn undo(&mut self) -> Option<Arc<Resume>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor).cloned()
    }

    /// Steps the cursor forward. Returns `None` at the top of the log.
    pub fn redo(&mut self) -> Option<Arc<Resume>> {
        if self.cursor + 1 >= self.snapshots.len() {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor).cloned()
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(summary: &str) -> Arc<Resume> {
        let mut resume = Resume::blank();
        resume.summary = summary.to_string();
        Arc::new(resume)
    }

    #[test]
    fn test_push_caps_length_with_fifo_eviction() {
        let mut history = History::new(snap("initial"));
        for i in 0..120 {
            history.push(snap(&format!("edit {}", i)));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        // The newest snapshot is the last edit, and the oldest retained one
        // is the edit 49 pushes before it.
        assert_eq!(history.snapshots.back().unwrap().summary, "edit 119");
        assert_eq!(history.snapshots.front().unwrap().summary, "edit 70");
        assert_eq!(history.cursor(), HISTORY_LIMIT - 1);
    }

    #[test]
    fn test_undo_at_bottom_is_noop() {
        let mut history = History::new(snap("initial"));
        assert!(!history.can_undo());
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn test_redo_at_top_is_noop() {
        let mut history = History::new(snap("initial"));
        history.push(snap("edit"));
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
    }

    #[test]
    fn test_push_truncates_redo_branch() {
        let mut history = History::new(snap("initial"));
        history.push(snap("a"));
        history.push(snap("b"));
        history.undo();
        history.push(snap("c"));
        assert!(!history.can_redo());
        assert_eq!(history.len(), 3);
        assert_eq!(history.snapshots.back().unwrap().summary, "c");
    }
}
