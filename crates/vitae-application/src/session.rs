//! The editor session: the contract a UI shell consumes.
//!
//! Wraps the pure reducer state behind a synchronous dispatch surface and
//! broadcasts every document change on a watch channel the synchronizer (or
//! anything else) can observe. Dispatches are synchronous; only persistence
//! is async, and it lives elsewhere.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;

use vitae_core::resume::{EditorState, Resume, ResumeAction};

/// One open editing session over a resume document.
pub struct EditorSession {
    state: Mutex<EditorState>,
    tx: watch::Sender<Arc<Resume>>,
}

impl EditorSession {
    /// Opens a session over the given document.
    pub fn new(resume: Resume) -> Arc<Self> {
        let state = EditorState::new(resume);
        let (tx, _rx) = watch::channel(state.resume().clone());
        Arc::new(Self {
            state: Mutex::new(state),
            tx,
        })
    }

    // Lock poisoning is recovered, not propagated.
    fn lock_state(&self) -> MutexGuard<'_, EditorState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// The currently visible document.
    pub fn document(&self) -> Arc<Resume> {
        self.lock_state().resume().clone()
    }

    /// Applies one action and broadcasts the resulting document.
    pub fn dispatch(&self, action: ResumeAction) {
        let mut state = self.lock_state();
        *state = state.apply(&action);
        self.tx.send_replace(state.resume().clone());
    }

    /// Applies a serialized action. Unknown or malformed payloads are
    /// absorbed as no-ops so version skew with a UI shell degrades
    /// gracefully.
    pub fn dispatch_value(&self, value: serde_json::Value) {
        if let Some(action) = ResumeAction::from_value(value) {
            self.dispatch(action);
        }
    }

    pub fn undo(&self) {
        self.dispatch(ResumeAction::Undo);
    }

    pub fn redo(&self) {
        self.dispatch(ResumeAction::Redo);
    }

    pub fn can_undo(&self) -> bool {
        self.lock_state().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.lock_state().can_redo()
    }

    /// A receiver that yields the document after every dispatch.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Resume>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_updates_document_and_flags() {
        let session = EditorSession::new(Resume::blank());
        assert!(!session.can_undo());

        session.dispatch(ResumeAction::SetSummary {
            summary: "hello".to_string(),
        });
        assert_eq!(session.document().summary, "hello");
        assert!(session.can_undo());
        assert!(!session.can_redo());

        session.undo();
        assert_eq!(session.document().summary, "");
        assert!(session.can_redo());
    }

    #[test]
    fn test_subscribers_observe_dispatches() {
        let session = EditorSession::new(Resume::blank());
        let rx = session.subscribe();
        session.dispatch(ResumeAction::SetSummary {
            summary: "observed".to_string(),
        });
        assert_eq!(rx.borrow().summary, "observed");
    }

    #[test]
    fn test_unknown_serialized_action_is_noop() {
        let session = EditorSession::new(Resume::blank());
        let before = session.document();
        session.dispatch_value(serde_json::json!({ "type": "warp_drive" }));
        assert_eq!(session.document(), before);
        assert!(!session.can_undo());
    }

    #[test]
    fn test_dispatch_value_applies_known_action() {
        let session = EditorSession::new(Resume::blank());
        session.dispatch_value(serde_json::json!({
            "type": "set_summary",
            "summary": "from the wire"
        }));
        assert_eq!(session.document().summary, "from the wire");
    }
}
