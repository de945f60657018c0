//! Authentication observation.
//!
//! The authentication provider itself lives outside this workspace. The
//! hydration controller and synchronizer only observe its state: the current
//! user identity (if any) and whether the provider is still resolving a
//! session. Consumers must not act while `is_loading` is true.

use tokio::sync::watch;

/// A snapshot of the authentication lifecycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    /// The authenticated user id, or `None` when signed out.
    pub user_id: Option<String>,
    /// True while the provider is still resolving a session.
    pub is_loading: bool,
}

impl AuthState {
    /// Whether a usable authenticated session exists right now.
    pub fn is_authenticated(&self) -> bool {
        !self.is_loading && self.user_id.is_some()
    }
}

/// Read-side contract over the authentication lifecycle.
pub trait AuthObserver: Send + Sync {
    /// The current state.
    fn current(&self) -> AuthState;

    /// A receiver that yields every state transition.
    fn subscribe(&self) -> watch::Receiver<AuthState>;
}

/// A watch-channel backed observer the embedding shell drives.
///
/// Starts signed out. The host calls `signed_in` / `signed_out` / `loading`
/// as its own provider transitions; tests drive it directly.
#[derive(Debug)]
pub struct AuthHandle {
    tx: watch::Sender<AuthState>,
}

impl AuthHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(AuthState::default());
        Self { tx }
    }

    /// Publishes a full state.
    pub fn set(&self, state: AuthState) {
        self.tx.send_replace(state);
    }

    /// Marks the provider as resolving a session.
    pub fn loading(&self) {
        let user_id = self.tx.borrow().user_id.clone();
        self.tx.send_replace(AuthState {
            user_id,
            is_loading: true,
        });
    }

    /// Publishes an authenticated identity.
    pub fn signed_in(&self, user_id: impl Into<String>) {
        self.tx.send_replace(AuthState {
            user_id: Some(user_id.into()),
            is_loading: false,
        });
    }

    /// Publishes a signed-out state.
    pub fn signed_out(&self) {
        self.tx.send_replace(AuthState::default());
    }
}

impl Default for AuthHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthObserver for AuthHandle {
    fn current(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_signed_out() {
        let handle = AuthHandle::new();
        assert!(!handle.current().is_authenticated());
    }

    #[test]
    fn test_loading_state_is_not_authenticated() {
        let handle = AuthHandle::new();
        handle.signed_in("user-1");
        handle.loading();
        assert!(!handle.current().is_authenticated());
        assert_eq!(handle.current().user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn test_subscribers_see_transitions() {
        let handle = AuthHandle::new();
        let rx = handle.subscribe();
        handle.signed_in("user-1");
        assert_eq!(rx.borrow().user_id.as_deref(), Some("user-1"));
    }
}
