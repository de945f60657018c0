//! Session-bound hydration controller.
//!
//! Watches the authentication lifecycle and drives one (re)hydration of the
//! document per authenticated identity: on each new identity the
//! authoritative document is fetched once and loaded wholesale into the
//! editor session. The identity is marked hydrated regardless of the fetch
//! outcome so a flaky backend cannot cause a hydration storm.
//!
//! A fetch that fails in transport is *not* treated as "no profile exists":
//! the local cache's active profile is loaded instead, and only when the
//! cache is also empty does the session fall back to a blank document. A
//! successful fetch that finds no profile is a legitimate first-login state
//! and loads a blank document.

use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use vitae_core::auth::{AuthObserver, AuthState};
use vitae_core::profile::{Profile, ProfileCache, ProfileGateway};
use vitae_core::resume::{Resume, ResumeAction};

use crate::session::EditorSession;
use crate::synchronizer::Synchronizer;

/// Where the controller stands with respect to the current identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationState {
    /// No session; the document remains whatever was last loaded.
    Unauthenticated,
    /// A fetch for a newly authenticated identity is in flight.
    Hydrating,
    /// Terminal per-identity state until the identity changes again.
    Hydrated(String),
}

/// Drives one-time document hydration per authenticated identity.
pub struct HydrationController {
    gateway: Arc<dyn ProfileGateway>,
    cache: Arc<dyn ProfileCache>,
    auth: Arc<dyn AuthObserver>,
    session: Arc<EditorSession>,
    synchronizer: Arc<Synchronizer>,
    state: Mutex<HydrationState>,
}

impl HydrationController {
    pub fn new(
        gateway: Arc<dyn ProfileGateway>,
        cache: Arc<dyn ProfileCache>,
        auth: Arc<dyn AuthObserver>,
        session: Arc<EditorSession>,
        synchronizer: Arc<Synchronizer>,
    ) -> Self {
        Self {
            gateway,
            cache,
            auth,
            session,
            synchronizer,
            state: Mutex::new(HydrationState::Unauthenticated),
        }
    }

    pub fn state(&self) -> HydrationState {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn set_state(&self, next: HydrationState) {
        let mut state = self
            .state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *state = next;
    }

    /// Processes one authentication transition.
    ///
    /// Never acts while the provider is still loading. A duplicate
    /// transition for an identity that is already hydrated (or already being
    /// hydrated) triggers no fetch.
    pub async fn on_auth_change(&self, auth_state: &AuthState) {
        if auth_state.is_loading {
            return;
        }
        let Some(user_id) = auth_state.user_id.clone() else {
            self.set_state(HydrationState::Unauthenticated);
            return;
        };

        {
            let mut state = self
                .state
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            match &*state {
                HydrationState::Hydrated(hydrated) if *hydrated == user_id => return,
                HydrationState::Hydrating => return,
                _ => *state = HydrationState::Hydrating,
            }
        }

        let document = self.fetch_document(&user_id).await;
        self.session.dispatch(ResumeAction::Load {
            resume: document.clone(),
        });
        self.synchronizer.rebaseline(&document);
        self.set_state(HydrationState::Hydrated(user_id));
    }

    /// Fetches the authoritative document for a fresh identity.
    async fn fetch_document(&self, user_id: &str) -> Resume {
        match self.gateway.list().await {
            Ok(profiles) => match choose_profile(&profiles) {
                Some(profile) => {
                    self.cache.save(&profiles).await;
                    tracing::info!(
                        "[Hydration] Loaded profile {} for user {}",
                        profile.id,
                        user_id
                    );
                    profile.resume.clone()
                }
                None => {
                    tracing::info!(
                        "[Hydration] No profile for user {}, starting blank",
                        user_id
                    );
                    Resume::blank()
                }
            },
            Err(err) if err.is_not_found() => {
                tracing::info!("[Hydration] No profile for user {}, starting blank", user_id);
                Resume::blank()
            }
            Err(err) => {
                tracing::warn!(
                    "[Hydration] Fetch for user {} failed, falling back to local cache: {}",
                    user_id,
                    err
                );
                let local = self.cache.list().await;
                match choose_profile(&local) {
                    Some(profile) => profile.resume.clone(),
                    None => Resume::blank(),
                }
            }
        }
    }

    /// Spawns the watcher over the authentication lifecycle.
    ///
    /// The state present at spawn is processed too, so an already signed-in
    /// user hydrates without waiting for the next transition.
    pub fn spawn(self: Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let mut rx = self.auth.subscribe();
        tokio::spawn(async move {
            loop {
                let auth_state = rx.borrow_and_update().clone();
                self.on_auth_change(&auth_state).await;
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
        })
    }
}

/// The active profile when one is flagged, else the first by list order.
fn choose_profile(profiles: &[Profile]) -> Option<&Profile> {
    profiles
        .iter()
        .find(|p| p.is_active)
        .or_else(|| profiles.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use vitae_core::auth::AuthHandle;
    use vitae_core::error::VitaeError;
    use vitae_core::resume::ResumeAction;
    use vitae_infrastructure::MemoryProfileCache;

    use crate::synchronizer::Synchronizer;
    use crate::test_support::FakeGateway;

    struct Fixture {
        cache: Arc<MemoryProfileCache>,
        gateway: Arc<FakeGateway>,
        auth: Arc<AuthHandle>,
        session: Arc<EditorSession>,
        controller: HydrationController,
    }

    fn fixture(local: Vec<Profile>, remote: Vec<Profile>) -> Fixture {
        let cache = Arc::new(MemoryProfileCache::with_profiles(local));
        let gateway = Arc::new(FakeGateway::seeded(remote));
        let auth = Arc::new(AuthHandle::new());
        let session = EditorSession::new(Resume::blank());
        let synchronizer = Arc::new(Synchronizer::new(
            cache.clone(),
            gateway.clone(),
            auth.clone(),
        ));
        let controller = HydrationController::new(
            gateway.clone(),
            cache.clone(),
            auth.clone(),
            session.clone(),
            synchronizer,
        );
        Fixture {
            cache,
            gateway,
            auth,
            session,
            controller,
        }
    }

    fn signed_in(user_id: &str) -> AuthState {
        AuthState {
            user_id: Some(user_id.to_string()),
            is_loading: false,
        }
    }

    fn active_profile(summary: &str) -> Profile {
        let mut resume = Resume::blank();
        resume.summary = summary.to_string();
        let mut profile = Profile::new("Main", resume);
        profile.is_active = true;
        profile
    }

    #[tokio::test]
    async fn test_hydration_loads_active_remote_profile() {
        let profile = active_profile("from the server");
        let fx = fixture(vec![], vec![profile.clone()]);

        fx.controller.on_auth_change(&signed_in("user-1")).await;

        assert_eq!(fx.session.document().summary, "from the server");
        assert_eq!(
            fx.controller.state(),
            HydrationState::Hydrated("user-1".to_string())
        );
        // The remote list is mirrored into the cache.
        assert_eq!(fx.cache.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_hydration_is_idempotent_per_identity() {
        let fx = fixture(vec![], vec![active_profile("once")]);

        fx.controller.on_auth_change(&signed_in("user-1")).await;
        fx.controller.on_auth_change(&signed_in("user-1")).await;
        fx.controller.on_auth_change(&signed_in("user-1")).await;

        assert_eq!(fx.gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_identity_change_rehydrates() {
        let fx = fixture(vec![], vec![active_profile("shared")]);

        fx.controller.on_auth_change(&signed_in("user-1")).await;
        fx.controller.on_auth_change(&signed_in("user-2")).await;

        assert_eq!(fx.gateway.list_calls(), 2);
        assert_eq!(
            fx.controller.state(),
            HydrationState::Hydrated("user-2".to_string())
        );
    }

    #[tokio::test]
    async fn test_no_remote_profile_loads_blank_document() {
        let fx = fixture(vec![], vec![]);
        fx.session.dispatch(ResumeAction::SetSummary {
            summary: "stale local edits".to_string(),
        });

        fx.controller.on_auth_change(&signed_in("user-1")).await;

        assert_eq!(fx.session.document().summary, "");
        assert_eq!(
            fx.controller.state(),
            HydrationState::Hydrated("user-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_to_local_cache() {
        let cached = active_profile("cached copy");
        let fx = fixture(vec![cached], vec![]);
        fx.gateway.fail_with(VitaeError::transport("connection reset"));

        fx.controller.on_auth_change(&signed_in("user-1")).await;

        assert_eq!(fx.session.document().summary, "cached copy");
        // Still marked hydrated: no retry storm on flaky networks.
        assert_eq!(
            fx.controller.state(),
            HydrationState::Hydrated("user-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_transport_failure_with_empty_cache_loads_blank() {
        let fx = fixture(vec![], vec![]);
        fx.gateway.fail_with(VitaeError::transport("connection reset"));

        fx.controller.on_auth_change(&signed_in("user-1")).await;

        assert_eq!(fx.session.document().summary, "");
        assert!(matches!(fx.controller.state(), HydrationState::Hydrated(_)));
    }

    #[tokio::test]
    async fn test_no_action_while_provider_is_loading() {
        let fx = fixture(vec![], vec![active_profile("ready")]);
        let loading = AuthState {
            user_id: Some("user-1".to_string()),
            is_loading: true,
        };

        fx.controller.on_auth_change(&loading).await;

        assert_eq!(fx.gateway.list_calls(), 0);
        assert_eq!(fx.controller.state(), HydrationState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_sign_out_keeps_document_and_clears_identity() {
        let fx = fixture(vec![], vec![active_profile("mine")]);
        fx.controller.on_auth_change(&signed_in("user-1")).await;
        assert_eq!(fx.session.document().summary, "mine");

        fx.controller.on_auth_change(&AuthState::default()).await;

        // Document remains whatever was last loaded.
        assert_eq!(fx.session.document().summary, "mine");
        assert_eq!(fx.controller.state(), HydrationState::Unauthenticated);

        // Signing back in hydrates again.
        fx.controller.on_auth_change(&signed_in("user-1")).await;
        assert_eq!(fx.gateway.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_spawned_watcher_hydrates_on_sign_in() {
        let fx = fixture(vec![], vec![active_profile("watched")]);
        let controller = Arc::new(fixture_controller(&fx));
        let cancel = CancellationToken::new();
        let handle = controller.clone().spawn(cancel.clone());

        fx.auth.signed_in("user-1");

        let mut hydrated = false;
        for _ in 0..200 {
            if fx.session.document().summary == "watched" {
                hydrated = true;
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(hydrated, "watcher never hydrated the session");

        cancel.cancel();
        let _ = handle.await;
    }

    // Rebuilds a controller sharing the fixture's collaborators, for tests
    // that need it behind an Arc.
    fn fixture_controller(fx: &Fixture) -> HydrationController {
        let synchronizer = Arc::new(Synchronizer::new(
            fx.cache.clone(),
            fx.gateway.clone(),
            fx.auth.clone(),
        ));
        HydrationController::new(
            fx.gateway.clone(),
            fx.cache.clone(),
            fx.auth.clone(),
            fx.session.clone(),
            synchronizer,
        )
    }
}
