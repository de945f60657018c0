//! The synchronizer: reconciles the local cache and the remote store.
//!
//! Owns active-profile selection, mirrors every accepted edit to both
//! stores after a debounced quiet period, and resolves identity drift when
//! the remote store corrects a document identifier.
//!
//! Everything on the autosave path is caught and logged; autosave is a
//! background concern the user did not explicitly trigger. Explicit
//! operations (create, delete, switch, rename, `persist_document` called
//! directly) propagate their errors to the caller.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use vitae_core::auth::AuthObserver;
use vitae_core::error::{Result, VitaeError};
use vitae_core::profile::{
    MAX_LOCAL_PROFILES, Profile, ProfileCache, ProfileGateway, ProfilePatch, SyncStatus,
};
use vitae_core::resume::{Resume, ResumeAction};

use crate::session::EditorSession;

/// Tuning knobs for the synchronizer.
#[derive(Debug, Clone)]
pub struct SynchronizerConfig {
    /// Quiet period with no edits before an autosave fires.
    pub quiet_period: Duration,
    /// Profile cap enforced when operating purely locally.
    pub max_local_profiles: usize,
}

impl Default for SynchronizerConfig {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_secs(1),
            max_local_profiles: MAX_LOCAL_PROFILES,
        }
    }
}

/// Reconciles the local profile cache with the remote profile store.
pub struct Synchronizer {
    cache: Arc<dyn ProfileCache>,
    gateway: Arc<dyn ProfileGateway>,
    auth: Arc<dyn AuthObserver>,
    config: SynchronizerConfig,
    /// Serialization of the last successfully persisted document, used to
    /// suppress redundant writes.
    last_persisted: Mutex<Option<String>>,
    /// Per-profile synchronization state machine.
    status: Mutex<HashMap<String, SyncStatus>>,
}

impl Synchronizer {
    pub fn new(
        cache: Arc<dyn ProfileCache>,
        gateway: Arc<dyn ProfileGateway>,
        auth: Arc<dyn AuthObserver>,
    ) -> Self {
        Self::with_config(cache, gateway, auth, SynchronizerConfig::default())
    }

    pub fn with_config(
        cache: Arc<dyn ProfileCache>,
        gateway: Arc<dyn ProfileGateway>,
        auth: Arc<dyn AuthObserver>,
        config: SynchronizerConfig,
    ) -> Self {
        Self {
            cache,
            gateway,
            auth,
            config,
            last_persisted: Mutex::new(None),
            status: Mutex::new(HashMap::new()),
        }
    }

    fn is_authenticated(&self) -> bool {
        self.auth.current().is_authenticated()
    }

    /// Synchronization state of one profile. Profiles the synchronizer has
    /// not written yet report `LocalOnly`.
    pub fn sync_status(&self, profile_id: &str) -> SyncStatus {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(profile_id)
            .copied()
            .unwrap_or_default()
    }

    fn set_status(&self, profile_id: &str, status: SyncStatus) {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(profile_id.to_string(), status);
    }

    fn forget_status(&self, profile_id: &str) {
        self.status
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(profile_id);
    }

    /// Re-derives the "last persisted" fingerprint from a freshly loaded
    /// document so a stale autosave timer compares against the new baseline
    /// instead of writing outdated data. Called on hydration and profile
    /// switch.
    pub fn rebaseline(&self, resume: &Resume) {
        let mut last = self
            .last_persisted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = serde_json::to_string(resume).ok();
    }

    fn last_fingerprint(&self) -> Option<String> {
        self.last_persisted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn record_fingerprint(&self, serialized: String) {
        let mut last = self
            .last_persisted
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(serialized);
    }

    /// Lists profiles from the authoritative source: remote when a session
    /// exists (mirrored into the cache as read-through), local otherwise or
    /// when the remote errs.
    pub async fn list_profiles(&self) -> Vec<Profile> {
        if self.is_authenticated() {
            match self.gateway.list().await {
                Ok(remote) => {
                    self.cache.save(&remote).await;
                    return remote;
                }
                Err(err) => {
                    tracing::warn!(
                        "[Synchronizer] Remote list failed, falling back to local: {}",
                        err
                    );
                }
            }
        }
        self.cache.list().await
    }

    /// Returns the active profile, electing one when none is flagged.
    ///
    /// The election (first profile by list order) is persisted to whichever
    /// store is reachable; a failed remote update must not block local
    /// usage. An empty profile list bootstraps a default profile.
    pub async fn active_profile(&self) -> Result<Profile> {
        let mut profiles = self.list_profiles().await;
        if profiles.is_empty() {
            return self.create_profile("Default", Resume::blank()).await;
        }

        if let Some(active) = profiles.iter().find(|p| p.is_active) {
            return Ok(active.clone());
        }

        profiles[0].is_active = true;
        let elected = profiles[0].clone();
        self.cache.save(&profiles).await;
        if self.is_authenticated() {
            if let Err(err) = self
                .gateway
                .update(&elected.id, ProfilePatch::active(true))
                .await
            {
                tracing::warn!(
                    "[Synchronizer] Could not persist election of {} remotely: {}",
                    elected.id,
                    err
                );
            }
        }
        tracing::info!("[Synchronizer] Elected profile {} as active", elected.id);
        Ok(elected)
    }

    /// Creates a profile around a seed document.
    ///
    /// The seed gets a fresh document identifier. The local cache always
    /// mirrors the result, even when the remote call succeeded. Purely local
    /// creation is bounded by the profile cap; the remote path is not (the
    /// backend is the source of truth there).
    pub async fn create_profile(&self, name: &str, seed: Resume) -> Result<Profile> {
        let mut resume = seed;
        resume.id = Uuid::new_v4().to_string();

        let mut profiles = self.cache.list().await;
        let nothing_active = !profiles.iter().any(|p| p.is_active);

        if self.is_authenticated() {
            match self.gateway.create(name, &resume).await {
                Ok(mut created) => {
                    if nothing_active {
                        created.is_active = true;
                        if let Err(err) = self
                            .gateway
                            .update(&created.id, ProfilePatch::active(true))
                            .await
                        {
                            tracing::warn!(
                                "[Synchronizer] Could not activate {} remotely: {}",
                                created.id,
                                err
                            );
                        }
                    }
                    profiles.push(created.clone());
                    self.cache.save(&profiles).await;
                    self.set_status(&created.id, SyncStatus::Synced);
                    return Ok(created);
                }
                Err(err) => {
                    tracing::warn!(
                        "[Synchronizer] Remote create failed, creating locally: {}",
                        err
                    );
                }
            }
        }

        if profiles.len() >= self.config.max_local_profiles {
            return Err(VitaeError::ProfileLimitReached {
                max: self.config.max_local_profiles,
            });
        }

        let mut profile = Profile::new(name, resume);
        if nothing_active {
            profile.is_active = true;
        }
        profiles.push(profile.clone());
        self.cache.save(&profiles).await;
        self.set_status(&profile.id, SyncStatus::LocalOnly);
        Ok(profile)
    }

    /// Deletes a profile. The last remaining profile cannot be deleted.
    ///
    /// When the deleted profile was active, the first remaining profile is
    /// elected and the election mirrored to whichever stores are reachable.
    pub async fn delete_profile(&self, id: &str) -> Result<()> {
        let mut profiles = self.list_profiles().await;
        if profiles.len() <= 1 {
            return Err(VitaeError::CannotDeleteLastProfile);
        }
        let Some(position) = profiles.iter().position(|p| p.id == id) else {
            return Err(VitaeError::not_found("profile", id));
        };
        let removed = profiles.remove(position);

        if self.is_authenticated() {
            if let Err(err) = self.gateway.delete(id).await {
                tracing::warn!(
                    "[Synchronizer] Remote delete of {} failed, removing locally: {}",
                    id,
                    err
                );
            }
        }

        let mut elected_id = None;
        if removed.is_active {
            if let Some(first) = profiles.first_mut() {
                first.is_active = true;
                elected_id = Some(first.id.clone());
            }
        }
        self.cache.save(&profiles).await;
        self.forget_status(id);

        if let Some(elected_id) = elected_id {
            if self.is_authenticated() {
                if let Err(err) = self
                    .gateway
                    .update(&elected_id, ProfilePatch::active(true))
                    .await
                {
                    tracing::warn!(
                        "[Synchronizer] Could not persist election of {} remotely: {}",
                        elected_id,
                        err
                    );
                }
            }
            tracing::info!("[Synchronizer] Elected profile {} after delete", elected_id);
        }
        Ok(())
    }

    /// Makes the given profile active and returns it.
    ///
    /// The caller is expected to load the returned document into its editor
    /// session; the autosave baseline is re-derived here so a pending timer
    /// cannot write the previous profile's document over the new one.
    pub async fn switch_profile(&self, id: &str) -> Result<Profile> {
        let mut profiles = self.list_profiles().await;
        for profile in &mut profiles {
            profile.is_active = profile.id == id;
        }
        let Some(selected) = profiles.iter().find(|p| p.id == id).cloned() else {
            return Err(VitaeError::not_found("profile", id));
        };
        self.cache.save(&profiles).await;

        if self.is_authenticated() {
            if let Err(err) = self.gateway.update(id, ProfilePatch::active(true)).await {
                tracing::warn!(
                    "[Synchronizer] Could not persist switch to {} remotely: {}",
                    id,
                    err
                );
            }
        }

        self.rebaseline(&selected.resume);
        Ok(selected)
    }

    /// Renames a profile in both stores.
    pub async fn rename_profile(&self, id: &str, name: &str) -> Result<Profile> {
        let mut profiles = self.list_profiles().await;
        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Err(VitaeError::not_found("profile", id));
        };
        profile.name = name.to_string();
        profile.touch();
        let renamed = profile.clone();
        self.cache.save(&profiles).await;

        if self.is_authenticated() {
            if let Err(err) = self.gateway.update(id, ProfilePatch::rename(name)).await {
                tracing::warn!(
                    "[Synchronizer] Remote rename of {} failed, renamed locally: {}",
                    id,
                    err
                );
            }
        }
        Ok(renamed)
    }

    /// Writes the document to the active profile in both stores.
    ///
    /// Skips the write when the serialized document equals the last
    /// persisted serialization. Returns the corrected document when the
    /// remote store healed its identity; the caller must feed it back into
    /// the reducer as a full replace.
    pub async fn persist_document(&self, resume: &Resume) -> Result<Option<Resume>> {
        let serialized = serde_json::to_string(resume)?;
        if self.last_fingerprint().as_deref() == Some(serialized.as_str()) {
            return Ok(None);
        }

        let active = self.active_profile().await?;

        let mut profiles = self.cache.list().await;
        match profiles.iter_mut().find(|p| p.id == active.id) {
            Some(profile) => {
                profile.resume = resume.clone();
                profile.is_active = true;
                profile.touch();
            }
            None => {
                let mut profile = active.clone();
                profile.resume = resume.clone();
                profile.is_active = true;
                profile.touch();
                profiles.push(profile);
            }
        }
        self.cache.save(&profiles).await;

        let mut healed = None;
        if self.is_authenticated() {
            self.set_status(&active.id, SyncStatus::Syncing);
            match self
                .gateway
                .update(&active.id, ProfilePatch::document(resume.clone()))
                .await
            {
                Ok(remote) => {
                    if remote.resume.id != resume.id {
                        tracing::info!(
                            "[Synchronizer] Remote corrected document identity {} -> {}",
                            resume.id,
                            remote.resume.id
                        );
                        let corrected = remote.resume.clone();
                        if let Some(profile) = profiles.iter_mut().find(|p| p.id == active.id) {
                            profile.resume = corrected.clone();
                        }
                        self.cache.save(&profiles).await;
                        self.set_status(&active.id, SyncStatus::Healed);
                        healed = Some(corrected);
                    } else {
                        self.set_status(&active.id, SyncStatus::Synced);
                    }
                }
                Err(err) => {
                    tracing::warn!(
                        "[Synchronizer] Remote save failed, keeping local copy: {}",
                        err
                    );
                    self.set_status(&active.id, SyncStatus::LocalOnly);
                }
            }
        }

        match &healed {
            Some(corrected) => {
                let baseline = serde_json::to_string(corrected)?;
                self.record_fingerprint(baseline);
            }
            None => self.record_fingerprint(serialized),
        }
        Ok(healed)
    }

    /// Spawns the debounced autosave loop for a session.
    ///
    /// The loop restarts its quiet-period timer on every document change,
    /// skips persistence entirely while tailoring is in progress, and feeds
    /// healed identities back into the session. Cancel the token on
    /// teardown or profile switch so a stale write cannot land after a
    /// newer document has loaded.
    pub fn spawn_autosave(
        self: &Arc<Self>,
        session: Arc<EditorSession>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let synchronizer = self.clone();
        let mut rx: watch::Receiver<Arc<Resume>> = session.subscribe();
        tokio::spawn(async move {
            // The document present at spawn is the baseline, not an edit.
            {
                let initial = rx.borrow_and_update().clone();
                synchronizer.rebaseline(&initial);
            }
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
                // Quiet period: restarted by every further change.
                loop {
                    tokio::select! {
                        _ = cancel.cancelled() => return,
                        _ = tokio::time::sleep(synchronizer.config.quiet_period) => break,
                        changed = rx.changed() => {
                            if changed.is_err() {
                                return;
                            }
                        }
                    }
                }

                let document = rx.borrow_and_update().clone();
                if document.editor.is_tailoring {
                    tracing::debug!("[Synchronizer] Autosave suspended while tailoring");
                    continue;
                }
                match synchronizer.persist_document(&document).await {
                    Ok(Some(corrected)) => {
                        session.dispatch(ResumeAction::Load { resume: corrected });
                    }
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!("[Synchronizer] Autosave failed: {}", err);
                    }
                }
            }
        })
    }
}
