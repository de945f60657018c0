//! Shared fakes for the application-layer tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use vitae_core::error::{Result, VitaeError};
use vitae_core::profile::{Profile, ProfileGateway, ProfilePatch};
use vitae_core::resume::Resume;

/// In-memory stand-in for the remote profile store.
///
/// Counts calls, can be switched into a failure mode, and can simulate the
/// backend correcting a document identity on write.
#[derive(Default)]
pub struct FakeGateway {
    profiles: Mutex<Vec<Profile>>,
    fail_with: Mutex<Option<VitaeError>>,
    heal_document_id_to: Mutex<Option<String>>,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Mutex::new(profiles),
            ..Self::default()
        }
    }

    /// Makes every subsequent call fail with the given error.
    pub fn fail_with(&self, err: VitaeError) {
        *self.fail_with.lock().unwrap() = Some(err);
    }

    /// Simulates the backend reassigning document identifiers on write.
    pub fn heal_document_id_to(&self, id: &str) {
        *self.heal_document_id_to.lock().unwrap() = Some(id.to_string());
    }

    pub fn profiles(&self) -> Vec<Profile> {
        self.profiles.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn failure(&self) -> Option<VitaeError> {
        self.fail_with.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileGateway for FakeGateway {
    async fn list(&self) -> Result<Vec<Profile>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        Ok(self.profiles())
    }

    async fn create(&self, name: &str, resume: &Resume) -> Result<Profile> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let profile = Profile::new(name, resume.clone());
        self.profiles.lock().unwrap().push(profile.clone());
        Ok(profile)
    }

    async fn update(&self, id: &str, patch: ProfilePatch) -> Result<Profile> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Err(VitaeError::not_found("profile", id));
        };
        if let Some(name) = patch.name {
            profile.name = name;
        }
        if let Some(resume) = patch.resume {
            profile.resume = resume;
        }
        if let Some(is_active) = patch.is_active {
            profile.is_active = is_active;
        }
        if let Some(updated_at) = patch.updated_at {
            profile.updated_at = updated_at;
        }
        if let Some(corrected) = self.heal_document_id_to.lock().unwrap().clone() {
            profile.resume.id = corrected;
        }
        Ok(profile.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure() {
            return Err(err);
        }
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        if profiles.len() == before {
            return Err(VitaeError::not_found("profile", id));
        }
        Ok(())
    }
}

/// Polls a condition until it holds or a two-second deadline passes.
pub async fn wait_until<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    condition()
}
