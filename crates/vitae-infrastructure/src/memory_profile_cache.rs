//! In-memory profile cache.
//!
//! Used by tests and by embeddings that opt out of on-disk caching.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vitae_core::profile::{Profile, ProfileCache};

/// Profile cache that never touches the disk.
#[derive(Default)]
pub struct MemoryProfileCache {
    profiles: Arc<Mutex<Vec<Profile>>>,
}

impl MemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a cache pre-seeded with profiles.
    pub fn with_profiles(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
        }
    }
}

#[async_trait]
impl ProfileCache for MemoryProfileCache {
    async fn list(&self) -> Vec<Profile> {
        self.profiles.lock().await.clone()
    }

    async fn save(&self, profiles: &[Profile]) {
        let mut cached = self.profiles.lock().await;
        *cached = profiles.to_vec();
    }
}
