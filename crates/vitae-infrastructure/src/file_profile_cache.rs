//! File-backed profile cache.
//!
//! Reads and writes the local profile list through `CacheStorage` and keeps
//! an in-memory copy so reads never touch the disk. Blocking file I/O runs
//! on the blocking pool.
//!
//! Per the `ProfileCache` contract both operations are best-effort: any read
//! failure degrades to an empty list and any write failure is logged and
//! dropped. The editor keeps working on the in-memory copy either way.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;

use vitae_core::error::{Result, VitaeError};
use vitae_core::profile::{Profile, ProfileCache};

use crate::cache_storage::CacheStorage;
use crate::dto::{CacheRootV1_0, CacheRootV1_1, PROFILE_CACHE_VERSION};
use crate::paths::VitaePaths;

/// Profile cache persisted to one JSON file under the config directory.
pub struct FileProfileCache {
    /// In-memory copy of the cached profiles.
    profiles: Arc<Mutex<Vec<Profile>>>,
    /// File handle; `None` when no writable location could be resolved.
    storage: Option<Arc<CacheStorage>>,
}

impl FileProfileCache {
    /// Opens the cache at the default platform location.
    pub async fn new() -> Self {
        match VitaePaths::profile_cache_file() {
            Ok(path) => Self::at_path(path).await,
            Err(err) => {
                tracing::warn!(
                    "[ProfileCache] No cache location available, running in-memory: {}",
                    err
                );
                Self {
                    profiles: Arc::new(Mutex::new(Vec::new())),
                    storage: None,
                }
            }
        }
    }

    /// Opens the cache at an explicit path.
    pub async fn at_path(path: PathBuf) -> Self {
        let storage = Arc::new(CacheStorage::new(path));
        let initial = {
            let storage = storage.clone();
            tokio::task::spawn_blocking(move || load_profiles(&storage))
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!("[ProfileCache] Initial load task failed: {}", err);
                    Vec::new()
                })
        };
        Self {
            profiles: Arc::new(Mutex::new(initial)),
            storage: Some(storage),
        }
    }
}

#[async_trait]
impl ProfileCache for FileProfileCache {
    async fn list(&self) -> Vec<Profile> {
        self.profiles.lock().await.clone()
    }

    async fn save(&self, profiles: &[Profile]) {
        {
            let mut cached = self.profiles.lock().await;
            *cached = profiles.to_vec();
        }

        let Some(storage) = self.storage.clone() else {
            return;
        };
        let root = CacheRootV1_1::from_profiles(profiles);
        let value = match serde_json::to_value(&root) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("[ProfileCache] Failed to encode profiles: {}", err);
                return;
            }
        };

        let result = tokio::task::spawn_blocking(move || storage.save(&value)).await;
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => {
                tracing::warn!("[ProfileCache] Failed to write profile cache: {}", err);
            }
            Err(err) => {
                tracing::warn!("[ProfileCache] Write task failed: {}", err);
            }
        }
    }
}

fn load_profiles(storage: &CacheStorage) -> Vec<Profile> {
    match try_load(storage) {
        Ok(profiles) => profiles,
        Err(err) => {
            tracing::warn!(
                "[ProfileCache] Unreadable cache at {:?}, starting empty: {}",
                storage.path(),
                err
            );
            Vec::new()
        }
    }
}

fn try_load(storage: &CacheStorage) -> Result<Vec<Profile>> {
    let Some(value) = storage.load()? else {
        return Ok(Vec::new());
    };
    decode_profiles(value)
}

/// Minimal lookahead at the version field before committing to a schema.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionProbe {
    #[serde(default)]
    schema_version: Option<String>,
}

/// Decodes a cache file value, migrating older schemas to the current one.
pub(crate) fn decode_profiles(value: JsonValue) -> Result<Vec<Profile>> {
    use version_migrate::MigratesTo;

    let probe: VersionProbe = serde_json::from_value(value.clone())?;
    match probe.schema_version.as_deref() {
        Some(PROFILE_CACHE_VERSION) => {
            let root: CacheRootV1_1 = serde_json::from_value(value)?;
            Ok(root.into_profiles())
        }
        // Files written before versioning existed carry no field at all and
        // share the V1.0 shape.
        Some("1.0.0") | Some("") | None => {
            let root: CacheRootV1_0 = serde_json::from_value(value)?;
            Ok(root.migrate().into_profiles())
        }
        Some(other) => Err(VitaeError::migration(format!(
            "Unsupported profile cache schema '{}'",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitae_core::resume::Resume;

    fn profile(name: &str) -> Profile {
        Profile::new(name, Resume::blank())
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let dir = tempdir().unwrap();
        let cache = FileProfileCache::at_path(dir.path().join("profiles.json")).await;
        assert!(cache.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");

        let cache = FileProfileCache::at_path(path.clone()).await;
        let mut saved = profile("Main");
        saved.is_active = true;
        cache.save(std::slice::from_ref(&saved)).await;

        let reopened = FileProfileCache::at_path(path).await;
        assert_eq!(reopened.list().await, vec![saved]);
    }

    #[tokio::test]
    async fn test_corrupt_file_lists_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        std::fs::write(&path, "{definitely not json").unwrap();

        let cache = FileProfileCache::at_path(path).await;
        assert!(cache.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_v1_0_file_migrates_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.json");
        let legacy = serde_json::json!({
            "schemaVersion": "1.0.0",
            "profiles": [{
                "id": "p-1",
                "name": "Old",
                "resume": { "id": "r-1", "summary": "kept" },
                "updatedAt": 42
            }]
        });
        std::fs::write(&path, legacy.to_string()).unwrap();

        let cache = FileProfileCache::at_path(path).await;
        let profiles = cache.list().await;
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "p-1");
        assert_eq!(profiles[0].resume.summary, "kept");
        assert!(!profiles[0].is_active);
    }

    #[test]
    fn test_unknown_schema_version_is_an_error() {
        let value = serde_json::json!({ "schemaVersion": "9.0.0", "profiles": [] });
        assert!(decode_profiles(value).is_err());
    }
}
