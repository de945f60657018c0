//! Local profile cache trait.

use async_trait::async_trait;

use super::model::Profile;

/// A best-effort local cache of the user's profiles.
///
/// The cache is a bootstrap and fallback store, never an authority, so both
/// operations are infallible by contract: a read failure (absent or corrupt
/// data) yields an empty list, which is a valid bootstrap state the
/// synchronizer turns into a default profile, and a failed save is logged
/// and dropped.
#[async_trait]
pub trait ProfileCache: Send + Sync {
    /// Returns all cached profiles, or an empty list when none can be read.
    async fn list(&self) -> Vec<Profile>;

    /// Replaces the cached profile list, best-effort.
    async fn save(&self, profiles: &[Profile]);
}
