//! Remote profile gateway trait.
//!
//! The backend is the authority source whenever a session exists. Every call
//! is fallible; the synchronizer always keeps a local fallback path. Errors
//! must be structured (`NotAuthenticated` / `NotFound` / `Transport`)
//! because the fallback behavior differs per class.

use async_trait::async_trait;

use super::model::{Profile, ProfilePatch};
use crate::error::Result;
use crate::resume::Resume;

/// An abstract gateway to the remote profile store.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Lists the profiles owned by the authenticated user.
    async fn list(&self) -> Result<Vec<Profile>>;

    /// Creates a profile wrapping the given document.
    ///
    /// The backend may assign identifiers of its own; the returned profile
    /// is authoritative.
    async fn create(&self, name: &str, resume: &Resume) -> Result<Profile>;

    /// Applies a partial update and returns the authoritative profile.
    async fn update(&self, id: &str, patch: ProfilePatch) -> Result<Profile>;

    /// Deletes a profile.
    async fn delete(&self, id: &str) -> Result<()>;
}
