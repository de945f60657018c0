//! Profile domain model.
//!
//! A profile is a named container for exactly one resume, plus the
//! bookkeeping the synchronizer needs: identifier, display name,
//! last-modified timestamp and the active flag. Across all profiles owned by
//! one user, at most one is active.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resume::Resume;

/// Maximum number of profiles when operating purely locally. The remote
/// backend is the source of truth for its own limits.
pub const MAX_LOCAL_PROFILES: usize = 4;

/// A named container for one resume document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique identifier (UUID format)
    pub id: String,
    /// Display name of the profile
    pub name: String,
    /// The resume document this profile wraps
    pub resume: Resume,
    /// Last-modified timestamp (epoch millis)
    pub updated_at: i64,
    /// Whether this profile is the one currently being edited
    #[serde(default)]
    pub is_active: bool,
}

impl Profile {
    /// Creates a new inactive profile wrapping the given resume.
    pub fn new(name: impl Into<String>, resume: Resume) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            resume,
            updated_at: Utc::now().timestamp_millis(),
            is_active: false,
        }
    }

    /// Refreshes the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().timestamp_millis();
    }
}

/// Partial update applied to a profile by the remote gateway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<Resume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
}

impl ProfilePatch {
    /// A patch carrying only the active flag.
    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }

    /// A patch carrying a new document and a fresh timestamp.
    pub fn document(resume: Resume) -> Self {
        Self {
            resume: Some(resume),
            updated_at: Some(Utc::now().timestamp_millis()),
            ..Self::default()
        }
    }

    /// A patch carrying only a new display name.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            updated_at: Some(Utc::now().timestamp_millis()),
            ..Self::default()
        }
    }
}

/// Synchronization state of one profile against the remote store.
///
/// `Healed` is entered when a remote write came back with a corrected
/// document identity that has been folded back into the local state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    #[default]
    LocalOnly,
    Syncing,
    Synced,
    Healed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_inactive_with_fresh_id() {
        let a = Profile::new("Default", Resume::blank());
        let b = Profile::new("Default", Resume::blank());
        assert!(!a.is_active);
        assert_ne!(a.id, b.id);
        assert!(a.updated_at > 0);
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ProfilePatch::active(true);
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object.get("isActive"), Some(&serde_json::json!(true)));
    }
}
