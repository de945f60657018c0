//! Profile cache DTOs and migrations.
//!
//! The cache file carries an explicit schema version so a structural change
//! to the profile shape has a defined migration path instead of ad hoc
//! shape-sniffing.
//!
//! - V1.0.0: initial single-profile-era schema (no active flag)
//! - V1.1.0: added `is_active` for multi-profile support

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use vitae_core::profile::Profile;
use vitae_core::resume::Resume;

/// Schema version written by the current code.
pub const PROFILE_CACHE_VERSION: &str = "1.1.0";

/// Cached profile V1.0.0 (pre multi-profile, no active flag).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_0 {
    pub id: String,
    pub name: String,
    pub resume: Resume,
    pub updated_at: i64,
}

/// Cached profile V1.1.0 (adds the active flag).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct ProfileV1_1 {
    pub id: String,
    pub name: String,
    pub resume: Resume,
    pub updated_at: i64,
    #[serde(default)]
    pub is_active: bool,
}

/// Type alias for the latest cached profile version.
pub type ProfileDTO = ProfileV1_1;

/// Migration from ProfileV1_0 to ProfileV1_1.
///
/// Adds `is_active` with default false; the synchronizer elects an active
/// profile on first load.
impl MigratesTo<ProfileV1_1> for ProfileV1_0 {
    fn migrate(self) -> ProfileV1_1 {
        ProfileV1_1 {
            id: self.id,
            name: self.name,
            resume: self.resume,
            updated_at: self.updated_at,
            is_active: false,
        }
    }
}

/// Convert ProfileV1_1 DTO to domain model.
impl IntoDomain<Profile> for ProfileV1_1 {
    fn into_domain(self) -> Profile {
        Profile {
            id: self.id,
            name: self.name,
            resume: self.resume,
            updated_at: self.updated_at,
            is_active: self.is_active,
        }
    }
}

/// Convert domain model to ProfileV1_1 DTO for persistence.
impl FromDomain<Profile> for ProfileV1_1 {
    fn from_domain(profile: Profile) -> Self {
        ProfileV1_1 {
            id: profile.id,
            name: profile.name,
            resume: profile.resume,
            updated_at: profile.updated_at,
            is_active: profile.is_active,
        }
    }
}

/// Root structure of the cache file V1.0.0.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
#[serde(rename_all = "camelCase")]
pub struct CacheRootV1_0 {
    /// Absent in files written before versioning existed.
    #[serde(default)]
    pub schema_version: String,
    #[serde(default)]
    pub profiles: Vec<ProfileV1_0>,
}

/// Root structure of the cache file V1.1.0 (current).
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
#[serde(rename_all = "camelCase")]
pub struct CacheRootV1_1 {
    pub schema_version: String,
    #[serde(default)]
    pub profiles: Vec<ProfileDTO>,
}

impl CacheRootV1_1 {
    /// Builds the current-version root from domain profiles.
    pub fn from_profiles(profiles: &[Profile]) -> Self {
        Self {
            schema_version: PROFILE_CACHE_VERSION.to_string(),
            profiles: profiles
                .iter()
                .cloned()
                .map(ProfileDTO::from_domain)
                .collect(),
        }
    }

    /// Converts the root into domain profiles.
    pub fn into_profiles(self) -> Vec<Profile> {
        self.profiles.into_iter().map(|p| p.into_domain()).collect()
    }
}

impl MigratesTo<CacheRootV1_1> for CacheRootV1_0 {
    fn migrate(self) -> CacheRootV1_1 {
        CacheRootV1_1 {
            schema_version: PROFILE_CACHE_VERSION.to_string(),
            profiles: self.profiles.into_iter().map(|p| p.migrate()).collect(),
        }
    }
}
