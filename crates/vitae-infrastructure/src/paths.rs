//! Unified path management for vitae local data.
//!
//! All local files are resolved via `AppPaths` from the version-migrate
//! crate so the layout is consistent across platforms.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vitae/             # Config directory (AppPaths default)
//! └── profiles.json            # Cached profile list (versioned schema)
//! ```

use std::path::PathBuf;

use version_migrate::AppPaths;
use vitae_core::error::{Result, VitaeError};

/// Unified path management for vitae.
pub struct VitaePaths;

impl VitaePaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("vitae")
    }

    /// Returns the vitae configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| VitaeError::io("Cannot find home directory"))
    }

    /// Returns the path of the local profile cache file.
    pub fn profile_cache_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("profiles.json"))
    }
}
