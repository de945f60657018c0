//! Cache file storage.
//!
//! A thin layer over one JSON file providing atomic read/write. It does not
//! know about entities or schema versions; decoding and migration are the
//! repository layer's job.
//!
//! - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
//! - **Durability**: explicit fsync before rename

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::PathBuf;

use serde_json::Value as JsonValue;
use vitae_core::error::{Result, VitaeError};

/// Handle to one JSON-backed cache file.
pub struct CacheStorage {
    path: PathBuf,
}

impl CacheStorage {
    /// Creates a storage handle. The file does not need to exist yet.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads the file as a JSON value.
    ///
    /// Returns `Ok(None)` when the file does not exist or is empty; both are
    /// valid bootstrap states.
    pub fn load(&self) -> Result<Option<JsonValue>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: JsonValue = serde_json::from_str(&content)?;
        Ok(Some(value))
    }

    /// Saves data to the file atomically via tmp file + rename.
    pub fn save(&self, data: &JsonValue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(data)?;
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(content.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path).map_err(|e| {
            VitaeError::io(format!(
                "Failed to move {:?} into place: {}",
                tmp_path, e
            ))
        })?;

        Ok(())
    }
}
