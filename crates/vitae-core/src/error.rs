//! Error types for the Vitae editor core.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Vitae workspace.
///
/// Provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Remote failures are
/// split into `NotAuthenticated` / `NotFound` / `Transport` because the
/// synchronizer's fallback behavior differs per class.
#[derive(Error, Debug, Clone, Serialize)]
pub enum VitaeError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// No authenticated session for a remote call
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    /// Remote transport failure (connection, timeout, 5xx)
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Data access error (cache/storage layer)
    #[error("Data access error: {0}")]
    DataAccess(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Cache schema migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Profile count would exceed the local cap
    #[error("Profile limit reached ({max} profiles)")]
    ProfileLimitReached { max: usize },

    /// The last remaining profile cannot be deleted
    #[error("The last remaining profile cannot be deleted")]
    CannotDeleteLastProfile,

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VitaeError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a NotAuthenticated error
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::NotAuthenticated(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Creates a Migration error
    pub fn migration(message: impl Into<String>) -> Self {
        Self::Migration(message.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this error is one of the identity-conflict rejections that
    /// must surface to the user synchronously.
    pub fn is_user_facing_conflict(&self) -> bool {
        matches!(
            self,
            Self::ProfileLimitReached { .. } | Self::CannotDeleteLastProfile
        )
    }
}

impl From<std::io::Error> for VitaeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for VitaeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<version_migrate::MigrationError> for VitaeError {
    fn from(err: version_migrate::MigrationError) -> Self {
        Self::Migration(err.to_string())
    }
}

/// Conversion from anyhow::Error (used at binary/test edges)
impl From<anyhow::Error> for VitaeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<String> for VitaeError {
    fn from(err: String) -> Self {
        Self::Internal(err)
    }
}

/// A type alias for `Result<T, VitaeError>`.
pub type Result<T> = std::result::Result<T, VitaeError>;
