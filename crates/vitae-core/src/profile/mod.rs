//! Profiles: named containers for resume documents, with the abstract
//! local-cache and remote-gateway contracts the synchronizer composes.

pub mod gateway;
pub mod model;
pub mod repository;

pub use gateway::ProfileGateway;
pub use model::{MAX_LOCAL_PROFILES, Profile, ProfilePatch, SyncStatus};
pub use repository::ProfileCache;
