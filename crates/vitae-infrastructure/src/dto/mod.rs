//! Versioned DTOs for local persistence.

pub mod profile;

pub use profile::{
    CacheRootV1_0, CacheRootV1_1, PROFILE_CACHE_VERSION, ProfileDTO, ProfileV1_0, ProfileV1_1,
};
