pub mod cache_storage;
pub mod dto;
pub mod file_profile_cache;
pub mod memory_profile_cache;
pub mod paths;

pub use cache_storage::CacheStorage;
pub use file_profile_cache::FileProfileCache;
pub use memory_profile_cache::MemoryProfileCache;
pub use paths::VitaePaths;
