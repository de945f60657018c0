pub mod auth;
pub mod error;
pub mod profile;
pub mod resume;
pub mod tailor;

// Re-export common error type
pub use error::{Result, VitaeError};
