pub mod hydration;
pub mod session;
pub mod synchronizer;

#[cfg(test)]
mod test_support;

pub use hydration::{HydrationController, HydrationState};
pub use session::EditorSession;
pub use synchronizer::{Synchronizer, SynchronizerConfig};
