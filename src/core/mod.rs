/// Core Module
///
/// Shared infrastructure for the binding engine: the crate-wide error
/// type and result alias used by every other module.
pub mod error;

// Re-export commonly used types for convenience
pub use error::{BindError, Result};
