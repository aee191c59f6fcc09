//! bb-explorer/crates/bb-core/src/lib.rs
//!
//! Wire models, formatters and the backend contract shared by every
//! explorer crate.

pub mod error;
pub mod format;
pub mod models;
pub mod paths;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;
