//! Data models
//!
//! Catalog entries as reported by the Zone/Scene Service. The service owns
//! them; clients only hold read-only copies.

pub mod command;
pub mod scene;
pub mod zone;

// Re-exports
pub use command::*;
pub use scene::*;
pub use zone::*;
