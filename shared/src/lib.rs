//! Shared types for multiRemote
//!
//! Wire types of the Zone/Scene Service, shared by the remote client,
//! the in-memory mock service and the terminal front end.

pub mod models;
pub mod paths;
pub mod response;

// Re-exports
pub use models::{CommandCatalog, CommandInfo, SceneInfo, ZoneInfo};
pub use response::{
    AssignResponse, AttachResponse, CommandListResponse, ServiceError, StatusResponse,
    ZoneAssignment,
};
pub use serde::{Deserialize, Serialize};

/// Scene identifier reserved for "nothing playing".
///
/// The service never reports it as active; a zone in standby has `active: null`.
pub const STANDBY_SCENE: &str = "standby";

/// Port the Zone/Scene Service listens on.
pub const DEFAULT_SERVICE_PORT: u16 = 5000;
