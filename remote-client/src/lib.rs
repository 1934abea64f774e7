//! multiRemote client - Assignment Client for the Zone/Scene Service
//!
//! Issues zone/scene assignments, drives the conflict-resolution exchange,
//! and sends volume and ad-hoc commands on behalf of one remote.

pub mod assignment;
pub mod client;
pub mod config;
pub mod conflict;
pub mod error;
pub mod session;
pub mod settings;

pub use assignment::{AssignmentClient, AssignmentResult, ConflictResolution, ZoneState};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use client::{HttpClient, NetworkHttpClient};
pub use config::ClientConfig;
pub use conflict::{ConflictDecision, ConflictDetails, ConflictPresenter, ConflictPrompt};
pub use error::{ClientError, ClientResult};
pub use session::{Remote, SessionContext, ZoneSceneState};
pub use settings::{RemoteSettings, SettingsStorage};

// Re-export shared types for convenience
pub use shared::{CommandCatalog, CommandInfo, STANDBY_SCENE, SceneInfo, ZoneInfo};
