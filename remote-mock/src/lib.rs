//! remote-mock: in-memory Zone/Scene Service
//!
//! Implements the service's HTTP contract over in-memory tables so remotes
//! can be exercised without real hardware:
//! - zone and scene catalogs
//! - scene assignment with conflict detection and clone/unassign resolution
//! - remote attachment
//! - zone (volume) and scene commands
//!
//! Every request path is recorded; tests read it back with [`MockState::requests`].

pub mod api;
pub mod state;

pub use api::router;
pub use state::MockState;
