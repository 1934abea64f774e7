//! API Response types
//!
//! Reply bodies of the Zone/Scene Service. The service answers HTTP 200 for
//! rejected requests too and reports the reason in an `error` field, see
//! [`ServiceError`].

use serde::{Deserialize, Serialize};

use crate::models::CommandCatalog;

/// Error body of a rejected request
///
/// ```json
/// { "error": "No such zone" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    pub error: String,
}

impl ServiceError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Extract the error of a decoded reply, if it carries one
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        value
            .get("error")
            .and_then(|e| e.as_str())
            .map(|e| Self::new(e))
    }
}

/// Reply of `/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

/// Reply of `/assign/{zone}`: the current scene and what the zone can play
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAssignment {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub scenes: Vec<String>,
}

/// Reply of `/assign/{zone}/{scene}[/clone|/unassign]` and `/unassign/{zone}`
///
/// A reply without `conflict` is authoritative: `active` is what the zone now
/// plays. With `conflict`, nothing changed and the listed zones would be
/// disturbed by the assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<Vec<String>>,
}

impl AssignResponse {
    pub fn active(zone: impl Into<String>, active: Option<String>) -> Self {
        Self {
            zone: Some(zone.into()),
            active,
            conflict: None,
        }
    }

    pub fn conflict(zone: impl Into<String>, active: Option<String>, zones: Vec<String>) -> Self {
        Self {
            zone: Some(zone.into()),
            active,
            conflict: Some(zones),
        }
    }

    /// Conflicting zones, `None` unless the service reported a non-empty conflict
    pub fn conflicting_zones(&self) -> Option<&[String]> {
        self.conflict.as_deref().filter(|zones| !zones.is_empty())
    }
}

/// Reply of `/attach/{remote}[/{zone}]` and `/detach/{remote}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachResponse {
    #[serde(default)]
    pub active: Option<String>,
    /// Remotes sharing the zone after attaching
    #[serde(default)]
    pub users: Vec<String>,
}

/// Reply of `/command/{remote}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandListResponse {
    #[serde(default)]
    pub zone: Option<String>,
    #[serde(default)]
    pub commands: Option<CommandCatalog>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_success_has_no_conflict() {
        let resp: AssignResponse =
            serde_json::from_str(r#"{"zone":"zone1","active":"spotify"}"#).unwrap();
        assert_eq!(resp.active.as_deref(), Some("spotify"));
        assert!(resp.conflicting_zones().is_none());
    }

    #[test]
    fn test_assign_conflict_lists_zones() {
        let resp: AssignResponse =
            serde_json::from_str(r#"{"zone":"zone1","active":"netflix","conflict":["zone2"]}"#)
                .unwrap();
        assert_eq!(resp.conflicting_zones(), Some(&["zone2".to_string()][..]));
    }

    #[test]
    fn test_empty_conflict_is_success() {
        let resp: AssignResponse =
            serde_json::from_str(r#"{"active":"spotify","conflict":[]}"#).unwrap();
        assert!(resp.conflicting_zones().is_none());
    }

    #[test]
    fn test_service_error_detection() {
        let value = serde_json::json!({ "error": "No such zone" });
        assert_eq!(ServiceError::from_value(&value), Some(ServiceError::new("No such zone")));
        assert!(ServiceError::from_value(&serde_json::json!({ "active": null })).is_none());
    }

    #[test]
    fn test_command_list_without_catalog() {
        let resp: CommandListResponse = serde_json::from_str(r#"{"zone":null}"#).unwrap();
        assert!(resp.commands.is_none());
    }
}
