//! Zone Model

use serde::{Deserialize, Serialize};

/// Zone entity (a playback destination: livingroom, kitchen, ...)
///
/// Shape of every entry of `/zone` and of `/zone/{id}`. The detail endpoint
/// may name the current scene `active` instead of `scene`; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneInfo {
    pub zone: String,
    pub name: String,
    /// Scene currently assigned, `None` when in standby
    #[serde(default, alias = "active")]
    pub scene: Option<String>,
    /// Remotes attached to this zone
    #[serde(default)]
    pub remotes: Vec<String>,
    /// Scenes this zone is able to play
    #[serde(default)]
    pub compatible: Vec<String>,
}

impl ZoneInfo {
    pub fn new(zone: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            zone: zone.into(),
            name: name.into(),
            scene: None,
            remotes: Vec::new(),
            compatible: Vec::new(),
        }
    }

    pub fn is_standby(&self) -> bool {
        self.scene.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_detail_accepts_active_alias() {
        let zone: ZoneInfo =
            serde_json::from_str(r#"{"zone":"zone1","name":"Livingroom","active":"netflix"}"#)
                .unwrap();
        assert_eq!(zone.scene.as_deref(), Some("netflix"));
        assert!(zone.remotes.is_empty());
    }

    #[test]
    fn test_zone_list_entry_in_standby() {
        let zone: ZoneInfo = serde_json::from_str(
            r#"{"zone":"zone2","name":"Kitchen","scene":null,"remotes":["kitchen"],"ux-hint":""}"#,
        )
        .unwrap();
        assert!(zone.is_standby());
        assert_eq!(zone.remotes, vec!["kitchen".to_string()]);
    }
}
