//! In-memory service state

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::{CommandCatalog, CommandInfo, SceneInfo, ZoneInfo};
use tokio::sync::Mutex;

/// Volume ceiling of a zone
pub const MAX_VOLUME: u32 = 100;

/// Zone commands every zone offers
pub const ZONE_COMMANDS: [(&str, &str); 5] = [
    ("volume-up", "Volume Up"),
    ("volume-down", "Volume Down"),
    ("volume-set", "Set Volume"),
    ("volume-mute", "Mute"),
    ("volume-unmute", "Unmute"),
];

#[derive(Debug, Clone)]
pub(crate) struct MockZone {
    pub name: String,
    pub scene: Option<String>,
    pub volume: u32,
    pub muted: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct MockScene {
    pub name: String,
    pub kind: Option<String>,
    pub description: Option<String>,
    pub commands: BTreeMap<String, CommandInfo>,
}

#[derive(Debug, Default)]
pub(crate) struct Inner {
    pub zones: BTreeMap<String, MockZone>,
    pub scenes: BTreeMap<String, MockScene>,
    /// remote id -> attached zone
    pub remotes: BTreeMap<String, Option<String>>,
    pub requests: Vec<String>,
}

impl Inner {
    pub fn zone_info(&self, id: &str) -> Option<ZoneInfo> {
        let zone = self.zones.get(id)?;
        let mut info = ZoneInfo::new(id, &zone.name);
        info.scene = zone.scene.clone();
        info.remotes = self.remotes_in(id);
        info.compatible = self.scenes.keys().cloned().collect();
        Some(info)
    }

    pub fn scene_info(&self, id: &str) -> Option<SceneInfo> {
        let scene = self.scenes.get(id)?;
        let mut info = SceneInfo::new(id, &scene.name);
        info.kind = scene.kind.clone();
        info.description = scene.description.clone();
        Some(info)
    }

    pub fn remotes_in(&self, zone: &str) -> Vec<String> {
        self.remotes
            .iter()
            .filter(|(_, attached)| attached.as_deref() == Some(zone))
            .map(|(remote, _)| remote.clone())
            .collect()
    }

    /// Zones other than `zone` already playing `scene`
    pub fn conflicts(&self, zone: &str, scene: &str) -> Vec<String> {
        self.zones
            .iter()
            .filter(|(id, z)| id.as_str() != zone && z.scene.as_deref() == Some(scene))
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Commands for whatever the remote's zone plays
    pub fn commands_for(&self, remote: &str) -> (Option<String>, CommandCatalog) {
        let zone = self.remotes.get(remote).cloned().flatten();
        let mut catalog = CommandCatalog::default();
        let Some(zone_id) = zone.as_deref() else {
            return (None, catalog);
        };
        for (id, name) in ZONE_COMMANDS {
            catalog.zone.insert(
                id.to_string(),
                CommandInfo {
                    name: name.to_string(),
                    description: None,
                    kind: Some("volume".to_string()),
                },
            );
        }
        if let Some(scene) = self
            .zones
            .get(zone_id)
            .and_then(|z| z.scene.as_ref())
            .and_then(|s| self.scenes.get(s))
        {
            catalog.scene = scene.commands.clone();
        }
        (zone, catalog)
    }
}

/// Shared handle to the mock's tables
#[derive(Debug, Clone, Default)]
pub struct MockState {
    pub(crate) inner: Arc<Mutex<Inner>>,
}

impl MockState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small house: three zones, three scenes, two remotes
    pub async fn demo() -> Self {
        let state = Self::new();
        state.add_zone("zone1", "Livingroom").await;
        state.add_zone("zone2", "Kitchen").await;
        state.add_zone("zone3", "Patio").await;
        state.add_scene("netflix", "Netflix", "video").await;
        state.add_scene("spotify", "Spotify", "audio").await;
        state.add_scene("plex", "Plex", "video").await;
        state.add_command("netflix", "pause", "Pause").await;
        state.add_command("netflix", "play", "Play").await;
        state.add_command("spotify", "next", "Next Track").await;
        state.add_remote("livingroom").await;
        state.add_remote("kitchen").await;
        state
    }

    pub async fn add_zone(&self, id: &str, name: &str) {
        let mut inner = self.inner.lock().await;
        inner.zones.insert(
            id.to_string(),
            MockZone {
                name: name.to_string(),
                scene: None,
                volume: 0,
                muted: false,
            },
        );
    }

    pub async fn add_scene(&self, id: &str, name: &str, kind: &str) {
        let mut inner = self.inner.lock().await;
        inner.scenes.insert(
            id.to_string(),
            MockScene {
                name: name.to_string(),
                kind: Some(kind.to_string()),
                description: None,
                commands: BTreeMap::new(),
            },
        );
    }

    pub async fn add_command(&self, scene: &str, id: &str, name: &str) {
        let mut inner = self.inner.lock().await;
        if let Some(scene) = inner.scenes.get_mut(scene) {
            scene.commands.insert(
                id.to_string(),
                CommandInfo {
                    name: name.to_string(),
                    description: None,
                    kind: Some("simple".to_string()),
                },
            );
        }
    }

    pub async fn add_remote(&self, id: &str) {
        self.inner.lock().await.remotes.insert(id.to_string(), None);
    }

    /// Put `scene` in `zone` directly, bypassing conflict checks
    pub async fn set_scene(&self, zone: &str, scene: Option<&str>) {
        let mut inner = self.inner.lock().await;
        if let Some(zone) = inner.zones.get_mut(zone) {
            zone.scene = scene.map(str::to_string);
        }
    }

    pub async fn attach(&self, remote: &str, zone: &str) {
        self.inner
            .lock()
            .await
            .remotes
            .insert(remote.to_string(), Some(zone.to_string()));
    }

    pub async fn scene_of(&self, zone: &str) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.zones.get(zone).and_then(|z| z.scene.clone())
    }

    pub async fn attached(&self, remote: &str) -> Option<String> {
        let inner = self.inner.lock().await;
        inner.remotes.get(remote).cloned().flatten()
    }

    /// (volume, muted) of a zone
    pub async fn volume(&self, zone: &str) -> Option<(u32, bool)> {
        let inner = self.inner.lock().await;
        inner.zones.get(zone).map(|z| (z.volume, z.muted))
    }

    /// Paths of every request served so far, oldest first
    pub async fn requests(&self) -> Vec<String> {
        self.inner.lock().await.requests.clone()
    }

    pub async fn clear_requests(&self) {
        self.inner.lock().await.requests.clear();
    }

    pub(crate) async fn record(&self, path: &str) {
        self.inner.lock().await.requests.push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_conflicts_exclude_requesting_zone() {
        let state = MockState::demo().await;
        state.set_scene("zone1", Some("spotify")).await;
        state.set_scene("zone2", Some("spotify")).await;
        state.set_scene("zone3", Some("netflix")).await;

        let inner = state.inner.lock().await;
        assert_eq!(inner.conflicts("zone1", "spotify"), vec!["zone2".to_string()]);
        assert!(inner.conflicts("zone1", "plex").is_empty());
    }

    #[tokio::test]
    async fn test_commands_follow_attached_zone() {
        let state = MockState::demo().await;
        {
            let inner = state.inner.lock().await;
            let (zone, catalog) = inner.commands_for("livingroom");
            assert!(zone.is_none());
            assert!(catalog.is_empty());
        }

        state.attach("livingroom", "zone1").await;
        state.set_scene("zone1", Some("netflix")).await;
        let inner = state.inner.lock().await;
        let (zone, catalog) = inner.commands_for("livingroom");
        assert_eq!(zone.as_deref(), Some("zone1"));
        assert!(catalog.scene.contains_key("pause"));
        assert!(catalog.zone.contains_key("volume-up"));
    }
}
