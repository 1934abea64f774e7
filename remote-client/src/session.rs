//! Session context for one remote.
//!
//! Holds everything the client learns during a session: who the remote is,
//! which zone it is attached to, the zone/scene catalogs and what every zone
//! plays. Reads are public. Writes are crate-private and only happen once the
//! service confirmed a change; nothing is applied optimistically.

use std::collections::{BTreeMap, HashMap};

use shared::{CommandCatalog, SceneInfo, ZoneInfo};

// ============================================================================
// Remote Identity
// ============================================================================

/// Identity of this remote, immutable for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remote {
    id: String,
    name: String,
    home: String,
}

impl Remote {
    pub fn new(id: impl Into<String>, name: impl Into<String>, home: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            home: home.into(),
        }
    }

    /// Identifier used in request paths.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Home zone identifier.
    pub fn home(&self) -> &str {
        &self.home
    }
}

// ============================================================================
// Per-Zone State
// ============================================================================

/// What a zone plays, from this client's point of view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ZoneSceneState {
    /// Nothing assigned.
    #[default]
    Standby,
    /// The service confirmed this scene.
    Active(String),
    /// An assignment hit a conflict and waits for the user's decision.
    ///
    /// `previous` is restored if the user cancels.
    ConflictPending {
        requested: String,
        previous: Box<ZoneSceneState>,
    },
}

impl ZoneSceneState {
    fn from_scene(scene: Option<String>) -> Self {
        match scene {
            Some(scene) => ZoneSceneState::Active(scene),
            None => ZoneSceneState::Standby,
        }
    }

    /// The confirmed scene; a pending conflict still shows the previous one.
    pub fn active_scene(&self) -> Option<&str> {
        match self {
            ZoneSceneState::Standby => None,
            ZoneSceneState::Active(scene) => Some(scene),
            ZoneSceneState::ConflictPending { previous, .. } => previous.active_scene(),
        }
    }

    pub fn is_standby(&self) -> bool {
        self.active_scene().is_none()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, ZoneSceneState::ConflictPending { .. })
    }
}

// ============================================================================
// Session Context
// ============================================================================

/// Session state owned by an [`crate::AssignmentClient`].
#[derive(Debug, Clone)]
pub struct SessionContext {
    remote: Remote,
    active_zone: Option<String>,
    zones: BTreeMap<String, ZoneInfo>,
    scenes: BTreeMap<String, SceneInfo>,
    zone_states: HashMap<String, ZoneSceneState>,
    offered: HashMap<String, Vec<String>>,
    commands: CommandCatalog,
}

impl SessionContext {
    pub fn new(remote: Remote) -> Self {
        Self {
            remote,
            active_zone: None,
            zones: BTreeMap::new(),
            scenes: BTreeMap::new(),
            zone_states: HashMap::new(),
            offered: HashMap::new(),
            commands: CommandCatalog::default(),
        }
    }

    pub fn remote(&self) -> &Remote {
        &self.remote
    }

    /// Zone this remote is attached to.
    pub fn active_zone(&self) -> Option<&str> {
        self.active_zone.as_deref()
    }

    pub fn zones(&self) -> &BTreeMap<String, ZoneInfo> {
        &self.zones
    }

    pub fn zone(&self, zone: &str) -> Option<&ZoneInfo> {
        self.zones.get(zone)
    }

    pub fn scenes(&self) -> &BTreeMap<String, SceneInfo> {
        &self.scenes
    }

    pub fn scene(&self, scene: &str) -> Option<&SceneInfo> {
        self.scenes.get(scene)
    }

    /// Display name of a zone, the identifier if it is not in the catalog.
    pub fn zone_name<'a>(&'a self, zone: &'a str) -> &'a str {
        self.zones.get(zone).map(|z| z.name.as_str()).unwrap_or(zone)
    }

    /// Display name of a scene, the identifier if it is not in the catalog.
    pub fn scene_name<'a>(&'a self, scene: &'a str) -> &'a str {
        self.scenes.get(scene).map(|s| s.name.as_str()).unwrap_or(scene)
    }

    /// State of a zone; zones never populated from the service are in standby.
    pub fn zone_state(&self, zone: &str) -> ZoneSceneState {
        self.zone_states.get(zone).cloned().unwrap_or_default()
    }

    pub fn active_scene(&self, zone: &str) -> Option<&str> {
        self.zone_states.get(zone).and_then(|s| s.active_scene())
    }

    /// Scenes the service offers for a zone, as of the last attach.
    pub fn offered_scenes(&self, zone: &str) -> &[String] {
        self.offered.get(zone).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Commands currently rendered for the remote.
    pub fn commands(&self) -> &CommandCatalog {
        &self.commands
    }

    // ========== Crate-private mutation ==========

    pub(crate) fn set_active_zone(&mut self, zone: Option<String>) {
        self.active_zone = zone;
    }

    /// Replace the zone catalog and adopt the scenes it reports.
    ///
    /// Zones waiting on a conflict decision stay pending; the reported scene
    /// becomes what a cancel restores.
    pub(crate) fn replace_zones(&mut self, zones: BTreeMap<String, ZoneInfo>) {
        for (id, info) in &zones {
            self.observe(id, info.scene.clone());
        }
        self.zones = zones;
    }

    /// Adopt a scene the service reported for a zone.
    pub(crate) fn observe(&mut self, zone: &str, scene: Option<String>) {
        if let Some(info) = self.zones.get_mut(zone) {
            info.scene = scene.clone();
        }
        let reported = ZoneSceneState::from_scene(scene);
        match self.zone_states.get_mut(zone) {
            Some(ZoneSceneState::ConflictPending { previous, .. }) => **previous = reported,
            _ => {
                self.zone_states.insert(zone.to_string(), reported);
            }
        }
    }

    pub(crate) fn replace_scenes(&mut self, scenes: BTreeMap<String, SceneInfo>) {
        self.scenes = scenes;
    }

    pub(crate) fn set_offered(&mut self, zone: &str, scenes: Vec<String>) {
        self.offered.insert(zone.to_string(), scenes);
    }

    /// Record a confirmed scene (or standby) for a zone.
    pub(crate) fn confirm(&mut self, zone: &str, scene: Option<String>) {
        if let Some(info) = self.zones.get_mut(zone) {
            info.scene = scene.clone();
        }
        self.zone_states
            .insert(zone.to_string(), ZoneSceneState::from_scene(scene));
    }

    pub(crate) fn begin_conflict(&mut self, zone: &str, requested: &str) {
        let previous = match self.zone_state(zone) {
            ZoneSceneState::ConflictPending { previous, .. } => previous,
            state => Box::new(state),
        };
        self.zone_states.insert(
            zone.to_string(),
            ZoneSceneState::ConflictPending {
                requested: requested.to_string(),
                previous,
            },
        );
    }

    /// Leave a pending conflict, restoring what the zone played before.
    pub(crate) fn cancel_conflict(&mut self, zone: &str) {
        if let Some(ZoneSceneState::ConflictPending { previous, .. }) = self.zone_states.remove(zone)
        {
            self.zone_states.insert(zone.to_string(), *previous);
        }
    }

    pub(crate) fn set_commands(&mut self, commands: CommandCatalog) {
        self.commands = commands;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> SessionContext {
        SessionContext::new(Remote::new("livingroom", "Livingroom", "zone1"))
    }

    #[test]
    fn test_unknown_zone_is_standby() {
        let session = session();
        assert_eq!(session.zone_state("zone9"), ZoneSceneState::Standby);
        assert_eq!(session.zone_name("zone9"), "zone9");
    }

    #[test]
    fn test_cancel_restores_previous_state() {
        let mut session = session();
        session.confirm("zone1", Some("netflix".into()));
        session.begin_conflict("zone1", "spotify");
        assert!(session.zone_state("zone1").is_pending());
        assert_eq!(session.active_scene("zone1"), Some("netflix"));

        session.cancel_conflict("zone1");
        assert_eq!(
            session.zone_state("zone1"),
            ZoneSceneState::Active("netflix".into())
        );
    }

    #[test]
    fn test_repeated_conflict_keeps_original_previous() {
        let mut session = session();
        session.begin_conflict("zone1", "spotify");
        session.begin_conflict("zone1", "plex");
        session.cancel_conflict("zone1");
        assert_eq!(session.zone_state("zone1"), ZoneSceneState::Standby);
    }

    #[test]
    fn test_catalog_refresh_keeps_pending_and_updates_restore_point() {
        let mut session = session();
        session.confirm("zone1", Some("netflix".into()));
        session.begin_conflict("zone1", "spotify");

        let mut zones = BTreeMap::new();
        let mut zone1 = ZoneInfo::new("zone1", "Livingroom");
        zone1.scene = Some("plex".into());
        zones.insert("zone1".to_string(), zone1);
        zones.insert("zone2".to_string(), ZoneInfo::new("zone2", "Kitchen"));
        session.replace_zones(zones);

        assert!(session.zone_state("zone1").is_pending());
        assert_eq!(session.active_scene("zone1"), Some("plex"));
        assert_eq!(session.zone_state("zone2"), ZoneSceneState::Standby);
        assert_eq!(session.zone_name("zone2"), "Kitchen");

        session.cancel_conflict("zone1");
        assert_eq!(
            session.zone_state("zone1"),
            ZoneSceneState::Active("plex".into())
        );
        assert_eq!(
            session.zone("zone1").and_then(|z| z.scene.as_deref()),
            Some("plex")
        );
    }
}
