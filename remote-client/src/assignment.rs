//! Assignment Client.
//!
//! Mediates every zone/scene change between a front end and the Zone/Scene
//! Service. Local state in [`SessionContext`] only ever reflects replies the
//! service sent; a conflicting assignment changes nothing until the user
//! picked clone, displace or cancel.

use std::collections::BTreeMap;

use shared::paths::{self, AssignOption, VolumeCommand};
use shared::{
    AssignResponse, AttachResponse, CommandCatalog, CommandListResponse, STANDBY_SCENE, SceneInfo,
    StatusResponse, ZoneAssignment, ZoneInfo,
};

use crate::client::HttpClient;
use crate::conflict::{ConflictDecision, ConflictDetails, ConflictPresenter, ConflictPrompt};
use crate::error::{ClientError, ClientResult};
use crate::session::{Remote, SessionContext};

/// Outcome of an assignment request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentResult {
    /// The service applied the assignment; `active` is what the zone plays now.
    Success { zone: String, active: Option<String> },
    /// `requested` is already in use by `zones`; nothing changed.
    Conflict {
        zone: String,
        requested: String,
        zones: Vec<String>,
    },
    /// The zone was put in standby.
    Standby { zone: String },
}

impl AssignmentResult {
    /// The scene to mark active in the zone, `None` for standby or a conflict.
    pub fn active_scene(&self) -> Option<&str> {
        match self {
            AssignmentResult::Success { active, .. } => active.as_deref(),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, AssignmentResult::Conflict { .. })
    }
}

/// What came out of a conflict dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictResolution {
    pub decision: ConflictDecision,
    pub prompt: ConflictPrompt,
    /// Reply to the re-issued assignment, `None` when cancelled
    pub result: Option<AssignmentResult>,
}

/// A zone as seen right after attaching to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneState {
    pub zone: String,
    pub active: Option<String>,
    /// Scenes the zone can play
    pub scenes: Vec<String>,
}

/// Client for zone/scene assignment, bound to one remote.
pub struct AssignmentClient<H: HttpClient> {
    http: H,
    session: SessionContext,
}

impl<H: HttpClient> AssignmentClient<H> {
    pub fn new(http: H, remote: Remote) -> Self {
        Self {
            http,
            session: SessionContext::new(remote),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    fn remote_id(&self) -> &str {
        self.session.remote().id()
    }

    // ========== Catalogs ==========

    /// Probe the service.
    pub async fn ping(&self) -> ClientResult<StatusResponse> {
        self.http.get(paths::STATUS).await
    }

    /// Session start: load both catalogs and learn where this remote is attached.
    pub async fn bootstrap(&mut self) -> ClientResult<()> {
        self.refresh_zones().await?;
        self.refresh_scenes().await?;
        let zone = self.sync_attachment().await?;
        tracing::info!(
            remote = %self.remote_id(),
            zones = self.session.zones().len(),
            scenes = self.session.scenes().len(),
            active_zone = ?zone,
            "Session ready"
        );
        Ok(())
    }

    pub async fn refresh_zones(&mut self) -> ClientResult<&BTreeMap<String, ZoneInfo>> {
        let zones: BTreeMap<String, ZoneInfo> = self.http.get(paths::ZONES).await?;
        self.session.replace_zones(zones);
        Ok(self.session.zones())
    }

    pub async fn refresh_scenes(&mut self) -> ClientResult<&BTreeMap<String, SceneInfo>> {
        let scenes: BTreeMap<String, SceneInfo> = self.http.get(paths::SCENES).await?;
        self.session.replace_scenes(scenes);
        Ok(self.session.scenes())
    }

    pub async fn zone_detail(&self, zone: &str) -> ClientResult<ZoneInfo> {
        self.http.get(&paths::zone(zone)).await
    }

    pub async fn scene_detail(&self, scene: &str) -> ClientResult<SceneInfo> {
        self.http.get(&paths::scene(scene)).await
    }

    /// Current assignment of a zone and the scenes it offers.
    pub async fn zone_assignment(&mut self, zone: &str) -> ClientResult<ZoneState> {
        let assignment: ZoneAssignment = self.http.get(&paths::assignment(zone)).await?;
        self.session.observe(zone, assignment.active.clone());
        self.session.set_offered(zone, assignment.scenes.clone());
        Ok(ZoneState {
            zone: zone.to_string(),
            active: assignment.active,
            scenes: assignment.scenes,
        })
    }

    // ========== Attachment ==========

    /// Ask the service which zone this remote is attached to.
    pub async fn sync_attachment(&mut self) -> ClientResult<Option<String>> {
        let reply: AttachResponse = self.http.get(&paths::attached(self.remote_id())).await?;
        self.session.set_active_zone(reply.active.clone());
        Ok(reply.active)
    }

    /// Attach this remote to `zone`, detaching it from any previous zone.
    pub async fn attach_zone(&mut self, zone: &str) -> ClientResult<ZoneState> {
        let reply: AttachResponse = self
            .http
            .get(&paths::attach(self.remote_id(), zone))
            .await?;
        let active = reply.active.ok_or_else(|| {
            ClientError::InvalidResponse(format!("Attach to {} reported no active zone", zone))
        })?;

        if self.session.active_zone() != Some(active.as_str()) {
            tracing::info!(remote = %self.remote_id(), zone = %active, "Attached");
            self.session.set_active_zone(Some(active.clone()));
        }

        let state = self.zone_assignment(&active).await?;
        self.reload_commands().await;
        Ok(state)
    }

    /// Attach to the remote's home zone.
    pub async fn attach_home(&mut self) -> ClientResult<ZoneState> {
        let home = self.session.remote().home().to_string();
        self.attach_zone(&home).await
    }

    pub async fn detach(&mut self) -> ClientResult<()> {
        let _reply: AttachResponse = self.http.get(&paths::detach(self.remote_id())).await?;
        tracing::info!(remote = %self.remote_id(), "Detached");
        self.session.set_active_zone(None);
        self.session.set_commands(CommandCatalog::default());
        Ok(())
    }

    // ========== Assignment ==========

    /// Request `scene` in `zone`.
    ///
    /// Requesting [`STANDBY_SCENE`] always succeeds (short of a transport
    /// failure) and only marks the zone as standby.
    pub async fn assign_scene(&mut self, zone: &str, scene: &str) -> ClientResult<AssignmentResult> {
        if scene == STANDBY_SCENE {
            self.unassign(zone).await?;
            return Ok(AssignmentResult::Standby {
                zone: zone.to_string(),
            });
        }

        let reply: AssignResponse = self.http.get(&paths::assign(zone, scene, None)).await?;
        if let Some(zones) = reply.conflicting_zones() {
            tracing::warn!(%zone, %scene, conflict = ?zones, "Assignment conflicts with other zones");
            self.session.begin_conflict(zone, scene);
            return Ok(AssignmentResult::Conflict {
                zone: zone.to_string(),
                requested: scene.to_string(),
                zones: zones.to_vec(),
            });
        }

        Ok(self.apply_success(zone, reply.active).await)
    }

    /// Put `zone` in standby.
    ///
    /// The reply body is not consulted; error bodies are logged and ignored.
    pub async fn unassign(&mut self, zone: &str) -> ClientResult<()> {
        match self.http.fire(&paths::unassign(zone)).await {
            Ok(()) => {}
            Err(ClientError::Service(message)) => {
                tracing::warn!(%zone, %message, "Standby reply reported an error, ignoring");
            }
            Err(e) => return Err(e),
        }
        tracing::info!(%zone, "Zone in standby");
        self.session.confirm(zone, None);
        if self.session.active_zone() == Some(zone) {
            self.reload_commands().await;
        }
        Ok(())
    }

    async fn apply_success(&mut self, zone: &str, active: Option<String>) -> AssignmentResult {
        tracing::info!(%zone, active = ?active, "Assignment confirmed");
        self.session.confirm(zone, active.clone());
        if self.session.active_zone() == Some(zone) {
            self.reload_commands().await;
        }
        AssignmentResult::Success {
            zone: zone.to_string(),
            active,
        }
    }

    // ========== Conflict Resolution ==========

    /// Resolve conflicting zone ids to display names.
    ///
    /// Refetches the zone catalog so the occupying scenes are current. Zones
    /// the catalog does not know are left out.
    pub async fn conflict_details(&mut self, conflict: &[String]) -> ClientResult<ConflictDetails> {
        self.refresh_zones().await?;
        let mut details = ConflictDetails::default();
        for zone in conflict {
            let Some(info) = self.session.zone(zone) else {
                tracing::debug!(%zone, "Conflicting zone not in catalog, skipped");
                continue;
            };
            let scene_name = match info.scene.as_deref() {
                Some(scene) => self.session.scene_name(scene).to_string(),
                None => "Standby".to_string(),
            };
            details.push(zone.clone(), info.name.clone(), scene_name);
        }
        Ok(details)
    }

    /// Let the user settle a conflict and re-issue the assignment accordingly.
    ///
    /// On cancel, or if any request fails, the zone keeps what it had before
    /// the conflicting request.
    pub async fn resolve_conflict<P>(
        &mut self,
        zone: &str,
        conflict: &[String],
        requested: &str,
        presenter: &P,
    ) -> ClientResult<ConflictResolution>
    where
        P: ConflictPresenter + ?Sized,
    {
        if !self.session.zone_state(zone).is_pending() {
            self.session.begin_conflict(zone, requested);
        }

        let details = match self.conflict_details(conflict).await {
            Ok(details) => details,
            Err(e) => {
                self.session.cancel_conflict(zone);
                return Err(e);
            }
        };
        let scene_name = self.session.scene_name(requested).to_string();
        let prompt = ConflictPrompt::build(details, &scene_name);

        let decision = presenter.choose(&prompt).await;
        let option = match decision {
            ConflictDecision::Cancel => {
                tracing::info!(%zone, scene = %requested, "Conflict cancelled");
                self.session.cancel_conflict(zone);
                return Ok(ConflictResolution {
                    decision,
                    prompt,
                    result: None,
                });
            }
            ConflictDecision::Clone => AssignOption::Clone,
            ConflictDecision::Displace => AssignOption::Unassign,
        };

        let reply: AssignResponse = match self
            .http
            .get(&paths::assign(zone, requested, Some(option)))
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                self.session.cancel_conflict(zone);
                return Err(e);
            }
        };

        let result = if let Some(zones) = reply.conflicting_zones() {
            tracing::warn!(%zone, scene = %requested, conflict = ?zones, "Conflict persists after resolution");
            self.session.cancel_conflict(zone);
            AssignmentResult::Conflict {
                zone: zone.to_string(),
                requested: requested.to_string(),
                zones: zones.to_vec(),
            }
        } else {
            let result = self.apply_success(zone, reply.active).await;
            // Displaced zones take whatever the service now reports
            if decision == ConflictDecision::Displace
                && let Err(e) = self.refresh_zones().await
            {
                tracing::warn!(error = %e, "Failed to refresh zones after displace");
            }
            result
        };

        Ok(ConflictResolution {
            decision,
            prompt,
            result: Some(result),
        })
    }

    /// Assign and, on conflict, run the resolution dialog.
    pub async fn assign_interactive<P>(
        &mut self,
        zone: &str,
        scene: &str,
        presenter: &P,
    ) -> ClientResult<AssignmentResult>
    where
        P: ConflictPresenter + ?Sized,
    {
        let result = self.assign_scene(zone, scene).await?;
        let zones = match &result {
            AssignmentResult::Conflict { zones, .. } => zones.clone(),
            _ => return Ok(result),
        };
        let resolution = self.resolve_conflict(zone, &zones, scene, presenter).await?;
        Ok(resolution.result.unwrap_or(AssignmentResult::Conflict {
            zone: zone.to_string(),
            requested: scene.to_string(),
            zones,
        }))
    }

    // ========== Commands ==========

    /// Fetch the commands available to this remote, replacing the rendered set.
    pub async fn load_commands(&mut self) -> ClientResult<&CommandCatalog> {
        let reply: ClientResult<CommandListResponse> =
            self.http.get(&paths::commands(self.remote_id())).await;
        match reply {
            Ok(reply) => {
                self.session.set_commands(reply.commands.unwrap_or_default());
                Ok(self.session.commands())
            }
            Err(e) => {
                self.session.set_commands(CommandCatalog::default());
                Err(e)
            }
        }
    }

    async fn reload_commands(&mut self) {
        if let Err(e) = self.load_commands().await {
            tracing::warn!(error = %e, "Failed to reload commands");
        }
    }

    /// Invoke an ad-hoc scene command.
    pub async fn run_command(&self, command: &str) -> ClientResult<()> {
        tracing::debug!(%command, "Running scene command");
        self.http
            .fire(&paths::scene_command(self.remote_id(), command))
            .await
    }

    // ========== Volume ==========

    async fn volume(&self, command: VolumeCommand) -> ClientResult<()> {
        tracing::debug!(?command, "Volume");
        self.http.fire(&paths::volume(self.remote_id(), command)).await
    }

    pub async fn set_volume(&self, level: u32) -> ClientResult<()> {
        self.volume(VolumeCommand::Set(level)).await
    }

    pub async fn volume_up(&self) -> ClientResult<()> {
        self.volume(VolumeCommand::Up).await
    }

    pub async fn volume_down(&self) -> ClientResult<()> {
        self.volume(VolumeCommand::Down).await
    }

    pub async fn mute(&self) -> ClientResult<()> {
        self.volume(VolumeCommand::Mute).await
    }

    pub async fn unmute(&self) -> ClientResult<()> {
        self.volume(VolumeCommand::Unmute).await
    }
}
