//! Endpoint paths of the Zone/Scene Service
//!
//! Relative to the service base URL (`http://<host>:5000`). Identifiers are
//! inserted verbatim; zones, scenes, remotes and commands are plain slugs.

pub const STATUS: &str = "/";
pub const ZONES: &str = "/zone";
pub const SCENES: &str = "/scene";

/// Option appended to an assignment after the user resolved a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOption {
    /// Let the scene play in the conflicting zones too
    Clone,
    /// Put the conflicting zones in standby first
    Unassign,
}

impl AssignOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOption::Clone => "clone",
            AssignOption::Unassign => "unassign",
        }
    }
}

/// Volume and mute commands of the `zone` command category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeCommand {
    Up,
    Down,
    Set(u32),
    Mute,
    Unmute,
}

impl VolumeCommand {
    fn segment(&self) -> String {
        match self {
            VolumeCommand::Up => "volume-up".into(),
            VolumeCommand::Down => "volume-down".into(),
            VolumeCommand::Set(level) => format!("volume-set/{}", level),
            VolumeCommand::Mute => "volume-mute".into(),
            VolumeCommand::Unmute => "volume-unmute".into(),
        }
    }
}

pub fn zone(zone: &str) -> String {
    format!("/zone/{}", zone)
}

pub fn scene(scene: &str) -> String {
    format!("/scene/{}", scene)
}

pub fn assignment(zone: &str) -> String {
    format!("/assign/{}", zone)
}

pub fn assign(zone: &str, scene: &str, option: Option<AssignOption>) -> String {
    match option {
        Some(option) => format!("/assign/{}/{}/{}", zone, scene, option.as_str()),
        None => format!("/assign/{}/{}", zone, scene),
    }
}

pub fn unassign(zone: &str) -> String {
    format!("/unassign/{}", zone)
}

/// Current zone of a remote, without changing it
pub fn attached(remote: &str) -> String {
    format!("/attach/{}", remote)
}

pub fn attach(remote: &str, zone: &str) -> String {
    format!("/attach/{}/{}", remote, zone)
}

pub fn detach(remote: &str) -> String {
    format!("/detach/{}", remote)
}

pub fn commands(remote: &str) -> String {
    format!("/command/{}", remote)
}

pub fn scene_command(remote: &str, command: &str) -> String {
    format!("/command/{}/scene/{}", remote, command)
}

pub fn volume(remote: &str, command: VolumeCommand) -> String {
    format!("/command/{}/zone/{}", remote, command.segment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_paths() {
        assert_eq!(assign("zone1", "spotify", None), "/assign/zone1/spotify");
        assert_eq!(
            assign("zone1", "spotify", Some(AssignOption::Clone)),
            "/assign/zone1/spotify/clone"
        );
        assert_eq!(
            assign("zone1", "spotify", Some(AssignOption::Unassign)),
            "/assign/zone1/spotify/unassign"
        );
    }

    #[test]
    fn test_volume_paths() {
        assert_eq!(volume("r1", VolumeCommand::Set(37)), "/command/r1/zone/volume-set/37");
        assert_eq!(volume("r1", VolumeCommand::Up), "/command/r1/zone/volume-up");
        assert_eq!(volume("r1", VolumeCommand::Mute), "/command/r1/zone/volume-mute");
    }
}
