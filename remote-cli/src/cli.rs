//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use remote_client::{ClientConfig, ConflictDecision};

#[derive(Debug, Parser)]
#[command(
    name = "multiremote",
    version,
    about = "Terminal remote for a multiRemote zone/scene service"
)]
pub struct Cli {
    /// Service base URL [env: MULTIREMOTE_URL]
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Service host, expanded to http://<host>:5000 [env: MULTIREMOTE_HOST]
    #[arg(long, global = true, conflicts_with = "url")]
    pub host: Option<String>,

    /// Request timeout in seconds [env: MULTIREMOTE_TIMEOUT]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Remote settings file [env: MULTIREMOTE_SETTINGS]
    #[arg(long, global = true)]
    pub settings_file: Option<PathBuf>,

    /// Also write daily rotated logs to this directory
    #[arg(long, env = "MULTIREMOTE_LOG_DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment configuration with the explicit flags applied on top
    pub fn client_config(&self) -> ClientConfig {
        self.apply(ClientConfig::from_env())
    }

    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(url) = &self.url {
            config = config.with_base_url(url.clone());
        } else if let Some(host) = &self.host {
            config = config.with_base_url(ClientConfig::for_host(host).base_url);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        if let Some(path) = &self.settings_file {
            config = config.with_settings_path(path);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show or change this remote's name, id and home zone
    Settings(SettingsArgs),
    #[command(flatten)]
    Service(ServiceCommand),
}

/// Subcommands that talk to the service
#[derive(Debug, Subcommand)]
pub enum ServiceCommand {
    /// Check the service and show where this remote is attached
    Status,
    /// List zones and what they play
    Zones,
    /// List the scenes of a zone
    Scenes {
        /// Zone to list, defaults to the attached zone
        #[arg(long)]
        zone: Option<String>,
    },
    /// Attach this remote to a zone (the home zone if omitted)
    Attach { zone: Option<String> },
    /// Detach this remote from its zone
    Detach,
    /// Play a scene
    Assign {
        scene: String,
        /// Zone to assign, defaults to the attached zone
        #[arg(long)]
        zone: Option<String>,
        /// How to settle a conflict with other zones
        #[arg(long, value_enum, default_value_t = OnConflict::Ask)]
        on_conflict: OnConflict,
    },
    /// Put a zone in standby
    Standby {
        #[arg(long)]
        zone: Option<String>,
    },
    /// Volume control of the attached zone
    Volume {
        #[command(subcommand)]
        action: VolumeAction,
    },
    /// List the commands the current scene offers
    Commands,
    /// Invoke a scene command
    Run { command: String },
}

#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Display name of this remote
    #[arg(long)]
    pub name: Option<String>,
    /// Remote identifier known to the service
    #[arg(long)]
    pub id: Option<String>,
    /// Home zone
    #[arg(long)]
    pub home: Option<String>,
    /// Remove the stored settings
    #[arg(long, conflicts_with_all = ["name", "id", "home"])]
    pub clear: bool,
}

impl SettingsArgs {
    pub fn has_changes(&self) -> bool {
        self.name.is_some() || self.id.is_some() || self.home.is_some()
    }
}

#[derive(Debug, Subcommand)]
pub enum VolumeAction {
    Up,
    Down,
    Set { level: u32 },
    Mute,
    Unmute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnConflict {
    /// Prompt on the terminal
    Ask,
    Clone,
    Displace,
    Cancel,
}

impl OnConflict {
    /// Fixed decision, `None` when the user should be asked
    pub fn decision(self) -> Option<ConflictDecision> {
        match self {
            OnConflict::Ask => None,
            OnConflict::Clone => Some(ConflictDecision::Clone),
            OnConflict::Displace => Some(ConflictDecision::Displace),
            OnConflict::Cancel => Some(ConflictDecision::Cancel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assign_flags() {
        let cli = Cli::try_parse_from([
            "multiremote",
            "--host",
            "10.0.3.1",
            "assign",
            "spotify",
            "--on-conflict",
            "displace",
        ])
        .unwrap();
        let config = cli.apply(ClientConfig::new("http://elsewhere:5000").with_timeout(9));
        assert_eq!(config.base_url, "http://10.0.3.1:5000");
        assert_eq!(config.timeout, 9);
        match cli.command {
            Command::Service(ServiceCommand::Assign {
                scene, on_conflict, ..
            }) => {
                assert_eq!(scene, "spotify");
                assert_eq!(on_conflict.decision(), Some(ConflictDecision::Displace));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_volume_set_parses_level() {
        let cli = Cli::try_parse_from(["multiremote", "volume", "set", "37"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Service(ServiceCommand::Volume {
                action: VolumeAction::Set { level: 37 }
            })
        ));
    }

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::try_parse_from([
            "multiremote",
            "--url",
            "http://hub:8080",
            "--timeout",
            "3",
            "--settings-file",
            "/tmp/remote.json",
            "status",
        ])
        .unwrap();
        let base = ClientConfig::new("http://elsewhere:5000").with_settings_path("/etc/remote.json");
        let config = cli.apply(base);
        assert_eq!(config.base_url, "http://hub:8080");
        assert_eq!(config.timeout, 3);
        assert_eq!(config.settings_path, PathBuf::from("/tmp/remote.json"));

        let cli = Cli::try_parse_from(["multiremote", "status"]).unwrap();
        let config = cli.apply(ClientConfig::new("http://elsewhere:5000"));
        assert_eq!(config.base_url, "http://elsewhere:5000");
    }
}
