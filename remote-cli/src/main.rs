//! multiremote: terminal front end for a multiRemote zone/scene service
//!
//! Renders zones, scenes and commands as text and drives assignments,
//! including the conflict dialog, through the Assignment Client.

mod cli;
mod logger;
mod presenter;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use remote_client::{
    AssignmentClient, AssignmentResult, ClientConfig, ClientError, NetworkHttpClient,
    RemoteSettings, STANDBY_SCENE, SessionContext, ZoneState,
};

use cli::{Cli, Command, ServiceCommand, SettingsArgs, VolumeAction};
use presenter::TerminalPresenter;

type Client = AssignmentClient<NetworkHttpClient>;

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = match logger::init_logger(cli.verbose, cli.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            None
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

fn report(error: &anyhow::Error) {
    match error.downcast_ref::<ClientError>() {
        Some(ClientError::MissingSettings(fields)) => {
            eprintln!(
                "This remote is not configured yet (missing: {}).\n\
                 Run `multiremote settings --name <NAME> --id <ID> --home <ZONE>` first.",
                fields.join(", ")
            );
        }
        Some(e) if e.is_transport() => {
            tracing::error!(error = %e, "Request failed");
            eprintln!("Failed to execute request due to:\n{e}");
        }
        _ => eprintln!("error: {error:#}"),
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.client_config();
    match cli.command {
        Command::Settings(args) => settings(&config, &args),
        Command::Service(command) => {
            // No request is sent without a complete identity
            let remote = config.settings_storage().load_remote()?;
            let http = config.build_http_client()?;
            let mut client = AssignmentClient::new(http, remote);
            client.bootstrap().await?;
            execute(&mut client, command).await
        }
    }
}

async fn execute(client: &mut Client, command: ServiceCommand) -> anyhow::Result<()> {
    match command {
        ServiceCommand::Status => {
            let status = client.ping().await?;
            let session = client.session();
            println!("Service:  {} ({})", client.http().base_url(), status.status);
            println!(
                "Remote:   {} [{}], home {}",
                session.remote().name(),
                session.remote().id(),
                session.zone_name(session.remote().home())
            );
            match session.active_zone() {
                Some(zone) => println!("Attached: {}", session.zone_name(zone)),
                None => println!("Attached: -"),
            }
        }
        ServiceCommand::Zones => print_zones(client.session()),
        ServiceCommand::Scenes { zone } => {
            let zone = zone_or_active(client, zone)?;
            let state = client.zone_assignment(&zone).await?;
            print_scenes(client.session(), &state);
        }
        ServiceCommand::Attach { zone } => {
            let state = match zone {
                Some(zone) => client.attach_zone(&zone).await?,
                None => client.attach_home().await?,
            };
            println!("Attached to {}", client.session().zone_name(&state.zone));
            print_scenes(client.session(), &state);
            print_commands(client.session());
        }
        ServiceCommand::Detach => {
            client.detach().await?;
            println!("Detached");
        }
        ServiceCommand::Assign {
            scene,
            zone,
            on_conflict,
        } => {
            let zone = zone_or_active(client, zone)?;
            let result = match on_conflict.decision() {
                Some(decision) => client.assign_interactive(&zone, &scene, &decision).await?,
                None => {
                    client
                        .assign_interactive(&zone, &scene, &TerminalPresenter)
                        .await?
                }
            };
            print_result(client.session(), &result);
        }
        ServiceCommand::Standby { zone } => {
            let zone = zone_or_active(client, zone)?;
            let result = client.assign_scene(&zone, STANDBY_SCENE).await?;
            print_result(client.session(), &result);
        }
        ServiceCommand::Volume { action } => {
            zone_or_active(client, None)?;
            match action {
                VolumeAction::Up => client.volume_up().await?,
                VolumeAction::Down => client.volume_down().await?,
                VolumeAction::Set { level } => client.set_volume(level).await?,
                VolumeAction::Mute => client.mute().await?,
                VolumeAction::Unmute => client.unmute().await?,
            }
        }
        ServiceCommand::Commands => {
            zone_or_active(client, None)?;
            client.load_commands().await?;
            print_commands(client.session());
        }
        ServiceCommand::Run { command } => client.run_command(&command).await?,
    }
    Ok(())
}

fn settings(config: &ClientConfig, args: &SettingsArgs) -> anyhow::Result<()> {
    let storage = config.settings_storage();
    if args.clear {
        storage
            .delete()
            .with_context(|| format!("removing {}", storage.path().display()))?;
        println!("Settings removed");
        return Ok(());
    }

    let mut settings = storage.load().unwrap_or_default();
    if args.has_changes() {
        if let Some(name) = &args.name {
            settings.name = name.clone();
        }
        if let Some(id) = &args.id {
            settings.id = id.clone();
        }
        if let Some(home) = &args.home {
            settings.home = home.clone();
        }
        storage.save(&settings)?;
        println!("Settings saved to {}", storage.path().display());
    }
    print_settings(&settings);
    Ok(())
}

fn zone_or_active(client: &Client, zone: Option<String>) -> anyhow::Result<String> {
    zone.or_else(|| client.session().active_zone().map(str::to_string))
        .context("not attached to a zone, run `multiremote attach [zone]` first")
}

// ========== Rendering ==========

fn print_settings(settings: &RemoteSettings) {
    let show = |value: &str| if value.is_empty() { "-".to_string() } else { value.to_string() };
    println!("Name: {}", show(&settings.name));
    println!("Id:   {}", show(&settings.id));
    println!("Home: {}", show(&settings.home));
    if !settings.is_complete() {
        println!("Missing: {}", settings.missing().join(", "));
    }
}

fn print_zones(session: &SessionContext) {
    for (id, zone) in session.zones() {
        let marker = if session.active_zone() == Some(id.as_str()) { '*' } else { ' ' };
        let playing = match session.active_scene(id) {
            Some(scene) => session.scene_name(scene),
            None => "Standby",
        };
        println!("{} {:<12} {:<20} {}", marker, id, zone.name, playing);
    }
}

fn print_scenes(session: &SessionContext, state: &ZoneState) {
    let active = state.active.as_deref();
    let marker = |on: bool| if on { '*' } else { ' ' };
    println!("{} {:<12} Standby", marker(active.is_none()), STANDBY_SCENE);
    for scene in session.offered_scenes(&state.zone) {
        println!(
            "{} {:<12} {}",
            marker(active == Some(scene.as_str())),
            scene,
            session.scene_name(scene)
        );
    }
}

fn print_commands(session: &SessionContext) {
    let commands = &session.commands().scene;
    if commands.is_empty() {
        println!("No commands available");
        return;
    }
    for (id, command) in commands {
        println!("  {:<16} {}", id, command.name);
    }
}

fn print_result(session: &SessionContext, result: &AssignmentResult) {
    match result {
        AssignmentResult::Success { zone, active } => match active {
            Some(scene) => println!(
                "{} now plays {}",
                session.zone_name(zone),
                session.scene_name(scene)
            ),
            None => println!("{} is in standby", session.zone_name(zone)),
        },
        AssignmentResult::Standby { zone } => {
            println!("{} is in standby", session.zone_name(zone))
        }
        AssignmentResult::Conflict { zone, .. } => println!(
            "Nothing changed, {} keeps {}",
            session.zone_name(zone),
            session
                .active_scene(zone)
                .map(|s| session.scene_name(s))
                .unwrap_or("Standby")
        ),
    }
}
