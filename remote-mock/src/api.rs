use crate::state::MockState;
use axum::{
    Json, Router,
    extract::{Path, Request, State},
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use serde_json::{Value, json};
use shared::{AssignResponse, ServiceError};
use std::collections::BTreeMap;

fn error(message: impl Into<String>) -> Json<Value> {
    Json(json!(ServiceError::new(message)))
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_zones(State(state): State<MockState>) -> Json<Value> {
    let inner = state.inner.lock().await;
    let zones: BTreeMap<_, _> = inner
        .zones
        .keys()
        .filter_map(|id| inner.zone_info(id).map(|info| (id.clone(), info)))
        .collect();
    Json(json!(zones))
}

async fn get_zone(State(state): State<MockState>, Path(zone): Path<String>) -> Json<Value> {
    let inner = state.inner.lock().await;
    match inner.zone_info(&zone) {
        Some(info) => Json(json!({
            "zone": info.zone,
            "name": info.name,
            "active": info.scene,
            "remotes": info.remotes,
            "compatible": info.compatible,
        })),
        None => error("No such zone"),
    }
}

async fn list_scenes(State(state): State<MockState>) -> Json<Value> {
    let inner = state.inner.lock().await;
    let scenes: BTreeMap<_, _> = inner
        .scenes
        .keys()
        .filter_map(|id| inner.scene_info(id).map(|info| (id.clone(), info)))
        .collect();
    Json(json!(scenes))
}

async fn get_scene(State(state): State<MockState>, Path(scene): Path<String>) -> Json<Value> {
    let inner = state.inner.lock().await;
    match inner.scene_info(&scene) {
        Some(info) => Json(json!(info)),
        None => error("No such scene"),
    }
}

async fn get_assignment(State(state): State<MockState>, Path(zone): Path<String>) -> Json<Value> {
    let inner = state.inner.lock().await;
    match inner.zones.get(&zone) {
        Some(z) => Json(json!({
            "active": z.scene,
            "scenes": inner.scenes.keys().collect::<Vec<_>>(),
        })),
        None => error("No such zone"),
    }
}

async fn assign(
    state: MockState,
    zone: String,
    scene: String,
    option: Option<String>,
) -> Json<Value> {
    let mut inner = state.inner.lock().await;
    if !inner.zones.contains_key(&zone) {
        return error("No such zone");
    }
    if !inner.scenes.contains_key(&scene) {
        return error("No such scene");
    }

    let conflict = inner.conflicts(&zone, &scene);
    if !conflict.is_empty() {
        match option.as_deref() {
            None => {
                tracing::info!(%zone, %scene, ?conflict, "Assignment conflict");
                let active = inner.zones.get(&zone).and_then(|z| z.scene.clone());
                return Json(json!(AssignResponse::conflict(zone, active, conflict)));
            }
            Some("unassign") => {
                for other in &conflict {
                    if let Some(z) = inner.zones.get_mut(other) {
                        z.scene = None;
                    }
                }
            }
            Some("clone") => {}
            Some(other) => return error(format!("Unknown option {}", other)),
        }
    }

    if let Some(z) = inner.zones.get_mut(&zone) {
        z.scene = Some(scene.clone());
    }
    tracing::info!(%zone, %scene, "Scene assigned");
    Json(json!(AssignResponse::active(zone, Some(scene))))
}

async fn assign_scene(
    State(state): State<MockState>,
    Path((zone, scene)): Path<(String, String)>,
) -> Json<Value> {
    assign(state, zone, scene, None).await
}

async fn assign_scene_with_option(
    State(state): State<MockState>,
    Path((zone, scene, option)): Path<(String, String, String)>,
) -> Json<Value> {
    assign(state, zone, scene, Some(option)).await
}

async fn unassign(State(state): State<MockState>, Path(zone): Path<String>) -> Json<Value> {
    let mut inner = state.inner.lock().await;
    match inner.zones.get_mut(&zone) {
        Some(z) => {
            z.scene = None;
            Json(json!({ "zone": zone, "active": null }))
        }
        None => error("No such zone"),
    }
}

async fn get_attachment(State(state): State<MockState>, Path(remote): Path<String>) -> Json<Value> {
    let inner = state.inner.lock().await;
    match inner.remotes.get(&remote) {
        Some(zone) => Json(json!({ "active": zone })),
        None => error(format!("No such remote {}", remote)),
    }
}

async fn attach(
    State(state): State<MockState>,
    Path((remote, zone)): Path<(String, String)>,
) -> Json<Value> {
    let mut inner = state.inner.lock().await;
    if !inner.remotes.contains_key(&remote) {
        return error(format!("No such remote {}", remote));
    }
    if !inner.zones.contains_key(&zone) {
        return error("No such zone");
    }
    inner.remotes.insert(remote.clone(), Some(zone.clone()));
    tracing::info!(%remote, %zone, "Remote attached");
    Json(json!({ "active": zone, "users": inner.remotes_in(&zone) }))
}

async fn detach(State(state): State<MockState>, Path(remote): Path<String>) -> Json<Value> {
    let mut inner = state.inner.lock().await;
    if let Some(attached) = inner.remotes.get_mut(&remote) {
        *attached = None;
    }
    Json(json!({ "active": null }))
}

async fn list_commands(State(state): State<MockState>, Path(remote): Path<String>) -> Json<Value> {
    let inner = state.inner.lock().await;
    if !inner.remotes.contains_key(&remote) {
        return error(format!("No such remote {}", remote));
    }
    let (zone, commands) = inner.commands_for(&remote);
    Json(json!({ "zone": zone, "commands": commands }))
}

async fn exec(
    state: MockState,
    remote: String,
    category: String,
    command: String,
    argument: Option<String>,
) -> Json<Value> {
    let mut inner = state.inner.lock().await;
    let (zone, commands) = inner.commands_for(&remote);
    let Some(zone) = zone else {
        return error("Not attached");
    };

    match category.as_str() {
        "zone" => {
            if !commands.zone.contains_key(&command) {
                return error(format!("{} is not a zone command", command));
            }
            let Some(z) = inner.zones.get_mut(&zone) else {
                return error("No such zone");
            };
            match (command.as_str(), argument.as_deref()) {
                ("volume-up", _) => z.volume = (z.volume + 1).min(crate::state::MAX_VOLUME),
                ("volume-down", _) => z.volume = z.volume.saturating_sub(1),
                ("volume-set", Some(level)) => match level.parse::<u32>() {
                    Ok(level) => z.volume = level.min(crate::state::MAX_VOLUME),
                    Err(_) => return error(format!("{} failed", command)),
                },
                ("volume-mute", _) => z.muted = true,
                ("volume-unmute", _) => z.muted = false,
                _ => return error(format!("{} failed", command)),
            }
            tracing::debug!(%zone, volume = z.volume, muted = z.muted, "Volume changed");
            Json(json!({ "result": "ok" }))
        }
        "scene" => {
            if commands.scene.contains_key(&command) {
                tracing::debug!(%zone, %command, "Scene command");
                Json(json!({ "result": "ok" }))
            } else {
                error(format!("{} is not a scene command", command))
            }
        }
        other => error(format!("{} is not a supported category", other)),
    }
}

async fn exec_command(
    State(state): State<MockState>,
    Path((remote, category, command)): Path<(String, String, String)>,
) -> Json<Value> {
    exec(state, remote, category, command, None).await
}

async fn exec_command_with_argument(
    State(state): State<MockState>,
    Path((remote, category, command, argument)): Path<(String, String, String, String)>,
) -> Json<Value> {
    exec(state, remote, category, command, Some(argument)).await
}

async fn record_request(State(state): State<MockState>, request: Request, next: Next) -> Response {
    state.record(request.uri().path()).await;
    next.run(request).await
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/zone", get(list_zones))
        .route("/zone/{zone}", get(get_zone))
        .route("/scene", get(list_scenes))
        .route("/scene/{scene}", get(get_scene))
        .route("/assign/{zone}", get(get_assignment))
        .route("/assign/{zone}/{scene}", get(assign_scene))
        .route("/assign/{zone}/{scene}/{option}", get(assign_scene_with_option))
        .route("/unassign/{zone}", get(unassign))
        .route("/attach/{remote}", get(get_attachment))
        .route("/attach/{remote}/{zone}", get(attach))
        .route("/detach/{remote}", get(detach))
        .route("/command/{remote}", get(list_commands))
        .route("/command/{remote}/{category}/{command}", get(exec_command))
        .route(
            "/command/{remote}/{category}/{command}/{argument}",
            get(exec_command_with_argument),
        )
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use http::Request as HttpRequest;
    use tower::ServiceExt;

    async fn call(router: &Router, path: &str) -> Value {
        let response = router
            .clone()
            .oneshot(HttpRequest::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_assign_conflict_then_unassign_option() {
        let state = MockState::demo().await;
        state.set_scene("zone2", Some("spotify")).await;
        let router = router(state.clone());

        let reply = call(&router, "/assign/zone1/spotify").await;
        assert_eq!(reply["conflict"], json!(["zone2"]));
        assert_eq!(state.scene_of("zone1").await, None);

        let reply = call(&router, "/assign/zone1/spotify/unassign").await;
        assert_eq!(reply["active"], json!("spotify"));
        assert_eq!(state.scene_of("zone2").await, None);
    }

    #[tokio::test]
    async fn test_clone_keeps_other_zones() {
        let state = MockState::demo().await;
        state.set_scene("zone2", Some("spotify")).await;
        let router = router(state.clone());

        call(&router, "/assign/zone1/spotify/clone").await;
        assert_eq!(state.scene_of("zone1").await.as_deref(), Some("spotify"));
        assert_eq!(state.scene_of("zone2").await.as_deref(), Some("spotify"));
    }

    #[tokio::test]
    async fn test_unknown_ids_answer_with_error() {
        let router = router(MockState::demo().await);
        assert_eq!(call(&router, "/zone/zone9").await["error"], json!("No such zone"));
        assert_eq!(
            call(&router, "/attach/nobody/zone1").await["error"],
            json!("No such remote nobody")
        );
    }

    #[tokio::test]
    async fn test_volume_commands_need_attachment() {
        let state = MockState::demo().await;
        let router = router(state.clone());
        assert_eq!(
            call(&router, "/command/kitchen/zone/volume-up").await["error"],
            json!("Not attached")
        );

        state.attach("kitchen", "zone2").await;
        call(&router, "/command/kitchen/zone/volume-set/37").await;
        call(&router, "/command/kitchen/zone/volume-mute").await;
        assert_eq!(state.volume("zone2").await, Some((37, true)));
    }

    #[tokio::test]
    async fn test_requests_are_recorded() {
        let state = MockState::demo().await;
        let router = router(state.clone());
        call(&router, "/zone").await;
        call(&router, "/scene").await;
        assert_eq!(state.requests().await, vec!["/zone", "/scene"]);
    }
}
