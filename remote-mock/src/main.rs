//! remote-mock: standalone in-memory Zone/Scene Service
//!
//! Serves the demo house on `0.0.0.0:$MOCK_PORT` (default 5000) so a remote
//! can be tried without real equipment.

use remote_mock::{MockState, router};
use shared::DEFAULT_SERVICE_PORT;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "remote_mock=info,tower_http=info".into()),
        )
        .init();

    let port: u16 = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_SERVICE_PORT);

    let state = MockState::demo().await;
    let app = router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("remote-mock listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
