use std::net::SocketAddr;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use departure_server::entur::{EnturClient, EnturConfig};
use departure_server::settings::{FileStore, get_defaults, normalize_defaults};
use departure_server::web::{AppState, create_router};

/// Identifies us to Entur unless `ENTUR_CLIENT_NAME` is set.
const DEFAULT_CLIENT_NAME: &str = "departure-server";

const DEFAULT_SETTINGS_PATH: &str = "settings.json";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let client_name = std::env::var("ENTUR_CLIENT_NAME").unwrap_or_else(|_| {
        warn!("ENTUR_CLIENT_NAME not set, identifying as {DEFAULT_CLIENT_NAME}");
        DEFAULT_CLIENT_NAME.to_string()
    });
    let settings_path =
        std::env::var("SETTINGS_PATH").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
    let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string())
        .parse()
        .expect("LISTEN_ADDR must be a socket address like 127.0.0.1:3000");

    // Load and heal settings before serving anything
    let settings = FileStore::open(&settings_path).expect("Failed to open settings file");
    normalize_defaults(&settings).expect("Failed to normalize settings");
    let defaults = get_defaults(&settings);
    info!(
        path = %settings.path().display(),
        stop_id = %defaults.stop_id,
        stop_name = %defaults.stop_name,
        lines = ?defaults.lines,
        "loaded settings"
    );

    // Create Entur client
    let mut entur_config = EnturConfig::new(client_name);
    if let Ok(url) = std::env::var("ENTUR_BASE_URL") {
        entur_config = entur_config.with_base_url(url);
    }
    let entur = EnturClient::new(entur_config).expect("Failed to create Entur client");

    let app = create_router(AppState::new(settings, entur));

    info!("departure server listening on http://{listen_addr}");
    info!("  GET  /health          - Health check");
    info!("  GET  /api/departures  - Departure board for the configured stop");
    info!("  GET  /api/defaults    - Configured stop and lines");
    info!("  GET  /api/settings    - Stored settings");
    info!("  PUT  /api/settings    - Update settings");

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
