//! ProductPulse Server — application entry point.

mod auth;
mod config;
mod error;
mod routes;
mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("pulse_server=info".parse().unwrap())
                .add_directive("pulse_db=info".parse().unwrap()),
        )
        .json()
        .init();

    info!("Starting ProductPulse server...");

    let config = ServerConfig::load();

    let db = pulse_db::open(&config.db)
        .await
        .expect("database setup failed");

    let state = AppState::new(&config, db);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind listen port");

    info!(port = config.port, "Server listening");

    axum::serve(listener, app).await.expect("server error");
}
