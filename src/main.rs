//! HTTP server for the attendance reconciliation engine.
//!
//! Usage: `attendance-engine [CONFIG_DIR]`. The listen address is read from
//! `ATTENDANCE_ENGINE_ADDR`.

use std::env;
use std::error::Error;

use tracing::info;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config_dir = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());
    let addr = env::var("ATTENDANCE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let state = AppState::from_config(ConfigLoader::load(&config_dir)?)?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, config_dir = %config_dir, "Attendance engine listening");

    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
