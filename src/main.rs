use std::sync::Arc;

use axum::Router;
use log::info;
use tokio::net::TcpListener;

mod controllers;
mod models;
mod utils;

use controllers::hub::HubApiClient;
use controllers::status::{self, StatusState};
use utils::config::ServerConfig;
use utils::error::Error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Configuration is read once; a missing hub name stops the service here.
    let config = ServerConfig::from_env()?;

    // The hub client is built once and shared by every request through the router state.
    let api = HubApiClient::connect(&config.hub).await?;
    let state = StatusState::new(Arc::new(api), &config.hub.name, config.join_strategy);

    let app = Router::new().nest("/api/ocm", status::router(state));

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!(
        "Serving cluster status for hub {} on {} ({:?} join)",
        config.hub.name, addr, config.join_strategy
    );

    axum::serve(listener, app).await?;

    Ok(())
}
