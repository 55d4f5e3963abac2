//! Board Gateway Library
//!
//! HTTP REST API over the sign and member services, with bearer token
//! authentication and OpenAPI documentation.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use tower_http::trace::TraceLayer;
use tracing::info;

use member_service_lib::infra::Database;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect to the database, apply migrations and serve HTTP until shutdown.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;

    let state = AppState::from_database(database, &config.jwt);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Board API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
