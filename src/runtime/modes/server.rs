//! Server mode
//!
//! This module contains the HTTP server startup logic.

use actix_web::middleware::{Compress, DefaultHeaders};
use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::configure_routes;
use crate::api::services::AppStartTime;
use crate::config::StaticConfig;
use crate::runtime::lifetime;

/// Run the HTTP server
///
/// This function:
/// 1. Opens the store and builds the key factory
/// 2. Configures and starts the HTTP server
/// 3. Closes the store once the server has stopped (Ctrl+C / SIGTERM)
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let app_start_time = AppStartTime::now();

    let startup = lifetime::startup::prepare_startup(config).map_err(|e| {
        tracing::error!("Server startup failed: {:#}", e);
        e
    })?;

    let store = startup.store.clone();
    let factory = startup.factory.clone();
    let backup = startup.backup.clone();

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-cache, no-store, must-revalidate")))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(factory.clone()))
            .app_data(web::Data::new(backup.clone()))
            .app_data(web::Data::new(app_start_time.clone()))
            .configure(configure_routes)
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .workers(cpu_count)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?;

    warn!("Starting server at http://{}", bind_address);
    let result = server.run().await;

    warn!("Server stopped, closing store");
    startup.shutdown();

    result.context("HTTP server terminated with an error")
}
