//! HTTP adapters
//!
//! Thin actix-web handlers that translate requests into store and key factory calls.

pub mod services;

use actix_web::web;

use services::{
    backup_routes, health_routes, redirect_routes, shorten_routes, welcome_routes,
};

/// Register every route on an actix `App`.
///
/// Expects `SharedStore`, `SharedFactory`, `BackupSettings` and `AppStartTime`
/// to be registered as app data.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(welcome_routes())
        .service(
            web::scope("/api/v1/url")
                .service(shorten_routes())
                .service(backup_routes()),
        )
        .service(redirect_routes())
        .service(health_routes());
}
