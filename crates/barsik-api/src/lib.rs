//! # barsik-api
//!
//! The web routing and orchestration layer for the Barsik dashboard.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod overview;

use actix_web::web;

pub use handlers::AppState;
pub use overview::seed_panels;

/// Configures the dashboard routes.
///
/// Static assets are mounted by the binary before these, since the scope
/// below would otherwise swallow `/static`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            // The page itself, `?tab=` selects the open tab
            .route("/", web::get().to(handlers::dashboard))
            .route("/filters/{kind}", web::post().to(handlers::save_filters))
            .route("/settings", web::post().to(handlers::save_settings))
            .route("/health", web::get().to(handlers::health)),
    );
}
