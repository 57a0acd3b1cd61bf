//! # th-api
//!
//! The web routing and orchestration layer for Trailhead.

pub mod handlers;
pub mod middleware;

use actix_web::web;

/// Configures the routes for the site backend.
///
/// # Developer Note
/// We use a scoped configuration to allow the main binary to mount
/// the API under different paths if needed.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // One resource, every method: the handler itself answers 405 for
    // anything other than POST so the body matches the site contract.
    cfg.service(web::resource("/api/feedback").to(handlers::submit_feedback));
}
