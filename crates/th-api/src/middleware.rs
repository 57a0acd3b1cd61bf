//! trailhead/crates/th-api/src/middleware.rs
//!
//! Request logging and CORS for the site backend.

use actix_cors::Cors;
use actix_web::middleware::Logger;

/// Per-request access logging (peer address, request line, status, size).
pub fn standard_middleware() -> Logger {
    Logger::default()
}

/// CORS policy for browser submissions.
///
/// The feedback form is served from the static site, which may not share
/// a host with this API, so cross-origin POSTs must be allowed.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST"])
        .max_age(3600)
}
