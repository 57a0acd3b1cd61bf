//! # Trailhead Binary
//!
//! The entry point for the site backend: one feedback endpoint in front of
//! a log-only sink.

use actix_web::{web, App, HttpServer};
use th_api::handlers::AppState;
use th_api::middleware;
use th_sink_log::LogFeedbackSink;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let state = web::Data::new(AppState {
        sink: Box::new(LogFeedbackSink),
    });

    let addr =
        std::env::var("TRAILHEAD_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("🚀 Trailhead starting on http://{addr}");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::cors_policy())
            .wrap(middleware::standard_middleware())
            .configure(th_api::configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
