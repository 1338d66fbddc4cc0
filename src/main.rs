use actix_web::{App, HttpServer, web};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod model;
mod service;

use app::AppState;
use model::Config;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let bind_addr = config.bind_addr();
    let cors_config = config.cors.clone();

    let state = AppState::new(config).map_err(|e| {
        tracing::error!(error = %e, "Failed to initialize application");
        std::io::Error::other(e.to_string())
    })?;

    let appraisal_service = web::Data::from(state.appraisal_service);

    if cors_config.allowed_origins.is_empty() {
        tracing::info!("CORS allows any origin");
    } else {
        tracing::info!(origins = ?cors_config.allowed_origins, "CORS restricted to configured origins");
    }

    tracing::info!("Starting Car Analyzer server on {}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors::build_cors(&cors_config))
            .app_data(appraisal_service.clone())
            .configure(api::analysis::configure)
            .configure(api::health::configure)
            .configure(api::info::configure)
            .configure(api::openapi::configure)
    })
    .bind(&bind_addr)?
    .run()
    .await
}
