use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use mb_api::app::create_app;
use mb_api::logging::init_tracing;
use mb_api::routes::otp::AppState;
use mb_core::services::verification::{OtpSweeper, VerificationService, VerificationServiceConfig};
use mb_infra::{create_otp_sender, InMemoryOtpStore};
use mb_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        delivery = ?config.delivery.provider,
        ttl_minutes = config.otp.ttl_minutes,
        max_attempts = config.otp.max_attempts,
        "Starting msgbridge API server"
    );

    let store = Arc::new(InMemoryOtpStore::new());
    let sender = create_otp_sender(&config.delivery);
    let verification_service = Arc::new(VerificationService::new(
        store.clone(),
        sender,
        VerificationServiceConfig::from(&config.otp),
    ));

    let sweeper = OtpSweeper::new(
        store,
        Duration::from_secs(config.otp.sweep_interval_seconds),
    )
    .spawn();

    let app_state = web::Data::new(AppState::new(verification_service));
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error");

    sweeper.shutdown().await;
    info!("msgbridge API server stopped");

    result
}
