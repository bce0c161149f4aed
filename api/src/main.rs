use actix_web::{web, HttpServer};
use anyhow::Context;
use log::{info, warn};
use std::sync::Arc;

use sb_api::app::{build_state, create_app};
use sb_api::config::{init_logging, load_config};
use sb_core::services::otp::{ChallengeSweeper, SweeperConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config();
    init_logging(&config.logging);

    info!("Starting SportsBridge API Server ({})", config.environment);

    if config.environment.is_production() && config.identity.uses_dev_pepper() {
        warn!("AADHAAR_PEPPER is not set; Aadhaar hashes use the development pepper");
    }
    if config.environment.is_production() && config.jwt.is_using_default_secret() {
        warn!("JWT_SECRET is not set; session tokens are signed with the development secret");
    }
    if !config.environment.allows_diagnostics() {
        info!("Diagnostic OTP peek route disabled");
    }

    let state = web::Data::new(build_state(&config));

    let sweeper = Arc::new(ChallengeSweeper::new(
        state.auth_service.otp_service().store().clone(),
        SweeperConfig::from(&config.otp),
    ));
    let _sweeper_handle = sweeper.start_background_task();

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let workers = config.server.workers;
    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config));
    if workers > 0 {
        server = server.workers(workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("HTTP server terminated with an error")?;

    info!("SportsBridge API Server stopped");
    Ok(())
}
