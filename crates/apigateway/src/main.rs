use anyhow::{Context, Result};
use apigateway::{handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::{
    config::Config,
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let is_dev = std::env::var("DEV_MODE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let is_enable_file = std::env::var("ENABLE_FILE_LOG")
        .map(|v| v == "true")
        .unwrap_or(false);

    let config = Config::init().context("Failed to load configuration")?;

    let mut telemetry = Telemetry::new("ticketing-apigateway", config.otel_endpoint.clone());

    let logger_provider = telemetry
        .init_logger()
        .context("Failed to initialize log exporter")?;
    telemetry
        .init_meter()
        .context("Failed to initialize metric exporter")?;
    telemetry
        .init_tracer()
        .context("Failed to initialize trace exporter")?;

    init_logger(logger_provider, "apigateway", is_dev, is_enable_file);

    info!(
        "🏗️ Starting with {:?} storage, payment policy {:?}",
        config.storage, config.payment_policy
    );

    let state = AppState::new(&config)
        .await
        .context("Failed to create AppState")?;

    let served = AppRouter::serve(config.port, state).await;

    info!("Shutting down servers...");

    if let Err(e) = telemetry.shutdown().await {
        error!("❌ Telemetry shutdown failed: {e}");
    }

    served
}
