//! Weather Normalisation Service - Main Entry Point

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;
use weather_api::{init_logging, run_server, AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    init_logging(&settings.log).context("Failed to set tracing subscriber")?;

    info!("=== Weather Normalisation API v{} ===", env!("CARGO_PKG_VERSION"));

    let metrics = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let state = AppState::from_settings(&settings)
        .context("Failed to create weather provider")?
        .with_metrics(metrics);

    run_server(state, &settings.server.bind_address()).await
}
