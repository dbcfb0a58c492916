use anyhow::Result;
use solar_proposal::{api, config::Config, engine::ProposalEngine, telemetry};
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            anyhow::bail!("failed to read .env: {e}");
        }
    }
    init_tracing();

    let cfg = Config::load()?;
    let engine = ProposalEngine::new(cfg.constants.clone())?;
    info!(
        panel_wattage_w = cfg.constants.panel_wattage_w,
        rate_usd_per_kwh = cfg.constants.electricity_rate_usd_per_kwh,
        inverters = cfg.constants.inverter_catalog.len(),
        "constants table loaded"
    );

    let app = api::router(api::AppState::new(engine), &cfg);
    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("binding to 0.0.0.0 - service will be reachable from the network");
    }

    info!(%addr, "starting solar proposal service");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
