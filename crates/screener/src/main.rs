mod cli;
mod config;
mod logging;
mod plain;
mod present;
mod service;
mod session;
mod ui;

use crate::cli::{Args, Skin};
use crate::config::load_client_config;
use crate::logging::{init_tracing, LogOptions};
use crate::plain::run_plain;
use crate::service::{HttpPredictionService, PredictionService};
use crate::ui::run_tui;
use clap::Parser;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _file_guard = init_tracing(&LogOptions::from_args(&args))?;

    let config = load_client_config(&args)?;
    info!(
        api_url = %config.api_url,
        timeout_secs = config.timeout.as_secs(),
        skin = ?args.skin,
        "screener starting"
    );
    let service: Arc<dyn PredictionService> = Arc::new(HttpPredictionService::new(&config.api_url)?);

    if args.check_health {
        return check_health(service.as_ref(), &config.api_url).await;
    }

    match args.skin {
        Skin::Tui => run_tui(service, &config).await,
        Skin::Plain => {
            let input = BufReader::new(tokio::io::stdin());
            run_plain(service.as_ref(), config.timeout, input, tokio::io::stdout()).await
        }
    }
}

async fn check_health(service: &dyn PredictionService, api_url: &str) -> anyhow::Result<()> {
    let health = service
        .health()
        .await
        .map_err(|err| anyhow::anyhow!("{api_url} unreachable: {err}"))?;
    println!(
        "{api_url}: status={} model_loaded={} version={}",
        health.status, health.model_loaded, health.version
    );
    if !health.is_healthy() {
        anyhow::bail!("service is {}", health.status);
    }
    Ok(())
}
