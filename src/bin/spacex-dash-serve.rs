use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use spacex_dash::config::DashConfig;
use spacex_dash::data::loader;
use spacex_dash::web::{dashboard_router, WebState};

/// Serve the launch records dashboard over HTTP.
#[derive(Debug, Parser)]
#[command(name = "spacex-dash-serve", version)]
struct Args {
    /// Launch records file (.csv, .json or .parquet).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long)]
    addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let mut config = DashConfig::default();
    if let Some(path) = args.data {
        config.data_path = path;
    }
    if let Some(addr) = args.addr {
        config.bind_addr = addr;
    }

    let dataset = loader::load_file(&config.data_path).context("starting web dashboard")?;
    let router = dashboard_router(WebState::new(dataset, config.payload_step));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    log::info!("Dashboard listening on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("failed to listen for Ctrl-C: {e}");
            }
            log::info!("shutdown signal received");
        })
        .await
        .context("serving dashboard")?;

    Ok(())
}
