//! Serve command.

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use revlink::server::{AppState, build_router};
use revlink_config::Config;

/// Arguments for the serve command.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.bind)
    #[arg(short, long)]
    pub bind: Option<String>,
}

/// Runs the serve command.
pub fn run(args: ServeArgs, config: Config) -> Result<()> {
    let state = AppState::from_config(&config).context("failed to initialize resolver")?;
    let bind = args.bind.unwrap_or_else(|| config.server.bind.clone());

    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;

    rt.block_on(async {
        let listener = TcpListener::bind(&bind)
            .await
            .with_context(|| format!("failed to bind {bind}"))?;
        info!(addr = %listener.local_addr()?, "listening");

        axum::serve(listener, build_router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
