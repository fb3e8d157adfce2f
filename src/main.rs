// menuscan - menu photo nutrition analysis service

use anyhow::Result;
use clap::Parser;
use menuscan::analysis::sample_analysis;
use menuscan::cli::Args;
use menuscan::config::AppConfig;
use menuscan::server::{create_router, Analyzer};
use menuscan::utils::logging;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.sample {
        println!("{}", serde_json::to_string_pretty(&sample_analysis())?);
        return Ok(());
    }

    // Phase 1: Load configuration
    let mut config = AppConfig::load(args.config.as_deref())?;
    args.apply(&mut config);
    if config.provider.api_key.is_none() {
        config.provider.api_key = std::env::var("OPENROUTER_API_KEY").ok();
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting menuscan v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Prepare upload storage
    tokio::fs::create_dir_all(&config.upload.dir).await?;
    info!("Storing uploads in {}", config.upload.dir);

    if config.auth.bearer_token.is_none() {
        warn!("auth.bearer_token not set, /api/menu/analyze accepts unauthenticated requests");
    }

    // Phase 4: Build analyzer and HTTP server
    let analyzer = Analyzer::from_config(&config.provider)?;
    info!("Model priority: {}", config.provider.models.join(" -> "));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, analyzer)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
