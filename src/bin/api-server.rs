//! Intrascan API Server
//!
//! HTTP API server with health check, metrics, and an on-demand scan
//! endpoint. Scans are stateless, so the service can be horizontally scaled.

use dotenvy::dotenv;
use intrascan::config::ScanConfig;
use intrascan::core::http::start_server;
use intrascan::logging;
use intrascan::services::market_data::QuoteProvider;
use intrascan::services::NseQuoteProvider;
use std::env;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ScanConfig::from_env()?;
    let provider = NseQuoteProvider::from_env()?;

    let env = intrascan::config::get_environment();
    info!("Starting Intrascan API Server");
    info!(environment = %env, "Environment");
    info!(quote_source = %provider.base_url(), "Quote source");
    info!(
        concurrency = config.concurrency_limit,
        timeout_ms = config.per_symbol_timeout.as_millis() as u64,
        top_n = config.top_n,
        "Scan defaults"
    );

    let provider: Arc<dyn QuoteProvider> = Arc::new(provider);
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(port, provider, config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
