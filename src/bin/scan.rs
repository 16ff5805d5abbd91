//! One-shot watchlist scan
//!
//! Reads the watchlist named by `WATCHLIST_PATH`, scans it once, and emits
//! the configured outputs: the digest on stdout and the JSON report (plus an
//! optional markdown summary) on disk.

use dotenvy::dotenv;
use intrascan::config::ScanConfig;
use intrascan::core::Scanner;
use intrascan::logging;
use intrascan::models::Watchlist;
use intrascan::report::{render_digest, render_markdown};
use intrascan::services::NseQuoteProvider;
use std::env;
use std::sync::Arc;
use tracing::{error, info};

const DEFAULT_WATCHLIST_PATH: &str = "watchlist.json";
const DEFAULT_JSON_OUT: &str = "scan_report.json";

#[tokio::main]
async fn main() {
    dotenv().ok();
    logging::init_logging();

    if let Err(e) = run().await {
        error!(error = %e, "Scan failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ScanConfig::from_env()?;

    let watchlist_path =
        env::var("WATCHLIST_PATH").unwrap_or_else(|_| DEFAULT_WATCHLIST_PATH.to_string());
    let watchlist = Watchlist::from_path(&watchlist_path)?;
    info!(
        path = %watchlist_path,
        symbols = watchlist.len(),
        index = %watchlist.index(),
        "Loaded watchlist"
    );

    let provider = Arc::new(NseQuoteProvider::from_env()?);
    let scanner = Scanner::new(provider, config)?;
    let report = scanner.scan(&watchlist).await;
    let config = scanner.config();

    if config.output_targets.structured() {
        let json_path = env::var("SCAN_JSON_OUT").unwrap_or_else(|_| DEFAULT_JSON_OUT.to_string());
        report.write_json(&json_path)?;
        info!(path = %json_path, "Wrote JSON report");

        if let Ok(md_path) = env::var("SCAN_MD_OUT") {
            std::fs::write(&md_path, render_markdown(&report, &config.view_filter, None))?;
            info!(path = %md_path, "Wrote markdown summary");
        }
    }

    if config.output_targets.digest() {
        println!(
            "{}",
            render_digest(&report, &config.view_filter, config.top_n)
        );
    }

    Ok(())
}
