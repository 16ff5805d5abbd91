//! HTTP endpoint server using Axum

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, Level};

use crate::config::ScanConfig;
use crate::core::scanner::Scanner;
use crate::metrics::Metrics;
use crate::models::decision::View;
use crate::models::watchlist::WatchlistSpec;
use crate::report::{notification_items, render_digest, NotificationItem, ScanReport};
use crate::services::market_data::QuoteProvider;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub provider: Arc<dyn QuoteProvider>,
    pub config: ScanConfig,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "intrascan"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Increment in-flight requests
    state.metrics.http_requests_in_flight.inc();

    // Process request
    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    // Decrement in-flight requests
    state.metrics.http_requests_in_flight.dec();

    // Record metrics
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    // Log if error status
    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    #[serde(flatten)]
    pub watchlist: WatchlistSpec,
    /// View names, matched case-insensitively.
    #[serde(default)]
    pub views: Option<Vec<String>>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub report: ScanReport,
    pub digest: String,
    pub notifications: Vec<NotificationItem>,
}

fn bad_request(message: String) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

/// Run one scan for the posted watchlist
async fn run_scan(
    State(state): State<AppState>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, (StatusCode, Json<Value>)> {
    let watchlist = request
        .watchlist
        .into_watchlist()
        .map_err(|e| bad_request(e.to_string()))?;

    let mut config = state.config.clone();
    if let Some(views) = request.views {
        let mut parsed: Vec<View> = Vec::with_capacity(views.len());
        for name in &views {
            let view = name.parse::<View>().map_err(|e| bad_request(e.to_string()))?;
            if !parsed.contains(&view) {
                parsed.push(view);
            }
        }
        config = config.with_views(parsed);
    }
    if let Some(top_n) = request.top_n {
        config = config.with_top_n(top_n);
    }

    let scanner = Scanner::new(state.provider.clone(), config)
        .map_err(|e| bad_request(e.to_string()))?
        .with_metrics(state.metrics.clone());

    info!(
        symbols = watchlist.len(),
        index = %watchlist.index(),
        "API scan requested"
    );
    let report = scanner.scan(&watchlist).await;

    let config = scanner.config();
    let digest = render_digest(&report, &config.view_filter, config.top_n);
    let notifications = notification_items(&report, &config.view_filter, config.top_n);

    Ok(Json(ScanResponse {
        report,
        digest,
        notifications,
    }))
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/scan", post(run_scan))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

pub async fn start_server(
    port: u16,
    provider: Arc<dyn QuoteProvider>,
    config: ScanConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let state = AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        provider,
        config,
    };
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!(port = port, "HTTP server listening on port {}", port);
    info!("Scan endpoint available at http://0.0.0.0:{}/api/scan", port);
    axum::serve(listener, app).await?;

    Ok(())
}
