//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, timeout, panic capture)
//! - Validate and route tile requests, forward them upstream
//! - Serve liveness and the service description
//! - Run the optional upstream health monitor

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

use crate::config::GatewayConfig;
use crate::health::{HealthMonitor, HealthStatus, UpstreamHealth};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::http::response::{self, not_found, relay};
use crate::lifecycle::{shutdown::wait_for, Shutdown};
use crate::observability::{metrics, spans};
use crate::routing::{TileMatcher, TileRouter};
use crate::security::cors_layer;
use crate::tile::CoordinateValidator;
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub matcher: TileMatcher,
    pub router: Arc<TileRouter>,
    pub upstream: UpstreamClient,
    pub upstream_health: Arc<UpstreamHealth>,
    pub service_name: Arc<str>,
    pub public_port: u16,
}

impl AppState {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            matcher: TileMatcher::new(CoordinateValidator::new(config.tiles.max_zoom)),
            router: Arc::new(TileRouter::from_config(config)),
            upstream: UpstreamClient::new(&config.upstream),
            upstream_health: Arc::new(UpstreamHealth::new()),
            service_name: Arc::from(config.service_name.as_str()),
            public_port: config.listener.port().unwrap_or(8080),
        }
    }
}

/// HTTP server for the tile gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState::from_config(&config);
        let router = Self::build_router(&config, state.clone());
        Self {
            router,
            config,
            state,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/", get(service_description).fallback(fallback))
            .route("/healthz", get(healthz).fallback(fallback))
            .route("/tiles/{z}/{x}/{tile}", get(tile_handler).fallback(fallback))
            .fallback(fallback)
            .with_state(state);

        Self::with_layers(routes, config)
    }

    /// Wrap `routes` in the middleware stack, outermost last.
    #[allow(deprecated)]
    fn with_layers(routes: Router, config: &GatewayConfig) -> Router {
        routes
            .layer(CatchPanicLayer::custom(response::internal_error))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(cors_layer(&config.cors))
            .layer(spans::trace_layer())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        if self.config.health_check.enabled {
            let monitor = HealthMonitor::new(
                self.state.upstream.clone(),
                self.state.upstream_health.clone(),
                self.config.health_check.clone(),
            );
            let monitor_shutdown = shutdown.subscribe();
            tokio::spawn(async move {
                monitor.run(monitor_shutdown).await;
            });
        }

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for(shutdown.subscribe()))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Validate, route and forward a tile request.
async fn tile_handler(
    State(state): State<AppState>,
    Path((z, x, file)): Path<(String, String, String)>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let start_time = Instant::now();
    let request_id = headers.request_id().to_string();

    let tile = match state.matcher.match_segments(&z, &x, &file) {
        Some(Ok(tile)) => tile,
        Some(Err(e)) => {
            tracing::debug!(request_id = %request_id, path = %uri.path(), error = %e, "Tile request rejected");
            metrics::record_rejection(e.reason());
            return e.into_response();
        }
        None => return not_found(uri.path()),
    };

    let decision = state.router.route(&tile.coordinate, tile.format);
    let format = tile.format.label();

    tracing::debug!(
        request_id = %request_id,
        tile = %tile.coordinate,
        format = format,
        upstream_path = %decision.upstream_path,
        "Forwarding tile request"
    );

    match state.upstream.fetch(method, &decision.upstream_path, &headers).await {
        Ok(upstream) => {
            metrics::record_request(format, upstream.status().as_u16(), start_time);
            relay(upstream, &decision)
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream_path = %decision.upstream_path,
                error = %e,
                "Upstream error"
            );
            metrics::record_upstream_error();
            metrics::record_request(format, e.http_status_code(), start_time);
            e.into_response()
        }
    }
}

async fn healthz(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus::ok(&*state.service_name))
}

/// Static description of the endpoints this gateway serves.
async fn service_description(State(state): State<AppState>) -> Json<Value> {
    let port = state.public_port;

    Json(json!({
        "service": &*state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "vector": "/tiles/{z}/{x}/{y}.pbf",
            "raster_png": "/tiles/{z}/{x}/{y}.png",
            "raster_jpg": "/tiles/{z}/{x}/{y}.jpg",
            "health": "/healthz",
        },
        "max_zoom": state.matcher.validator().max_zoom(),
        "raster_style": state.router.raster_style(),
        "arcgis": {
            "description": "For ArcGIS Maps SDK WebTileLayer",
            "urlTemplate": {
                "vector": format!("http://YOUR_HOST:{}/tiles/{{level}}/{{col}}/{{row}}.pbf", port),
                "raster": format!("http://YOUR_HOST:{}/tiles/{{level}}/{{col}}/{{row}}.png", port),
            },
            "note": "Replace YOUR_HOST with your server hostname or IP. Use {level}, {col}, {row} for ArcGIS, or {z}, {x}, {y} for standard XYZ.",
        },
    }))
}

async fn fallback(uri: Uri) -> Response {
    not_found(uri.path())
}
