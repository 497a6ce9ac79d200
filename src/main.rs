//! XYZ map-tile gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────────┐
//!                      │                    TILE GATEWAY                      │
//!                      │                                                      │
//!   GET /tiles/z/x/y.ext  ┌─────────┐   ┌──────────┐   ┌──────────┐           │
//!   ───────────────────┼─▶│  http   │──▶│ matcher  │──▶│  router  │           │
//!                      │  │ server  │   │+validator│   │          │           │
//!                      │  └─────────┘   └────┬─────┘   └────┬─────┘           │
//!                      │                     │ 4xx          │ RouteDecision   │
//!                      │                     ▼              ▼                 │
//!   Client Response    │  ┌─────────┐   ┌──────────┐   ┌──────────┐           │
//!   ◀──────────────────┼──│response │◀──│  error   │   │ upstream │◀──────────┼── Renderer
//!                      │  │ relay   │◀──┤translate │◀──│  client  │  502      │
//!                      │  └─────────┘   └──────────┘   └──────────┘           │
//!                      │                                                      │
//!                      │  config · observability · health · lifecycle         │
//!                      └──────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tile_gateway::config::{resolve_config, ConfigOverrides};
use tile_gateway::lifecycle::{signals, startup, Shutdown};
use tile_gateway::observability::{logging, metrics};
use tile_gateway::HttpServer;

#[derive(Parser, Debug)]
#[command(name = "tile-gateway", version, about = "XYZ map-tile gateway")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "TILE_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Upstream renderer base URL
    #[arg(long, env = "UPSTREAM_TILESERVER")]
    upstream: Option<String>,

    /// Maximum supported zoom level
    #[arg(long, env = "MAX_ZOOM")]
    max_zoom: Option<u8>,

    /// Style used for raster tiles
    #[arg(long, env = "RASTER_STYLE")]
    raster_style: Option<String>,

    /// Cache-Control max-age for tiles, in seconds
    #[arg(long, env = "CACHE_TTL_SECS")]
    cache_ttl: Option<u64>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            upstream: self.upstream.clone(),
            max_zoom: self.max_zoom,
            raster_style: self.raster_style.clone(),
            cache_ttl_secs: self.cache_ttl,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = resolve_config(args.config.as_deref(), args.overrides())?;

    logging::init_logging(&config.observability);

    tracing::info!("tile-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    startup::announce(&config, listener.local_addr()?);

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
