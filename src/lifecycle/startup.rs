//! Startup announcements.

use std::net::SocketAddr;

use crate::config::GatewayConfig;

/// Log where the gateway listens and which URL templates it serves.
pub fn announce(config: &GatewayConfig, local_addr: SocketAddr) {
    let port = local_addr.port();

    tracing::info!(
        service = %config.service_name,
        address = %local_addr,
        "Tile gateway listening"
    );
    tracing::info!(
        upstream = %config.upstream.base_url,
        max_zoom = config.tiles.max_zoom,
        raster_style = %config.tiles.raster_style,
        cache_ttl_secs = config.cache.ttl_secs,
        "Proxying tiles from upstream"
    );
    tracing::info!("Vector tiles: http://localhost:{}/tiles/{{z}}/{{x}}/{{y}}.pbf", port);
    tracing::info!("Raster tiles: http://localhost:{}/tiles/{{z}}/{{x}}/{{y}}.png", port);
}
