//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-deployment overrides layered on top of the file (CLI flags / env vars).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub upstream: Option<String>,
    pub max_zoom: Option<u8>,
    pub raster_style: Option<String>,
    pub cache_ttl_secs: Option<u64>,
}

impl ConfigOverrides {
    pub fn apply(self, config: &mut GatewayConfig) {
        if let Some(port) = self.port {
            config.listener.set_port(port);
        }
        if let Some(upstream) = self.upstream {
            config.upstream.base_url = upstream;
        }
        if let Some(max_zoom) = self.max_zoom {
            config.tiles.max_zoom = max_zoom;
        }
        if let Some(style) = self.raster_style {
            config.tiles.raster_style = style;
        }
        if let Some(ttl) = self.cache_ttl_secs {
            config.cache.ttl_secs = ttl;
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: GatewayConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Build the startup configuration: optional file, then overrides, then validation.
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<GatewayConfig, ConfigError> {
    let mut config: GatewayConfig = match path {
        Some(path) => toml::from_str(&fs::read_to_string(path)?)?,
        None => GatewayConfig::default(),
    };

    overrides.apply(&mut config);
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
