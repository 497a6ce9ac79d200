//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, zoom within the u32 grid)
//! - Check the upstream URL and path identifiers
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::GatewayConfig;
use crate::tile::MAX_SUPPORTED_ZOOM;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("not a socket address: {:?}", config.listener.bind_address),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) => {
            if url.scheme() != "http" {
                errors.push(ValidationError::new(
                    "upstream.base_url",
                    format!("unsupported scheme {:?}, expected http", url.scheme()),
                ));
            }
            if url.host_str().is_none() {
                errors.push(ValidationError::new("upstream.base_url", "missing host"));
            }
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ValidationError::new(
                    "upstream.base_url",
                    "must not carry a query or fragment",
                ));
            }
        }
        Err(e) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("invalid URL {:?}: {}", config.upstream.base_url, e),
        )),
    }

    if config.tiles.max_zoom > MAX_SUPPORTED_ZOOM {
        errors.push(ValidationError::new(
            "tiles.max_zoom",
            format!("{} exceeds {}", config.tiles.max_zoom, MAX_SUPPORTED_ZOOM),
        ));
    }

    check_path_id(&mut errors, "tiles.vector_source", &config.tiles.vector_source);
    check_path_id(&mut errors, "tiles.raster_style", &config.tiles.raster_style);

    if config.cors.allowed_origin.is_empty() {
        errors.push(ValidationError::new("cors.allowed_origin", "must not be empty"));
    }

    let positive = [
        ("upstream.connect_timeout_secs", config.upstream.connect_timeout_secs),
        ("upstream.timeout_secs", config.upstream.timeout_secs),
        ("timeouts.request_secs", config.timeouts.request_secs),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::new(field, "must be greater than 0"));
        }
    }

    if config.health_check.enabled {
        let hc = &config.health_check;
        if hc.interval_secs == 0 {
            errors.push(ValidationError::new("health_check.interval_secs", "must be greater than 0"));
        }
        if hc.timeout_secs == 0 {
            errors.push(ValidationError::new("health_check.timeout_secs", "must be greater than 0"));
        }
        if hc.unhealthy_threshold == 0 || hc.healthy_threshold == 0 {
            errors.push(ValidationError::new("health_check", "thresholds must be greater than 0"));
        }
        if !hc.path.starts_with('/') {
            errors.push(ValidationError::new("health_check.path", "must start with '/'"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("not a socket address: {:?}", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Style and source ids are spliced into upstream paths verbatim.
fn check_path_id(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && value != "."
        && value != "..";

    if !valid {
        errors.push(ValidationError::new(
            field,
            format!("{:?} must be non-empty and contain only [A-Za-z0-9._-]", value),
        ));
    }
}
