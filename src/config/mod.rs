//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → ConfigOverrides (CLI flags / env: PORT, UPSTREAM_TILESERVER, ...)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → passed by value into HttpServer, which hands pieces to subsystems
//! ```
//!
//! # Design Decisions
//! - Config is built once at startup; request handlers never read the environment
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, resolve_config, ConfigError, ConfigOverrides};
pub use schema::{
    CacheConfig, CorsConfig, GatewayConfig, HealthCheckConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, TilesConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
