//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Resolve config → Validate → Init logging/metrics → Bind → Announce
//!
//! Shutdown (shutdown.rs):
//!     Trigger → server stops accepting → in-flight requests drain
//!     → health monitor exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - One broadcast channel fans shutdown out to every background task

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
