//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! deferred / query / registry produce:
//!     → tracing events (structured fields, filtered by EnvFilter)
//!     → metrics.rs (counters, histograms via the `metrics` facade)
//!
//! Consumers:
//!     → logging.rs installs a fmt subscriber (full, compact or pretty)
//!     → any recorder the host installs for the `metrics` facade
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber or recorder on its own
//! - Metrics are no-ops until the host installs a recorder

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LoggingError};
