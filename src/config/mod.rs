//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → EngineConfig (validated, immutable)
//!     → SyncConfig to Synchronizer / Query
//!     → RegistryConfig to RouteRegistry
//!     → LoggingConfig to observability::logging
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{EmptyChildRoutes, EngineConfig, LogFormat, LoggingConfig, RegistryConfig, SyncConfig};
