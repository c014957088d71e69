//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section and field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

/// Root configuration for the route engine.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Route synchronization behavior.
    pub sync: SyncConfig,

    /// Shared route table settings.
    pub registry: RegistryConfig,

    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Route synchronization settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SyncConfig {
    /// What to do with a child list that resolves to no routes.
    pub empty_child_routes: EmptyChildRoutes,
}

/// Treatment of empty child lists in synchronized routes.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EmptyChildRoutes {
    /// Drop the field; the node reads as having no children.
    #[default]
    Omit,
    /// Keep the empty list on the node.
    Retain,
}

/// Route registry settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    /// Reuse query results until the route table is replaced.
    pub cache_results: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { cache_results: true }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directives (e.g. "route_sync=debug"). `RUST_LOG` takes precedence.
    pub filter: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "route_sync=info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
    Pretty,
}
