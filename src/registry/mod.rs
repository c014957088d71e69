//! Shared route table.
//!
//! # Data Flow
//! ```text
//! replace(routes)
//!     → normalize → atomic swap of Arc<Vec<RouteNode>>
//!     → generation += 1, result cache cleared
//!
//! query(prefix)
//!     → cache hit for current generation? → same Deferred / ready routes
//!     → miss → Query::run on current snapshot → cache result
//! ```
//!
//! # Design Decisions
//! - Readers never block writers: the table lives in an `ArcSwap`
//! - Cached pending results are shared `Deferred`s, so concurrent callers join
//!   one resolution instead of starting their own
//! - Cache entries carry the generation they were computed for; stale entries are
//!   recomputed instead of served
//! - Results are cached per prefix and sync settings; a query's own settings win over
//!   the registry's `sync` section

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;
use dashmap::DashMap;

use crate::config::schema::{EmptyChildRoutes, EngineConfig, RegistryConfig, SyncConfig};
use crate::deferred::Deferred;
use crate::observability::metrics;
use crate::query::{FlatRoute, Query, QueryResult, QuerySet, QuerySetResult};
use crate::routing::node::RouteNode;
use crate::routing::normalize::{normalize, RouteInput};

#[derive(Debug, Clone)]
struct CachedQuery {
    generation: u64,
    routes: Deferred<Vec<FlatRoute>>,
}

/// Holds the current route table and answers queries against it.
#[derive(Debug)]
pub struct RouteRegistry {
    routes: ArcSwap<Vec<RouteNode>>,
    generation: AtomicU64,
    cache: DashMap<(String, EmptyChildRoutes), CachedQuery>,
    config: RegistryConfig,
    sync: SyncConfig,
}

impl RouteRegistry {
    /// Create a registry with default configuration.
    pub fn new(input: impl Into<RouteInput>) -> Self {
        Self::with_config(input, RegistryConfig::default(), SyncConfig::default())
    }

    /// Create a registry from the `registry` and `sync` sections of an engine config.
    pub fn from_config(input: impl Into<RouteInput>, config: &EngineConfig) -> Self {
        Self::with_config(input, config.registry.clone(), config.sync.clone())
    }

    pub fn with_config(input: impl Into<RouteInput>, config: RegistryConfig, sync: SyncConfig) -> Self {
        Self {
            routes: ArcSwap::from_pointee(normalize(input)),
            generation: AtomicU64::new(0),
            cache: DashMap::new(),
            config,
            sync,
        }
    }

    /// Snapshot of the current route table.
    pub fn routes(&self) -> Arc<Vec<RouteNode>> {
        self.routes.load_full()
    }

    /// Number of times the table has been replaced.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Swap in a new route table and drop every cached result.
    pub fn replace(&self, input: impl Into<RouteInput>) {
        let routes = normalize(input);
        let count = routes.len();
        self.routes.store(Arc::new(routes));
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        self.cache.clear();
        tracing::info!(generation, roots = count, "route table replaced");
    }

    /// Leaf routes under `prefix` in the current table, using the registry's sync settings.
    pub fn query(&self, prefix: &str) -> QueryResult {
        self.query_with(prefix, &self.sync)
    }

    /// Run `query` against the current table. Settings attached to the query take
    /// precedence over the registry's.
    pub fn run_query(&self, query: &Query) -> QueryResult {
        self.query_with(query.prefix(), query.config().unwrap_or(&self.sync))
    }

    fn query_with(&self, prefix: &str, sync: &SyncConfig) -> QueryResult {
        if !self.config.cache_results {
            return self.run(prefix, sync);
        }

        let key = (prefix.to_string(), sync.empty_child_routes);
        let generation = self.generation();
        let cached = self
            .cache
            .get(&key)
            .filter(|entry| entry.generation == generation)
            .map(|entry| entry.routes.clone());

        if let Some(routes) = cached {
            metrics::record_registry_cache(true);
            tracing::trace!(prefix = %prefix, "registry cache hit");
            return match routes.value() {
                Some(ready) => QueryResult::Ready(ready.clone()),
                None => QueryResult::Pending(routes),
            };
        }

        metrics::record_registry_cache(false);
        let result = self.run(prefix, sync);
        let routes = match &result {
            QueryResult::Ready(routes) => Deferred::ready(routes.clone()),
            QueryResult::Pending(pending) => pending.clone(),
        };
        self.cache.insert(key, CachedQuery { generation, routes });
        result
    }

    /// Run every query of `set` against the current table.
    pub fn resolve(&self, set: &QuerySet) -> QuerySetResult {
        QuerySetResult::collect(
            set.iter()
                .map(|(name, query)| (name.to_string(), self.run_query(query))),
        )
    }

    fn run(&self, prefix: &str, sync: &SyncConfig) -> QueryResult {
        let routes = self.routes.load();
        Query::new(prefix)
            .with_config(sync.clone())
            .run_normalized(&routes)
    }
}
